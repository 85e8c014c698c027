pub mod edit;
pub mod init;
pub mod palette;
pub mod project;
pub mod publish;

pub use edit::{add_section, drop_element, edit, AddSectionArgs, DropArgs, EditArgs};
pub use init::{init, InitArgs};
pub use palette::{palette, PaletteArgs};
pub use project::{list, new, show, ListArgs, NewArgs, ShowArgs};
pub use publish::{publish, PublishArgs};

use crate::config::Config;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;
use webara_workspace::{FileStore, Notice, Notifier, Persistence, ProjectEditor, ProjectStore};

/// File-backed persistence plus the queue of notices to print
pub struct Context {
    persistence: Persistence,
    notices: UnboundedReceiver<Notice>,
}

impl Context {
    pub fn new(cwd: &Path, config: Config) -> Self {
        let store_path = config.store_path(cwd);
        debug!(store = %store_path.display(), domain = %config.publish_domain, "Opening project store");

        let store: Arc<dyn ProjectStore> = Arc::new(FileStore::new(store_path));
        let (notifier, notices) = Notifier::channel();
        let persistence = Persistence::new(store, notifier, config.publish_settings());

        Self {
            persistence,
            notices,
        }
    }

    pub fn store(&self) -> &Arc<dyn ProjectStore> {
        self.persistence.store()
    }

    pub fn notifier(&self) -> &Notifier {
        self.persistence.notifier()
    }

    pub async fn open(&mut self, project_id: &str) -> Result<ProjectEditor> {
        let opened = ProjectEditor::open(self.persistence.clone(), project_id).await;
        self.flush_notices();
        Ok(opened?)
    }

    /// Print queued notices the way the editor shows toasts
    pub fn flush_notices(&mut self) {
        while let Ok(notice) = self.notices.try_recv() {
            match notice {
                Notice::Success(message) => println!("  {} {}", "✓".green(), message),
                Notice::Error(message) => eprintln!("  {} {}", "✗".red(), message),
            }
        }
    }
}
