//! # Persistence
//!
//! Save and publish against a [`ProjectStore`].
//!
//! Each operation has its own in-flight flag. A call made while the previous
//! one of the same kind is still running returns
//! [`Outcome::AlreadyInFlight`] without touching the store. Local edits stay
//! allowed during a save and are picked up by the next one.
//!
//! Failures are reported twice: as a [`Notice::Error`](crate::Notice) for the
//! user and as the returned error for the caller. The document is never
//! modified here, so a failed save can simply be retried.

use crate::errors::WorkspaceError;
use crate::notice::Notifier;
use crate::store::ProjectStore;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use webara_editor::Document;

pub const DEFAULT_PUBLISH_DOMAIN: &str = "webara.app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSettings {
    /// Suffix appended to the project slug
    pub domain: String,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            domain: DEFAULT_PUBLISH_DOMAIN.to_string(),
        }
    }
}

/// Public URL for a project: lowercased name, whitespace runs collapsed to a
/// single `-`, followed by `.{domain}`
pub fn published_url(name: &str, domain: &str) -> String {
    let slug = name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}.{}", slug, domain)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved,
    Published { url: String },
    /// Skipped: the same operation was already running
    AlreadyInFlight,
}

/// Holds an in-flight flag for the lifetime of one operation
struct InFlight {
    flag: Arc<AtomicBool>,
}

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn ProjectStore>,
    notifier: Notifier,
    settings: PublishSettings,
    saving: Arc<AtomicBool>,
    publishing: Arc<AtomicBool>,
}

impl Persistence {
    pub fn new(store: Arc<dyn ProjectStore>, notifier: Notifier, settings: PublishSettings) -> Self {
        Self {
            store,
            notifier,
            settings,
            saving: Arc::new(AtomicBool::new(false)),
            publishing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn store(&self) -> &Arc<dyn ProjectStore> {
        &self.store
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn settings(&self) -> &PublishSettings {
        &self.settings
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    pub fn is_publishing(&self) -> bool {
        self.publishing.load(Ordering::Acquire)
    }

    /// Write `document` as the project's canvas data
    pub async fn save(&self, project_id: &str, document: &Document) -> Result<Outcome, WorkspaceError> {
        let Some(_guard) = InFlight::acquire(&self.saving) else {
            info!(project_id = %project_id, "Save already in flight, skipping");
            return Ok(Outcome::AlreadyInFlight);
        };

        info!(project_id = %project_id, "Saving project");
        let result = match document.to_value() {
            Ok(canvas) => self
                .store
                .save_project(project_id, canvas, Utc::now())
                .await
                .map_err(WorkspaceError::from),
            Err(e) => Err(WorkspaceError::from(e)),
        };

        match result {
            Ok(()) => {
                info!(project_id = %project_id, "Project saved");
                self.notifier.success("Project saved");
                Ok(Outcome::Saved)
            }
            Err(e) => {
                warn!(project_id = %project_id, error = %e, "Save failed");
                self.notifier.error("Failed to save project");
                Err(e)
            }
        }
    }

    /// Mark the project published under a URL derived from its name
    pub async fn publish(&self, project_id: &str, project_name: &str) -> Result<Outcome, WorkspaceError> {
        let Some(_guard) = InFlight::acquire(&self.publishing) else {
            info!(project_id = %project_id, "Publish already in flight, skipping");
            return Ok(Outcome::AlreadyInFlight);
        };

        let url = published_url(project_name, &self.settings.domain);
        info!(project_id = %project_id, url = %url, "Publishing project");

        match self.store.publish_project(project_id, true, &url, Utc::now()).await {
            Ok(()) => {
                self.notifier.success(format!("Published at {}", url));
                Ok(Outcome::Published { url })
            }
            Err(e) => {
                warn!(project_id = %project_id, error = %e, "Publish failed");
                self.notifier.error("Failed to publish project");
                Err(e.into())
            }
        }
    }

    /// Save a snapshot on a detached task
    pub fn spawn_save(
        &self,
        project_id: impl Into<String>,
        document: Document,
    ) -> JoinHandle<Result<Outcome, WorkspaceError>> {
        let this = self.clone();
        let project_id = project_id.into();
        tokio::spawn(async move { this.save(&project_id, &document).await })
    }
}
