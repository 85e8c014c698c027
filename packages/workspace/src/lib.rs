//! # Webara Workspace
//!
//! Project lifecycle around the editor core: loading a project's canvas from
//! a store, saving and publishing it, and reporting the results to the user.
//!
//! ```text
//! ProjectStore (MemoryStore | FileStore)
//!        ↑ load / save / publish
//! Persistence ── in-flight flags ── Notifier → Notice stream (toasts)
//!        ↑
//! ProjectEditor ── EditSession (webara-editor)
//! ```

mod errors;
mod file_store;
mod notice;
mod persistence;
mod project;
mod store;

pub use errors::{StoreError, WorkspaceError};
pub use file_store::FileStore;
pub use notice::{Notice, Notifier};
pub use persistence::{published_url, Outcome, Persistence, PublishSettings, DEFAULT_PUBLISH_DOMAIN};
pub use project::ProjectEditor;
pub use store::{new_project_id, MemoryStore, ProjectRecord, ProjectStore};
