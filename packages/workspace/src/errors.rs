//! Error types for project storage and the editor lifecycle

use thiserror::Error;
use webara_editor::EditorError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Invalid project id: {0}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt project record: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by a remote backend
    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Failed to load project {project_id}: {source}")]
    Load {
        project_id: String,
        #[source]
        source: Box<WorkspaceError>,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid canvas data: {0}")]
    Canvas(#[from] EditorError),
}

impl WorkspaceError {
    pub(crate) fn load(project_id: &str, source: impl Into<WorkspaceError>) -> Self {
        WorkspaceError::Load {
            project_id: project_id.to_string(),
            source: Box::new(source.into()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            WorkspaceError::Store(StoreError::NotFound(_)) => true,
            WorkspaceError::Load { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}
