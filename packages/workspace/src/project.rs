//! Open project: backing record + edit session + persistence

use crate::errors::WorkspaceError;
use crate::persistence::{Outcome, Persistence};
use crate::store::ProjectRecord;
use chrono::Utc;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use webara_editor::{Document, EditSession, IdGenerator};

pub struct ProjectEditor {
    record: ProjectRecord,
    session: EditSession,
    persistence: Persistence,
}

impl ProjectEditor {
    /// Load a project and start an edit session on its canvas
    ///
    /// On failure the user is notified with "Failed to load project" and the
    /// caller is expected to leave the editor view.
    pub async fn open(persistence: Persistence, project_id: &str) -> Result<Self, WorkspaceError> {
        match Self::load(&persistence, project_id).await {
            Ok((record, document)) => {
                let nonce = Utc::now().timestamp_micros() as u64;
                let ids = IdGenerator::for_session(&record.id, nonce);
                info!(project_id = %record.id, id_seed = %ids.seed(), "Opened project");

                Ok(Self {
                    record,
                    session: EditSession::new(document, ids),
                    persistence,
                })
            }
            Err(e) => {
                warn!(project_id = %project_id, error = %e, "Project load failed");
                persistence.notifier().error("Failed to load project");
                Err(WorkspaceError::load(project_id, e))
            }
        }
    }

    async fn load(persistence: &Persistence, project_id: &str) -> Result<(ProjectRecord, Document), WorkspaceError> {
        let record = persistence.store().load_project(project_id).await?;

        let document = match &record.canvas_data {
            None | Some(Value::Null) => Document::new(),
            Some(canvas) => Document::from_value(canvas.clone())?,
        };

        Ok((record, document))
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Record as loaded, with publish state kept current
    pub fn record(&self) -> &ProjectRecord {
        &self.record
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn document(&self) -> &Document {
        self.session.document()
    }

    pub async fn save(&self) -> Result<Outcome, WorkspaceError> {
        self.persistence.save(&self.record.id, self.session.document()).await
    }

    /// Fire-and-forget save of the current snapshot; editing may continue
    pub fn spawn_save(&self) -> JoinHandle<Result<Outcome, WorkspaceError>> {
        self.persistence
            .spawn_save(self.record.id.clone(), self.session.snapshot())
    }

    pub async fn publish(&mut self) -> Result<Outcome, WorkspaceError> {
        let outcome = self.persistence.publish(&self.record.id, &self.record.name).await?;

        if let Outcome::Published { url } = &outcome {
            self.record.published = true;
            self.record.published_url = Some(url.clone());
        }

        Ok(outcome)
    }
}
