//! JSON-file project store: one `<id>.json` file per project under a directory
//!
//! Every write is a read-modify-write of the whole record, so writes are
//! serialized through one lock shared by all clones of the store. Saves and
//! publishes touch different fields and must not clobber each other.

use crate::errors::StoreError;
use crate::store::{new_project_id, sort_recent_first, ProjectRecord, ProjectStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,

    /// Held across every read-modify-write
    writes: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            writes: Arc::new(Mutex::new(())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a project's record, rejecting ids that could escape the root
    fn record_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }

        Ok(self.root.join(format!("{}.json", id)))
    }

    async fn read(&self, id: &str) -> Result<ProjectRecord, StoreError> {
        let path = self.record_path(id)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound(id.to_string())),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write via a temp file and rename so readers never see a partial record
    ///
    /// Callers must hold `writes`.
    async fn write(&self, record: &ProjectRecord) -> Result<(), StoreError> {
        let path = self.record_path(&record.id)?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(record)?).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(project_id = %record.id, path = %path.display(), "Wrote project record");
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for FileStore {
    async fn create_project(&self, name: &str) -> Result<ProjectRecord, StoreError> {
        let now = Utc::now();
        let record = ProjectRecord::new(new_project_id(name, now), name, now);

        let _lock = self.writes.lock().await;
        self.write(&record).await?;
        Ok(record)
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable project record");
                    continue;
                }
            };

            match serde_json::from_slice::<ProjectRecord>(&bytes) {
                Ok(record) => records.push(record),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable project record"),
            }
        }

        sort_recent_first(&mut records);
        Ok(records)
    }

    async fn load_project(&self, id: &str) -> Result<ProjectRecord, StoreError> {
        self.read(id).await
    }

    async fn save_project(&self, id: &str, canvas_data: Value, updated_at: DateTime<Utc>) -> Result<(), StoreError> {
        let _lock = self.writes.lock().await;

        let mut record = self.read(id).await?;
        record.canvas_data = Some(canvas_data);
        record.updated_at = Some(updated_at);
        self.write(&record).await
    }

    async fn publish_project(
        &self,
        id: &str,
        published: bool,
        published_url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let _lock = self.writes.lock().await;

        let mut record = self.read(id).await?;
        record.published = published;
        record.published_url = Some(published_url.to_string());
        record.updated_at = Some(updated_at);
        self.write(&record).await
    }
}
