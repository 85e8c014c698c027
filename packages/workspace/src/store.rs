//! # Project Store
//!
//! Boundary to the persistence collaborator. Records keep the row shape of the
//! hosted `projects` table, with the canvas document stored as raw JSON in
//! `canvas_data`.

use crate::errors::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Persisted canvas document; absent until the first save
    #[serde(default)]
    pub canvas_data: Option<Value>,

    #[serde(default)]
    pub published: bool,

    #[serde(default)]
    pub published_url: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            canvas_data: None,
            published: false,
            published_url: None,
            created_at: Some(created_at),
            updated_at: Some(created_at),
        }
    }
}

/// Async key/value store of project records
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, name: &str) -> Result<ProjectRecord, StoreError>;

    /// All projects, most recently updated first
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError>;

    async fn load_project(&self, id: &str) -> Result<ProjectRecord, StoreError>;

    async fn save_project(&self, id: &str, canvas_data: Value, updated_at: DateTime<Utc>) -> Result<(), StoreError>;

    async fn publish_project(
        &self,
        id: &str,
        published: bool,
        published_url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: ProjectStore + ?Sized> ProjectStore for Arc<S> {
    async fn create_project(&self, name: &str) -> Result<ProjectRecord, StoreError> {
        (**self).create_project(name).await
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        (**self).list_projects().await
    }

    async fn load_project(&self, id: &str) -> Result<ProjectRecord, StoreError> {
        (**self).load_project(id).await
    }

    async fn save_project(&self, id: &str, canvas_data: Value, updated_at: DateTime<Utc>) -> Result<(), StoreError> {
        (**self).save_project(id, canvas_data, updated_at).await
    }

    async fn publish_project(
        &self,
        id: &str,
        published: bool,
        published_url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        (**self).publish_project(id, published, published_url, updated_at).await
    }
}

/// Fresh project id: name checksum, creation time and a per-process sequence
pub fn new_project_id(name: &str, created_at: DateTime<Utc>) -> String {
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(name.as_bytes());
    hasher.update(&SEQUENCE.fetch_add(1, Ordering::Relaxed).to_le_bytes());

    format!("{:08x}-{:x}", hasher.finalize(), created_at.timestamp_micros())
}

pub(crate) fn sort_recent_first(records: &mut [ProjectRecord]) {
    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: RwLock<HashMap<String, ProjectRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records
    pub fn with_projects(records: impl IntoIterator<Item = ProjectRecord>) -> Self {
        Self {
            projects: RwLock::new(records.into_iter().map(|r| (r.id.clone(), r)).collect()),
        }
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(&self, name: &str) -> Result<ProjectRecord, StoreError> {
        let now = Utc::now();
        let record = ProjectRecord::new(new_project_id(name, now), name, now);

        self.projects.write().await.insert(record.id.clone(), record.clone());
        debug!(project_id = %record.id, "Created project");
        Ok(record)
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        let mut records: Vec<ProjectRecord> = self.projects.read().await.values().cloned().collect();
        sort_recent_first(&mut records);
        Ok(records)
    }

    async fn load_project(&self, id: &str) -> Result<ProjectRecord, StoreError> {
        self.projects
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn save_project(&self, id: &str, canvas_data: Value, updated_at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut projects = self.projects.write().await;
        let record = projects.get_mut(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        record.canvas_data = Some(canvas_data);
        record.updated_at = Some(updated_at);
        Ok(())
    }

    async fn publish_project(
        &self,
        id: &str,
        published: bool,
        published_url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut projects = self.projects.write().await;
        let record = projects.get_mut(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        record.published = published;
        record.published_url = Some(published_url.to_string());
        record.updated_at = Some(updated_at);
        Ok(())
    }
}
