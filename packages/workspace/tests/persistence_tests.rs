//! Project lifecycle against real and misbehaving stores

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use webara_editor::{DragPayload, DropTarget, Region};
use webara_workspace::{
    FileStore, MemoryStore, Notice, Notifier, Outcome, Persistence, ProjectEditor, ProjectRecord, ProjectStore,
    PublishSettings, StoreError, WorkspaceError,
};

/// Delegates to a `MemoryStore`, holding saves until released
struct GatedStore {
    inner: MemoryStore,
    release: Notify,
    saves: AtomicUsize,
}

impl GatedStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            release: Notify::new(),
            saves: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProjectStore for GatedStore {
    async fn create_project(&self, name: &str) -> Result<ProjectRecord, StoreError> {
        self.inner.create_project(name).await
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        self.inner.list_projects().await
    }

    async fn load_project(&self, id: &str) -> Result<ProjectRecord, StoreError> {
        self.inner.load_project(id).await
    }

    async fn save_project(&self, id: &str, canvas_data: Value, updated_at: DateTime<Utc>) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        self.inner.save_project(id, canvas_data, updated_at).await
    }

    async fn publish_project(
        &self,
        id: &str,
        published: bool,
        published_url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.inner.publish_project(id, published, published_url, updated_at).await
    }
}

/// Loads fine, fails every write
struct FailingStore {
    record: ProjectRecord,
}

#[async_trait]
impl ProjectStore for FailingStore {
    async fn create_project(&self, _name: &str) -> Result<ProjectRecord, StoreError> {
        Err(StoreError::Backend("offline".to_string()))
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        Ok(vec![self.record.clone()])
    }

    async fn load_project(&self, _id: &str) -> Result<ProjectRecord, StoreError> {
        Ok(self.record.clone())
    }

    async fn save_project(&self, _id: &str, _canvas: Value, _at: DateTime<Utc>) -> Result<(), StoreError> {
        Err(StoreError::Backend("offline".to_string()))
    }

    async fn publish_project(&self, _id: &str, _published: bool, _url: &str, _at: DateTime<Utc>) -> Result<(), StoreError> {
        Err(StoreError::Backend("offline".to_string()))
    }
}

fn persistence(store: Arc<dyn ProjectStore>) -> (Persistence, tokio::sync::mpsc::UnboundedReceiver<Notice>) {
    let (notifier, rx) = Notifier::channel();
    (Persistence::new(store, notifier, PublishSettings::default()), rx)
}

#[tokio::test]
async fn test_open_missing_project_notifies_and_fails() {
    let (persistence, mut rx) = persistence(Arc::new(MemoryStore::new()));

    let result = ProjectEditor::open(persistence, "missing").await;

    let Err(error) = result else {
        panic!("open should fail");
    };
    assert!(matches!(error, WorkspaceError::Load { .. }));
    assert!(error.is_not_found());
    assert_eq!(rx.try_recv().unwrap(), Notice::Error("Failed to load project".to_string()));
}

#[tokio::test]
async fn test_open_rejects_malformed_canvas() {
    let mut record = ProjectRecord::new("p-1", "Broken", Utc::now());
    record.canvas_data = Some(json!({ "middle": "not a list" }));
    let (persistence, mut rx) = persistence(Arc::new(MemoryStore::with_projects([record])));

    let result = ProjectEditor::open(persistence, "p-1").await;

    assert!(matches!(result, Err(WorkspaceError::Load { .. })));
    assert!(rx.try_recv().unwrap().is_error());
}

#[tokio::test]
async fn test_edit_save_reopen() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let store: Arc<dyn ProjectStore> = Arc::new(FileStore::new(dir.path()));
    let id = store.create_project("My Site").await?.id;
    let (persistence, mut rx) = persistence(store.clone());

    let mut editor = ProjectEditor::open(persistence.clone(), &id).await?;
    assert!(editor.document().is_empty());

    let session = editor.session_mut();
    let section = session.add_section(Region::Middle);
    session.handle_drop(&DropTarget::section(&section), &DragPayload::new("button", "Button"));

    assert_eq!(editor.save().await?, Outcome::Saved);
    assert_eq!(rx.try_recv()?, Notice::Success("Project saved".to_string()));

    let reopened = ProjectEditor::open(persistence, &id).await?;
    assert_eq!(reopened.document(), editor.document());

    let raw = store.load_project(&id).await?.canvas_data.unwrap_or_default();
    assert_eq!(raw["middle"][0]["directElements"][0]["content"]["text"], "Click Me");
    Ok(())
}

#[tokio::test]
async fn test_publish_sets_flag_and_url() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let id = store.create_project("My Site").await?.id;
    let (persistence, _rx) = persistence(store.clone());

    let mut editor = ProjectEditor::open(persistence, &id).await?;
    let outcome = editor.publish().await?;

    assert_eq!(
        outcome,
        Outcome::Published {
            url: "my-site.webara.app".to_string()
        }
    );
    assert!(editor.record().published);

    let record = store.load_project(&id).await?;
    assert!(record.published);
    assert_eq!(record.published_url.as_deref(), Some("my-site.webara.app"));
    Ok(())
}

#[tokio::test]
async fn test_failed_save_keeps_document_and_notifies() -> anyhow::Result<()> {
    let store = Arc::new(FailingStore {
        record: ProjectRecord::new("p-1", "Offline", Utc::now()),
    });
    let (persistence, mut rx) = persistence(store);

    let mut editor = ProjectEditor::open(persistence, "p-1").await?;
    editor.session_mut().add_section(Region::Top);
    let before = editor.document().clone();

    let result = editor.save().await;

    assert!(matches!(result, Err(WorkspaceError::Store(StoreError::Backend(_)))));
    assert_eq!(editor.document(), &before);
    assert_eq!(rx.try_recv()?, Notice::Error("Failed to save project".to_string()));

    assert!(editor.publish().await.is_err());
    assert!(!editor.record().published);
    assert_eq!(rx.try_recv()?, Notice::Error("Failed to publish project".to_string()));

    // Retry is allowed once the failed save has finished
    assert!(editor.save().await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_second_save_while_in_flight_is_skipped() -> anyhow::Result<()> {
    let memory = MemoryStore::new();
    let id = memory.create_project("Busy").await?.id;
    let store = Arc::new(GatedStore::new(memory));
    let (persistence, _rx) = persistence(store.clone());

    let mut editor = ProjectEditor::open(persistence.clone(), &id).await?;
    let first = editor.spawn_save();

    while !persistence.is_saving() {
        tokio::task::yield_now().await;
    }

    // Editing continues while the save is pending
    editor.session_mut().add_section(Region::Middle);
    assert_eq!(editor.save().await?, Outcome::AlreadyInFlight);
    assert_eq!(store.saves.load(Ordering::SeqCst), 1);

    store.release.notify_one();
    assert_eq!(first.await??, Outcome::Saved);
    assert!(!persistence.is_saving());

    // The spawned save wrote the snapshot taken before the edit
    let saved = store.load_project(&id).await?.canvas_data.unwrap_or_default();
    assert_eq!(saved["middle"], json!([]));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_save_and_publish_keep_both_fields() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let store = Arc::new(FileStore::new(dir.path()));

    for round in 0..50 {
        let id = store.create_project(&format!("Site {}", round)).await?.id;
        let url = format!("site-{}.webara.app", round);

        let save = tokio::spawn({
            let store = store.clone();
            let id = id.clone();
            async move { store.save_project(&id, json!({ "n": round }), Utc::now()).await }
        });
        let publish = tokio::spawn({
            let store = store.clone();
            let id = id.clone();
            let url = url.clone();
            async move { store.publish_project(&id, true, &url, Utc::now()).await }
        });

        save.await??;
        publish.await??;

        let record = store.load_project(&id).await?;
        assert_eq!(record.canvas_data, Some(json!({ "n": round })), "round {}", round);
        assert!(record.published, "round {}", round);
        assert_eq!(record.published_url.as_deref(), Some(url.as_str()));
    }

    Ok(())
}
