//! # Edit Session
//!
//! One user's editing state for a canvas document: the current snapshot,
//! the selection, the id generator and the undo history.
//!
//! All UI events (drops, clicks, property edits) enter through here and run
//! to completion before the next one. Structural failures (stale ids,
//! rejected drops, missing selection) are recovered here and never surface
//! as errors; they are logged at `debug` and leave the state unchanged.

use crate::document::{Document, Region};
use crate::drop_target::{resolve_drop, DragPayload, DropAction, DropTarget, IgnoreReason, SelectTarget};
use crate::element::{Element, ElementPatch};
use crate::id_generator::IdGenerator;
use crate::mutations::{Mutation, MutationError};
use crate::selection::{Selection, SelectionListener};
use crate::undo_stack::UndoStack;
use tracing::{debug, info};

/// What a drop did
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// A node was created; carries its id
    Created { node_id: String },
    Ignored(IgnoreReason),
}

/// Single edit session over a canvas document
pub struct EditSession {
    /// Current document snapshot
    document: Document,

    /// Incremented on each effective change
    version: u64,

    selection: Selection,

    /// Element shown in the property panel
    active_element: Option<Element>,

    ids: IdGenerator,

    history: UndoStack,

    listeners: Vec<Box<dyn SelectionListener>>,
}

impl EditSession {
    /// Create new edit session
    pub fn new(document: Document, ids: IdGenerator) -> Self {
        Self {
            document,
            version: 0,
            selection: Selection::new(),
            active_element: None,
            ids,
            history: UndoStack::new(),
            listeners: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: UndoStack) -> Self {
        self.history = history;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Cheap copy of the current document for saving or diffing
    pub fn snapshot(&self) -> Document {
        self.document.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_element(&self) -> Option<&Element> {
        self.active_element.as_ref()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Register a rendering-layer hook for selection changes
    pub fn subscribe(&mut self, listener: impl SelectionListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ---- Structure ----

    /// Append a new empty section to `region`, returning its id
    pub fn add_section(&mut self, region: Region) -> String {
        let section_id = self.ids.next_id("section");
        let mutation = Mutation::AddSection {
            region,
            section_id: section_id.clone(),
        };

        // Appending a section has no preconditions
        if let Err(error) = self.commit(&mutation) {
            debug!(error = %error, "Add section failed");
        }

        section_id
    }

    /// Resolve and apply a drop
    pub fn handle_drop(&mut self, target: &DropTarget, payload: &DragPayload) -> DropOutcome {
        match resolve_drop(&self.document, target, payload, &mut self.ids) {
            DropAction::Ignore(reason) => DropOutcome::Ignored(reason),

            DropAction::Apply { mutation, select } => {
                if let Err(error) = self.commit(&mutation) {
                    debug!(error = %error, mutation = mutation.name(), "Drop no longer applies");
                    return DropOutcome::Ignored(IgnoreReason::Stale(error));
                }

                // Auto-wrap also makes the new section and container current
                if let Mutation::WrapInSection { section, .. } = &mutation {
                    self.select_section(&section.id);
                    if let Some(container) = section.containers.first() {
                        self.select_container(&container.id);
                    }
                }

                let node_id = match select {
                    SelectTarget::Container { container_id } => {
                        self.select_container(&container_id);
                        container_id
                    }
                    SelectTarget::Element(element) => {
                        let id = element.id.clone();
                        self.select_element(&element);
                        id
                    }
                };

                info!(node_id = %node_id, mutation = mutation.name(), "Drop applied");
                DropOutcome::Created { node_id }
            }
        }
    }

    // ---- Selection ----

    pub fn select_section(&mut self, section_id: &str) {
        self.selection.select_section(section_id);
        self.set_active(None);
    }

    pub fn select_container(&mut self, container_id: &str) {
        self.selection.select_container(container_id);
        self.set_active(None);
    }

    pub fn select_element(&mut self, element: &Element) {
        self.selection.select_element(element.id.as_str());
        self.set_active(Some(element.clone()));
    }

    /// Select an element by id; returns false if it is not in the document
    pub fn select_element_by_id(&mut self, element_id: &str) -> bool {
        match self.document.find_element(element_id).cloned() {
            Some(element) => {
                self.select_element(&element);
                true
            }
            None => {
                debug!(element_id = %element_id, "Cannot select missing element");
                false
            }
        }
    }

    /// Canvas background click
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.set_active(None);
    }

    // ---- Editing ----

    /// Merge `patch` into the selected element and write it back
    ///
    /// Returns false when nothing happened (no selection, element gone, empty
    /// patch).
    pub fn update_element(&mut self, patch: &ElementPatch) -> bool {
        match self.try_update_element(patch) {
            Ok(changed) => changed,
            Err(error) => {
                debug!(error = %error, "Element update skipped");
                false
            }
        }
    }

    fn try_update_element(&mut self, patch: &ElementPatch) -> Result<bool, MutationError> {
        let selected = self.active_element.as_ref().ok_or(MutationError::NothingSelected)?;

        // Merge onto the document's copy so the panel can never resurrect
        // stale values
        let current = self
            .document
            .find_element(&selected.id)
            .ok_or_else(|| MutationError::ElementNotFound(selected.id.clone()))?;

        let merged = current.merged(patch);
        if &merged == current {
            return Ok(false);
        }

        let mutation = Mutation::ReplaceElement {
            element_id: merged.id.clone(),
            element: merged.clone(),
        };
        self.commit(&mutation)?;

        debug!(element_id = %merged.id, "Element updated");
        self.set_active(Some(merged));
        Ok(true)
    }

    // ---- History ----

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.document) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.document) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    // ---- Internals ----

    /// Apply a mutation, recording the previous snapshot for undo
    fn commit(&mut self, mutation: &Mutation) -> Result<(), MutationError> {
        let next = mutation.apply(&self.document)?;
        let previous = std::mem::replace(&mut self.document, next);
        self.history.record(previous, mutation.name());
        self.version += 1;
        Ok(())
    }

    fn restore(&mut self, document: Document) {
        self.document = document;
        self.version += 1;

        let doc = &self.document;
        self.selection.retain_existing(|id| doc.contains_id(id));

        // Refresh the panel with the restored element (or clear it)
        let active = self
            .selection
            .element_id()
            .and_then(|id| self.document.find_element(id))
            .cloned();
        self.set_active(active);
    }

    fn set_active(&mut self, element: Option<Element>) {
        self.active_element = element;
        for listener in &mut self.listeners {
            listener.element_selected(self.active_element.as_ref());
        }
    }
}
