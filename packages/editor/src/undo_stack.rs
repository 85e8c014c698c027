//! # Undo/Redo Stack
//!
//! Snapshot history for the canvas document.
//!
//! ## Design
//!
//! - Documents are immutable and share structure, so history stores whole
//!   snapshots instead of inverse mutations
//! - Recording a change pushes the pre-change snapshot and clears redo
//! - Undo swaps the current document for the last snapshot
//! - Redo swaps it back
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! let next = mutation.apply(&doc)?;
//! stack.record(doc, mutation.name());
//! doc = next;
//!
//! if let Some(previous) = stack.undo(&doc) {
//!     doc = previous;
//! }
//! ```

use crate::document::Document;

/// A document state that can be returned to
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub document: Document,

    /// What change this snapshot precedes
    pub description: Option<String>,
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Snapshots before each applied change (most recent last)
    undo_stack: Vec<Snapshot>,

    /// Snapshots of undone states (most recent last)
    redo_stack: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the state before a change
    pub fn record(&mut self, previous: Document, description: impl Into<String>) {
        self.undo_stack.push(Snapshot {
            document: previous,
            description: Some(description.into()),
        });

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New change invalidates the redo branch
        self.redo_stack.clear();
    }

    /// Step back: returns the document to restore, if any
    pub fn undo(&mut self, current: &Document) -> Option<Document> {
        let snapshot = self.undo_stack.pop()?;

        self.redo_stack.push(Snapshot {
            document: current.clone(),
            description: snapshot.description.clone(),
        });

        Some(snapshot.document)
    }

    /// Step forward again: returns the document to restore, if any
    pub fn redo(&mut self, current: &Document) -> Option<Document> {
        let snapshot = self.redo_stack.pop()?;

        self.undo_stack.push(Snapshot {
            document: current.clone(),
            description: snapshot.description.clone(),
        });

        Some(snapshot.document)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
