//! # Webara Editor
//!
//! Core canvas editing engine for Webara.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ palette: drag start → type + label tag      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ drop_target: resolve drop → Mutation        │
//! │  - Region gating (top/middle/bottom)        │
//! │  - Container vs element creation            │
//! │  - Canvas-root auto-wrap                    │
//! │  - defaults: initial content + styles       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: apply, select, edit, undo/redo     │
//! │  - document: immutable three-region tree    │
//! │  - selection: section / container / element │
//! │  - navbar: nested content patches           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Immutable snapshots**: every write returns a new `Document`; unchanged
//!    subtrees are shared
//! 2. **Silent rejection**: illegal or stale drops are no-ops, never errors
//! 3. **Defaults once**: default content is applied at creation only
//! 4. **No I/O**: persistence lives in `webara-workspace`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use webara_editor::{Document, DragPayload, DropTarget, EditSession, ElementPatch, IdGenerator, Region};
//!
//! let mut session = EditSession::new(Document::new(), IdGenerator::for_session("project-1", 7));
//!
//! let section = session.add_section(Region::Middle);
//! session.handle_drop(&DropTarget::section(&section), &DragPayload::new("button", "Button"));
//!
//! // The new button is selected; edit it
//! session.update_element(&ElementPatch::new().with_content("text", "Sign up"));
//!
//! let json = session.document().to_json_pretty()?;
//! ```

pub mod defaults;
mod document;
mod drop_target;
mod element;
mod errors;
mod id_generator;
mod mutations;
mod navbar;
pub mod palette;
mod selection;
mod session;
mod undo_stack;

pub use defaults::{default_payload, instantiate, DefaultPayload};
pub use document::{Container, Document, ElementLocation, ElementSlot, Region, Section};
pub use drop_target::{
    resolve_drop, DragPayload, DropAction, DropTarget, IgnoreReason, SelectTarget, COMPONENT_LABEL_KEY,
    COMPONENT_TYPE_KEY, ELEMENT_LABEL_KEY, ELEMENT_TYPE_KEY,
};
pub use element::{Content, Element, ElementKind, ElementPatch, Styles};
pub use errors::EditorError;
pub use id_generator::{session_seed, IdGenerator};
pub use mutations::{Mutation, MutationError};
pub use navbar::{ButtonField, LinkField, LogoKind, NavbarEditor};
pub use palette::{Category, PaletteItem};
pub use selection::{Selection, SelectionListener};
pub use session::{DropOutcome, EditSession};
pub use undo_stack::{Snapshot, UndoStack};
