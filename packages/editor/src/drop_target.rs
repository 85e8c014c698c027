//! # Drop Resolution
//!
//! Decides what a drop on the canvas does: whether it is legal, which node it
//! creates, and where that node goes.
//!
//! ```text
//! payload has no type ─────────────────────────────► ignore
//! target = container ──► build element ────────────► AddElementToContainer
//! target = section   ──► region gate ─┬─ opens container ► AddContainer
//!                                     └─ otherwise ──────► AddElementToSection
//! target = canvas root ─ middle empty? ─ yes ──────► WrapInSection
//!                                      └ no ───────► ignore
//! ```
//!
//! Resolution is pure: it reads the document and mints ids, but never writes.
//! The caller applies the returned mutation and moves the selection.
//!
//! Every rejection is silent from the user's point of view. Stale ids are
//! expected (a drag can outlive the render that produced its target).

use crate::defaults::instantiate;
use crate::document::{Container, Document, Region, Section};
use crate::element::{Element, ElementKind};
use crate::id_generator::IdGenerator;
use crate::mutations::{Mutation, MutationError};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Drag-data key written by the element library
pub const ELEMENT_TYPE_KEY: &str = "elementType";
pub const ELEMENT_LABEL_KEY: &str = "elementLabel";

/// Drag-data keys written by the premade component library
pub const COMPONENT_TYPE_KEY: &str = "componentType";
pub const COMPONENT_LABEL_KEY: &str = "componentLabel";

/// Type + label tag carried by a drag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragPayload {
    /// `None` when the drag carried no recognizable type
    pub kind: Option<ElementKind>,
    pub label: String,
}

impl DragPayload {
    pub fn new(kind: impl AsRef<str>, label: impl Into<String>) -> Self {
        let tag = kind.as_ref();
        Self {
            kind: (!tag.is_empty()).then(|| ElementKind::parse(tag)),
            label: label.into(),
        }
    }

    /// Decode from drag data, preferring element keys over component keys
    pub fn from_drag_data(data: &HashMap<String, String>) -> Self {
        let read = |primary: &str, fallback: &str| {
            data.get(primary)
                .filter(|v| !v.is_empty())
                .or_else(|| data.get(fallback))
                .cloned()
                .unwrap_or_default()
        };

        Self::new(
            read(ELEMENT_TYPE_KEY, COMPONENT_TYPE_KEY),
            read(ELEMENT_LABEL_KEY, COMPONENT_LABEL_KEY),
        )
    }

    pub fn to_drag_data(&self) -> HashMap<String, String> {
        let mut data = HashMap::new();
        if let Some(kind) = &self.kind {
            data.insert(ELEMENT_TYPE_KEY.to_string(), kind.to_string());
        }
        data.insert(ELEMENT_LABEL_KEY.to_string(), self.label.clone());
        data
    }
}

/// What the pointer was over when the drag ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Canvas background, no section under the cursor
    CanvasRoot,

    /// Section background, outside any container
    Section { section_id: String },

    /// Inside a container
    Container {
        section_id: String,
        container_id: String,
    },
}

impl DropTarget {
    pub fn section(section_id: impl Into<String>) -> Self {
        DropTarget::Section {
            section_id: section_id.into(),
        }
    }

    pub fn container(section_id: impl Into<String>, container_id: impl Into<String>) -> Self {
        DropTarget::Container {
            section_id: section_id.into(),
            container_id: container_id.into(),
        }
    }
}

/// Why a drop had no effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    MissingType,
    UnknownSection(String),
    UnknownContainer(String),
    RegionRejects { region: Region, kind: ElementKind },
    CanvasNotEmpty,
    /// Resolution succeeded but the document changed before it was applied
    Stale(MutationError),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::MissingType => write!(f, "drag payload has no type"),
            IgnoreReason::UnknownSection(id) => write!(f, "section {} is not in the document", id),
            IgnoreReason::UnknownContainer(id) => write!(f, "container {} is not in the document", id),
            IgnoreReason::RegionRejects { region, kind } => {
                write!(f, "{} region does not accept {}", region, kind)
            }
            IgnoreReason::CanvasNotEmpty => write!(f, "drop a specific section once content exists"),
            IgnoreReason::Stale(error) => write!(f, "target no longer applies: {}", error),
        }
    }
}

/// Selection to apply after a successful drop
#[derive(Debug, Clone, PartialEq)]
pub enum SelectTarget {
    Container { container_id: String },
    Element(Element),
}

/// Result of resolving a drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropAction {
    Ignore(IgnoreReason),
    Apply { mutation: Mutation, select: SelectTarget },
}

impl DropAction {
    pub fn is_ignored(&self) -> bool {
        matches!(self, DropAction::Ignore(_))
    }
}

/// Resolve a drop of `payload` onto `target`
pub fn resolve_drop(doc: &Document, target: &DropTarget, payload: &DragPayload, ids: &mut IdGenerator) -> DropAction {
    let Some(kind) = payload.kind.clone() else {
        debug!("Ignoring drop without a type");
        return DropAction::Ignore(IgnoreReason::MissingType);
    };

    match target {
        DropTarget::CanvasRoot => resolve_root_drop(doc, kind, &payload.label, ids),

        DropTarget::Container {
            section_id,
            container_id,
        } => {
            let Some((region, section)) = doc.find_section(section_id) else {
                debug!(section_id = %section_id, "Ignoring drop on stale section");
                return DropAction::Ignore(IgnoreReason::UnknownSection(section_id.clone()));
            };

            if section.container(container_id).is_none() {
                debug!(section_id = %section_id, container_id = %container_id, "Ignoring drop on stale container");
                return DropAction::Ignore(IgnoreReason::UnknownContainer(container_id.clone()));
            }

            let element = new_element(kind, &payload.label, ids);
            debug!(
                region = %region,
                container_id = %container_id,
                element_id = %element.id,
                kind = %element.kind,
                "Dropping element into container"
            );

            DropAction::Apply {
                mutation: Mutation::AddElementToContainer {
                    section_id: section_id.clone(),
                    container_id: container_id.clone(),
                    element: element.clone(),
                },
                select: SelectTarget::Element(element),
            }
        }

        DropTarget::Section { section_id } => {
            let Some((region, section)) = doc.find_section(section_id) else {
                debug!(section_id = %section_id, "Ignoring drop on stale section");
                return DropAction::Ignore(IgnoreReason::UnknownSection(section_id.clone()));
            };

            if !region.accepts(&kind) {
                debug!(region = %region, kind = %kind, "Region rejects dropped type");
                return DropAction::Ignore(IgnoreReason::RegionRejects { region, kind });
            }

            if region.opens_container(&kind, section) {
                let container_id = ids.next_id("container");
                debug!(region = %region, section_id = %section_id, container_id = %container_id, "Creating container");

                return DropAction::Apply {
                    mutation: Mutation::AddContainer {
                        section_id: section_id.clone(),
                        container_id: container_id.clone(),
                    },
                    select: SelectTarget::Container { container_id },
                };
            }

            let element = new_element(kind, &payload.label, ids);
            debug!(
                region = %region,
                section_id = %section_id,
                element_id = %element.id,
                kind = %element.kind,
                "Dropping element onto section"
            );

            DropAction::Apply {
                mutation: Mutation::AddElementToSection {
                    section_id: section_id.clone(),
                    element: element.clone(),
                },
                select: SelectTarget::Element(element),
            }
        }
    }
}

/// Canvas-root drop: only effective while the middle region is empty, where
/// it creates section → container → element in one step
fn resolve_root_drop(doc: &Document, kind: ElementKind, label: &str, ids: &mut IdGenerator) -> DropAction {
    if !doc.sections(Region::Middle).is_empty() {
        debug!("Ignoring canvas-root drop: middle region already has sections");
        return DropAction::Ignore(IgnoreReason::CanvasNotEmpty);
    }

    let mut section = Section::new(ids.next_id("section"));
    let mut container = Container::new(ids.next_id("container"));

    let select = if kind.is_structural() {
        SelectTarget::Container {
            container_id: container.id.clone(),
        }
    } else {
        let element = new_element(kind, label, ids);
        container.elements.push(Arc::new(element.clone()));
        SelectTarget::Element(element)
    };

    debug!(section_id = %section.id, container_id = %container.id, "Auto-wrapping root drop");
    section.containers.push(Arc::new(container));

    DropAction::Apply {
        mutation: Mutation::WrapInSection {
            region: Region::Middle,
            section,
        },
        select,
    }
}

fn new_element(kind: ElementKind, label: &str, ids: &mut IdGenerator) -> Element {
    let id = ids.next_id(kind.as_str());
    instantiate(id, kind, label)
}
