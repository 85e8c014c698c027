//! # Document Mutations
//!
//! Semantic write operations on the canvas document.
//!
//! ## Design Principles
//!
//! 1. **Append-only**: nodes are created and edited, never moved or removed
//! 2. **Validated**: every mutation checks that its targets exist
//! 3. **Immutable**: `apply` returns a new `Document`; the input is untouched
//!
//! The underlying `Document` writes treat a missing target as a no-op.
//! `Mutation::apply` reports it instead, so callers can tell "nothing
//! happened" apart from "something changed" (history, logging).

use crate::document::{Document, Region, Section};
use crate::element::Element;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append an empty section to a region
    AddSection { region: Region, section_id: String },

    /// Append an empty container to a section
    AddContainer {
        section_id: String,
        container_id: String,
    },

    /// Append an element to a container
    AddElementToContainer {
        section_id: String,
        container_id: String,
        element: Element,
    },

    /// Append a direct element to a section
    AddElementToSection { section_id: String, element: Element },

    /// Replace an element in place (same id, same position)
    ReplaceElement { element_id: String, element: Element },

    /// Append a pre-built section to a region that is currently empty
    /// (canvas-root auto-wrap)
    WrapInSection { region: Region, section: Section },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Container not found: {container_id} (section {section_id})")]
    ContainerNotFound {
        section_id: String,
        container_id: String,
    },

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Region {0} already has sections")]
    RegionNotEmpty(Region),

    #[error("Replacement element id {found} does not match {expected}")]
    IdMismatch { expected: String, found: String },

    #[error("No element is selected")]
    NothingSelected,
}

impl Mutation {
    /// Apply mutation to a document with validation
    pub fn apply(&self, doc: &Document) -> Result<Document, MutationError> {
        self.validate(doc)?;

        let next = match self {
            Mutation::AddSection { region, section_id } => doc.add_section(*region, section_id.clone()),

            Mutation::AddContainer {
                section_id,
                container_id,
            } => doc.add_container_to_section(section_id, container_id.clone()),

            Mutation::AddElementToContainer {
                section_id,
                container_id,
                element,
            } => doc.add_element_to_container(section_id, container_id, element.clone()),

            Mutation::AddElementToSection { section_id, element } => {
                doc.add_element_to_section(section_id, element.clone())
            }

            Mutation::ReplaceElement { element_id, element } => {
                doc.replace_element(element_id, element.clone())
            }

            Mutation::WrapInSection { region, section } => doc.push_section(*region, section.clone()),
        };

        Ok(next)
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::AddSection { .. } => Ok(()),

            Mutation::AddContainer { section_id, .. } | Mutation::AddElementToSection { section_id, .. } => doc
                .find_section(section_id)
                .map(|_| ())
                .ok_or_else(|| MutationError::SectionNotFound(section_id.clone())),

            Mutation::AddElementToContainer {
                section_id,
                container_id,
                ..
            } => {
                let (_, section) = doc
                    .find_section(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;

                section
                    .container(container_id)
                    .map(|_| ())
                    .ok_or_else(|| MutationError::ContainerNotFound {
                        section_id: section_id.clone(),
                        container_id: container_id.clone(),
                    })
            }

            Mutation::ReplaceElement { element_id, element } => {
                if &element.id != element_id {
                    return Err(MutationError::IdMismatch {
                        expected: element_id.clone(),
                        found: element.id.clone(),
                    });
                }

                doc.locate_element(element_id)
                    .map(|_| ())
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))
            }

            Mutation::WrapInSection { region, .. } => {
                if doc.sections(*region).is_empty() {
                    Ok(())
                } else {
                    Err(MutationError::RegionNotEmpty(*region))
                }
            }
        }
    }

    /// Get a debug name for this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddSection { .. } => "add_section",
            Mutation::AddContainer { .. } => "add_container",
            Mutation::AddElementToContainer { .. } => "add_element_to_container",
            Mutation::AddElementToSection { .. } => "add_element_to_section",
            Mutation::ReplaceElement { .. } => "replace_element",
            Mutation::WrapInSection { .. } => "wrap_in_section",
        }
    }

    /// Id of the node this mutation creates or edits
    pub fn node_id(&self) -> &str {
        match self {
            Mutation::AddSection { section_id, .. } => section_id,
            Mutation::AddContainer { container_id, .. } => container_id,
            Mutation::AddElementToContainer { element, .. }
            | Mutation::AddElementToSection { element, .. }
            | Mutation::ReplaceElement { element, .. } => &element.id,
            Mutation::WrapInSection { section, .. } => &section.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::instantiate;
    use crate::element::ElementKind;

    fn doc() -> Document {
        Document::new()
            .add_section(Region::Middle, "s-1")
            .add_container_to_section("s-1", "c-1")
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::AddContainer {
            section_id: "s-1".to_string(),
            container_id: "c-9".to_string(),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let before = doc();
        let mutation = Mutation::AddElementToContainer {
            section_id: "s-1".to_string(),
            container_id: "c-1".to_string(),
            element: instantiate("text-1", ElementKind::Text, "Text"),
        };

        let after = mutation.apply(&before).unwrap();

        assert!(before.middle[0].containers[0].elements.is_empty());
        assert_eq!(after.middle[0].containers[0].elements.len(), 1);
    }

    #[test]
    fn test_validation_reports_missing_targets() {
        let doc = doc();

        let missing_section = Mutation::AddContainer {
            section_id: "nope".to_string(),
            container_id: "c-2".to_string(),
        };
        assert_eq!(
            missing_section.apply(&doc),
            Err(MutationError::SectionNotFound("nope".to_string()))
        );

        let missing_container = Mutation::AddElementToContainer {
            section_id: "s-1".to_string(),
            container_id: "nope".to_string(),
            element: instantiate("text-1", ElementKind::Text, "Text"),
        };
        assert!(matches!(
            missing_container.validate(&doc),
            Err(MutationError::ContainerNotFound { .. })
        ));

        let missing_element = Mutation::ReplaceElement {
            element_id: "text-1".to_string(),
            element: instantiate("text-1", ElementKind::Text, "Text"),
        };
        assert_eq!(
            missing_element.validate(&doc),
            Err(MutationError::ElementNotFound("text-1".to_string()))
        );
    }

    #[test]
    fn test_replace_requires_matching_id() {
        let doc = doc().add_element_to_section("s-1", instantiate("text-1", ElementKind::Text, "Text"));

        let mutation = Mutation::ReplaceElement {
            element_id: "text-1".to_string(),
            element: instantiate("text-2", ElementKind::Text, "Text"),
        };

        assert!(matches!(mutation.validate(&doc), Err(MutationError::IdMismatch { .. })));
    }

    #[test]
    fn test_wrap_requires_empty_region() {
        let mutation = Mutation::WrapInSection {
            region: Region::Middle,
            section: Section::new("s-2"),
        };

        assert_eq!(mutation.validate(&doc()), Err(MutationError::RegionNotEmpty(Region::Middle)));
        assert!(mutation.apply(&Document::new()).is_ok());
    }

    #[test]
    fn test_node_id() {
        let mutation = Mutation::AddSection {
            region: Region::Top,
            section_id: "s-top".to_string(),
        };
        assert_eq!(mutation.node_id(), "s-top");
        assert_eq!(mutation.name(), "add_section");
    }
}
