//! # Selection
//!
//! Which section, container and element are currently active.
//!
//! Levels are cleared top-down: selecting a section clears the container and
//! element, selecting a container clears the element, selecting an element
//! leaves the section and container as they were.

use crate::element::Element;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    section_id: Option<String>,
    container_id: Option<String>,
    element_id: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section_id(&self) -> Option<&str> {
        self.section_id.as_deref()
    }

    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    pub fn element_id(&self) -> Option<&str> {
        self.element_id.as_deref()
    }

    pub fn select_section(&mut self, section_id: impl Into<String>) {
        self.section_id = Some(section_id.into());
        self.container_id = None;
        self.element_id = None;
    }

    pub fn select_container(&mut self, container_id: impl Into<String>) {
        self.container_id = Some(container_id.into());
        self.element_id = None;
    }

    pub fn select_element(&mut self, element_id: impl Into<String>) {
        self.element_id = Some(element_id.into());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.section_id.is_none() && self.container_id.is_none() && self.element_id.is_none()
    }

    /// Drop any level whose id no longer passes `exists`
    ///
    /// Returns true if anything was cleared.
    pub fn retain_existing(&mut self, exists: impl Fn(&str) -> bool) -> bool {
        let mut changed = false;
        for slot in [&mut self.section_id, &mut self.container_id, &mut self.element_id] {
            if slot.as_deref().is_some_and(|id| !exists(id)) {
                *slot = None;
                changed = true;
            }
        }
        changed
    }
}

/// Rendering-layer hook for the property panel
///
/// Called with the newly active element, or `None` when the panel should show
/// nothing.
pub trait SelectionListener {
    fn element_selected(&mut self, element: Option<&Element>);
}

impl<F> SelectionListener for F
where
    F: FnMut(Option<&Element>),
{
    fn element_selected(&mut self, element: Option<&Element>) {
        self(element)
    }
}
