//! # Canvas Document
//!
//! The page being built: three regions of sections, each section holding
//! containers and direct elements.
//!
//! ```text
//! Document
//!  ├─ top     [Section]      navbar landing zone
//!  ├─ middle  [Section]      free-form content
//!  └─ bottom  [Section]      footer landing zone
//!
//! Section
//!  ├─ containers      [Container → [Element]]
//!  └─ directElements  [Element]
//! ```
//!
//! ## Structural sharing
//!
//! Every write returns a new `Document`. Nodes are held behind `Arc`, so an
//! update only re-allocates the path from the region down to the changed node;
//! untouched sections, containers and elements are shared with the previous
//! snapshot. Holders of an older snapshot never observe a change, and
//! `Arc::ptr_eq` can be used to detect which subtrees changed.
//!
//! Writes that reference a missing section/container/element are no-ops and
//! return an unchanged copy.

use crate::element::{Element, ElementKind};
use crate::errors::EditorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Vertical zone of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Top,
    Middle,
    Bottom,
}

impl Region {
    /// Scan order for id lookups
    pub const ALL: [Region; 3] = [Region::Top, Region::Middle, Region::Bottom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Top => "top",
            Region::Middle => "middle",
            Region::Bottom => "bottom",
        }
    }

    /// Whether a payload of `kind` may be dropped on the background of a
    /// section in this region
    ///
    /// Drops inside a container are not gated by region.
    pub fn accepts(&self, kind: &ElementKind) -> bool {
        match self {
            Region::Middle => true,
            Region::Top => match kind {
                ElementKind::Navbar | ElementKind::Container | ElementKind::Section => true,
                ElementKind::Text
                | ElementKind::Button
                | ElementKind::Link
                | ElementKind::Image
                | ElementKind::Icon
                | ElementKind::Card
                | ElementKind::Form
                | ElementKind::Footer
                | ElementKind::Custom(_) => false,
            },
            Region::Bottom => match kind {
                ElementKind::Footer | ElementKind::Container | ElementKind::Section => true,
                ElementKind::Text
                | ElementKind::Button
                | ElementKind::Link
                | ElementKind::Image
                | ElementKind::Icon
                | ElementKind::Card
                | ElementKind::Form
                | ElementKind::Navbar
                | ElementKind::Custom(_) => false,
            },
        }
    }

    /// Whether an accepted section-background drop of `kind` opens a new
    /// empty container instead of placing a direct element
    ///
    /// Top and bottom are landing zones: the first drop on a section with no
    /// containers reserves one. Once a container exists, navbar and footer
    /// drops land as direct elements.
    pub fn opens_container(&self, kind: &ElementKind, section: &Section) -> bool {
        if kind.is_structural() {
            return true;
        }

        match self {
            Region::Top | Region::Bottom => section.containers.is_empty(),
            Region::Middle => false,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Region::Top),
            "middle" => Ok(Region::Middle),
            "bottom" => Ok(Region::Bottom),
            other => Err(EditorError::UnknownRegion(other.to_string())),
        }
    }
}

/// Grouping box inside a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,

    #[serde(default)]
    pub elements: Vec<Arc<Element>>,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            elements: Vec::new(),
        }
    }
}

/// Page-width block owned by a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,

    #[serde(default)]
    pub containers: Vec<Arc<Container>>,

    /// Elements placed on the section background, outside any container
    #[serde(default)]
    pub direct_elements: Vec<Arc<Element>>,
}

impl Section {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            containers: Vec::new(),
            direct_elements: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.direct_elements.is_empty()
    }

    pub fn container(&self, container_id: &str) -> Option<&Container> {
        self.containers
            .iter()
            .find(|c| c.id == container_id)
            .map(|c| c.as_ref())
    }
}

/// Where an element lives inside the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLocation {
    pub region: Region,
    pub section_index: usize,
    pub slot: ElementSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementSlot {
    InContainer {
        container_index: usize,
        element_index: usize,
    },
    Direct {
        element_index: usize,
    },
}

/// Canvas document, the literal shape persisted as `canvas_data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub top: Vec<Arc<Section>>,

    #[serde(default)]
    pub middle: Vec<Arc<Section>>,

    #[serde(default)]
    pub bottom: Vec<Arc<Section>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, EditorError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, EditorError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn sections(&self, region: Region) -> &[Arc<Section>] {
        match region {
            Region::Top => &self.top,
            Region::Middle => &self.middle,
            Region::Bottom => &self.bottom,
        }
    }

    fn sections_mut(&mut self, region: Region) -> &mut Vec<Arc<Section>> {
        match region {
            Region::Top => &mut self.top,
            Region::Middle => &mut self.middle,
            Region::Bottom => &mut self.bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        Region::ALL.iter().all(|r| self.sections(*r).is_empty())
    }

    // ---- Reads ----

    /// Region that owns `section_id`, scanning top → middle → bottom
    pub fn region_of(&self, section_id: &str) -> Option<Region> {
        Region::ALL
            .into_iter()
            .find(|region| self.sections(*region).iter().any(|s| s.id == section_id))
    }

    pub fn find_section(&self, section_id: &str) -> Option<(Region, &Section)> {
        Region::ALL.into_iter().find_map(|region| {
            self.sections(region)
                .iter()
                .find(|s| s.id == section_id)
                .map(|s| (region, s.as_ref()))
        })
    }

    pub fn find_container(&self, section_id: &str, container_id: &str) -> Option<&Container> {
        self.find_section(section_id)
            .and_then(|(_, section)| section.container(container_id))
    }

    /// Locate the first element with `element_id`
    ///
    /// Within a section, container elements are scanned before direct
    /// elements.
    pub fn locate_element(&self, element_id: &str) -> Option<ElementLocation> {
        for region in Region::ALL {
            for (section_index, section) in self.sections(region).iter().enumerate() {
                for (container_index, container) in section.containers.iter().enumerate() {
                    if let Some(element_index) =
                        container.elements.iter().position(|e| e.id == element_id)
                    {
                        return Some(ElementLocation {
                            region,
                            section_index,
                            slot: ElementSlot::InContainer {
                                container_index,
                                element_index,
                            },
                        });
                    }
                }

                if let Some(element_index) =
                    section.direct_elements.iter().position(|e| e.id == element_id)
                {
                    return Some(ElementLocation {
                        region,
                        section_index,
                        slot: ElementSlot::Direct { element_index },
                    });
                }
            }
        }

        None
    }

    pub fn find_element(&self, element_id: &str) -> Option<&Element> {
        let location = self.locate_element(element_id)?;
        let section = &self.sections(location.region)[location.section_index];

        let element = match location.slot {
            ElementSlot::InContainer {
                container_index,
                element_index,
            } => &section.containers[container_index].elements[element_index],
            ElementSlot::Direct { element_index } => &section.direct_elements[element_index],
        };

        Some(element.as_ref())
    }

    /// Whether any section, container or element carries `id`
    pub fn contains_id(&self, id: &str) -> bool {
        self.find_section(id).is_some()
            || self.find_container_anywhere(id).is_some()
            || self.locate_element(id).is_some()
    }

    pub fn find_container_anywhere(&self, container_id: &str) -> Option<&Container> {
        Region::ALL.into_iter().find_map(|region| {
            self.sections(region)
                .iter()
                .find_map(|s| s.container(container_id))
        })
    }

    /// Every id in document order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for region in Region::ALL {
            for section in self.sections(region) {
                ids.push(section.id.as_str());
                for container in &section.containers {
                    ids.push(container.id.as_str());
                    ids.extend(container.elements.iter().map(|e| e.id.as_str()));
                }
                ids.extend(section.direct_elements.iter().map(|e| e.id.as_str()));
            }
        }
        ids
    }

    // ---- Writes ----

    /// Append an already-built section to `region`
    pub fn push_section(&self, region: Region, section: Section) -> Document {
        let mut next = self.clone();
        next.sections_mut(region).push(Arc::new(section));
        next
    }

    /// Append a new empty section to `region`
    pub fn add_section(&self, region: Region, section_id: impl Into<String>) -> Document {
        self.push_section(region, Section::new(section_id))
    }

    /// Append an empty container to a section (no-op if the section is missing)
    pub fn add_container_to_section(&self, section_id: &str, container_id: impl Into<String>) -> Document {
        let container = Arc::new(Container::new(container_id));

        self.update_section(section_id, |section| {
            let mut next = section.clone();
            next.containers.push(container);
            Some(next)
        })
        .unwrap_or_else(|| self.clone())
    }

    /// Append an element to a container (no-op if either is missing)
    pub fn add_element_to_container(&self, section_id: &str, container_id: &str, element: Element) -> Document {
        self.update_section(section_id, |section| {
            let index = section.containers.iter().position(|c| c.id == container_id)?;
            let mut container = section.containers[index].as_ref().clone();
            container.elements.push(Arc::new(element));

            let mut next = section.clone();
            next.containers[index] = Arc::new(container);
            Some(next)
        })
        .unwrap_or_else(|| self.clone())
    }

    /// Append a direct element to a section (no-op if the section is missing)
    pub fn add_element_to_section(&self, section_id: &str, element: Element) -> Document {
        self.update_section(section_id, |section| {
            let mut next = section.clone();
            next.direct_elements.push(Arc::new(element));
            Some(next)
        })
        .unwrap_or_else(|| self.clone())
    }

    /// Replace the first element with `element_id`, keeping its position
    /// (no-op if not found)
    pub fn replace_element(&self, element_id: &str, updated: Element) -> Document {
        let Some(location) = self.locate_element(element_id) else {
            return self.clone();
        };

        let mut next = self.clone();
        let sections = next.sections_mut(location.region);
        let mut section = sections[location.section_index].as_ref().clone();

        match location.slot {
            ElementSlot::InContainer {
                container_index,
                element_index,
            } => {
                let mut container = section.containers[container_index].as_ref().clone();
                container.elements[element_index] = Arc::new(updated);
                section.containers[container_index] = Arc::new(container);
            }
            ElementSlot::Direct { element_index } => {
                section.direct_elements[element_index] = Arc::new(updated);
            }
        }

        sections[location.section_index] = Arc::new(section);
        next
    }

    /// Rebuild the section `section_id` via `f`, sharing every other node
    fn update_section<F>(&self, section_id: &str, f: F) -> Option<Document>
    where
        F: FnOnce(&Section) -> Option<Section>,
    {
        let region = self.region_of(section_id)?;
        let index = self.sections(region).iter().position(|s| s.id == section_id)?;
        let updated = f(self.sections(region)[index].as_ref())?;

        let mut next = self.clone();
        next.sections_mut(region)[index] = Arc::new(updated);
        Some(next)
    }
}
