//! # Palette
//!
//! Draggable items offered by the editor sidebar: the element library and the
//! premade component library.

use crate::drop_target::{
    DragPayload, COMPONENT_LABEL_KEY, COMPONENT_TYPE_KEY, ELEMENT_LABEL_KEY, ELEMENT_TYPE_KEY,
};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Basic,
    Structure,
    Media,
    Interactive,
}

impl Category {
    /// Display order in the sidebar
    pub const ALL: [Category; 4] = [Category::Basic, Category::Structure, Category::Media, Category::Interactive];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Basic => "Basic",
            Category::Structure => "Structure",
            Category::Media => "Media",
            Category::Interactive => "Interactive",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which library an item comes from; decides the drag-data keys it writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Element,
    Component,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteItem {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub source: Source,
}

impl PaletteItem {
    const fn element(id: &'static str, label: &'static str, category: Category) -> Self {
        Self {
            id,
            kind: id,
            label,
            category: Some(category),
            description: None,
            source: Source::Element,
        }
    }

    const fn component(id: &'static str, kind: &'static str, label: &'static str, description: &'static str) -> Self {
        Self {
            id,
            kind,
            label,
            category: None,
            description: Some(description),
            source: Source::Component,
        }
    }

    pub fn drag_payload(&self) -> DragPayload {
        DragPayload::new(self.kind, self.label)
    }

    /// Key/value pairs stashed at drag start
    pub fn drag_data(&self) -> HashMap<String, String> {
        let (type_key, label_key) = match self.source {
            Source::Element => (ELEMENT_TYPE_KEY, ELEMENT_LABEL_KEY),
            Source::Component => (COMPONENT_TYPE_KEY, COMPONENT_LABEL_KEY),
        };

        HashMap::from([
            (type_key.to_string(), self.kind.to_string()),
            (label_key.to_string(), self.label.to_string()),
        ])
    }
}

static ELEMENTS: [PaletteItem; 11] = [
    PaletteItem::element("text", "Text", Category::Basic),
    PaletteItem::element("button", "Button", Category::Basic),
    PaletteItem::element("link", "Link", Category::Basic),
    PaletteItem::element("image", "Image", Category::Media),
    PaletteItem::element("icon", "Icon", Category::Media),
    PaletteItem::element("container", "Container", Category::Structure),
    PaletteItem::element("section", "Section", Category::Structure),
    PaletteItem::element("card", "Card", Category::Interactive),
    PaletteItem::element("form", "Form", Category::Interactive),
    PaletteItem::element("navbar", "Navbar", Category::Structure),
    PaletteItem::element("footer", "Footer", Category::Structure),
];

static COMPONENTS: [PaletteItem; 7] = [
    PaletteItem::component("hero", "hero", "Hero Section", "Title + subtitle + CTA"),
    PaletteItem::component("navbar-comp", "navbar-component", "Navigation Bar", "Responsive navbar"),
    PaletteItem::component("features", "features", "Feature Cards", "Grid of feature cards"),
    PaletteItem::component("testimonials", "testimonials", "Testimonial Slider", "Customer testimonials"),
    PaletteItem::component("footer-comp", "footer-component", "Footer", "Multi-column footer"),
    PaletteItem::component("cta", "cta", "Call-to-Action", "Bold CTA section"),
    PaletteItem::component("content-grid", "content-grid", "Content Grid", "Dynamic content grid"),
];

pub fn element_library() -> &'static [PaletteItem] {
    &ELEMENTS
}

pub fn component_library() -> &'static [PaletteItem] {
    &COMPONENTS
}

/// Element library items in `category`, in library order
pub fn elements_in(category: Category) -> impl Iterator<Item = &'static PaletteItem> {
    ELEMENTS.iter().filter(move |item| item.category == Some(category))
}

/// Look up an item in either library by its id
pub fn find_item(id: &str) -> Option<&'static PaletteItem> {
    ELEMENTS.iter().chain(COMPONENTS.iter()).find(|item| item.id == id)
}
