//! # Canvas Elements
//!
//! Leaf content nodes placed on the canvas, plus the partial-update patches
//! produced by the property panel.
//!
//! An element's `type` is fixed at creation. Its `content` and `styles`
//! payloads start out as the defaults for that type and are only ever changed
//! through [`ElementPatch`] merges.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Type-specific content payload (free-form JSON object)
pub type Content = Map<String, Value>;

/// CSS-like property name → value
pub type Styles = BTreeMap<String, String>;

/// Element type tag
///
/// Serialized as the bare tag string (`"text"`, `"navbar"`, ...). Tags that are
/// not part of the built-in vocabulary (premade components like `"hero"`)
/// round-trip through [`ElementKind::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Text,
    Button,
    Link,
    Image,
    Icon,
    Card,
    Form,
    Navbar,
    Footer,
    /// Structural tag: creates a container when dropped on a section
    Container,
    /// Structural tag: behaves like `Container` on drop
    Section,
    Custom(String),
}

impl ElementKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "text" => ElementKind::Text,
            "button" => ElementKind::Button,
            "link" => ElementKind::Link,
            "image" => ElementKind::Image,
            "icon" => ElementKind::Icon,
            "card" => ElementKind::Card,
            "form" => ElementKind::Form,
            "navbar" => ElementKind::Navbar,
            "footer" => ElementKind::Footer,
            "container" => ElementKind::Container,
            "section" => ElementKind::Section,
            other => ElementKind::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Button => "button",
            ElementKind::Link => "link",
            ElementKind::Image => "image",
            ElementKind::Icon => "icon",
            ElementKind::Card => "card",
            ElementKind::Form => "form",
            ElementKind::Navbar => "navbar",
            ElementKind::Footer => "footer",
            ElementKind::Container => "container",
            ElementKind::Section => "section",
            ElementKind::Custom(tag) => tag,
        }
    }

    /// Whether a drop of this kind on a section creates a container
    /// rather than an element
    pub fn is_structural(&self) -> bool {
        matches!(self, ElementKind::Container | ElementKind::Section)
    }
}

impl From<String> for ElementKind {
    fn from(tag: String) -> Self {
        ElementKind::parse(&tag)
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Custom(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf node of the canvas document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ElementKind,

    /// Display name shown in the properties panel
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub content: Content,

    #[serde(default)]
    pub styles: Styles,
}

impl Element {
    /// Produce a merged copy of this element
    ///
    /// `content` and `styles` are merged key by key; keys absent from the
    /// patch keep their current values. `label` is replaced when present.
    pub fn merged(&self, patch: &ElementPatch) -> Element {
        let mut next = self.clone();

        if let Some(label) = &patch.label {
            next.label = label.clone();
        }

        if let Some(content) = &patch.content {
            for (key, value) in content {
                next.content.insert(key.clone(), value.clone());
            }
        }

        if let Some(styles) = &patch.styles {
            for (key, value) in styles {
                next.styles.insert(key.clone(), value.clone());
            }
        }

        next
    }

    /// Convenience accessor for string content fields
    pub fn content_str(&self, key: &str) -> Option<&str> {
        self.content.get(key).and_then(Value::as_str)
    }
}

/// Partial update for an element
///
/// `id` and `type` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set a single content field
    pub fn with_content(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.content
            .get_or_insert_with(Content::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set a single style property
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles
            .get_or_insert_with(Styles::new)
            .insert(property.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.content.as_ref().map_or(true, |content| content.is_empty())
            && self.styles.as_ref().map_or(true, |styles| styles.is_empty())
    }
}
