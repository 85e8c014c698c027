//! # Default Content
//!
//! Initial `content`/`styles` payloads for newly created elements.
//!
//! Consulted exactly once, when an element is instantiated from a drop.
//! Existing elements are never re-defaulted; that would clobber user edits.

use crate::element::{Content, Element, ElementKind, Styles};
use serde_json::{json, Value};

/// Initial payload for a new element
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultPayload {
    pub content: Content,
    pub styles: Styles,
}

pub fn default_payload(kind: &ElementKind) -> DefaultPayload {
    DefaultPayload {
        content: default_content(kind),
        styles: default_styles(kind),
    }
}

/// Build a new element of `kind` with its default payload
pub fn instantiate(id: impl Into<String>, kind: ElementKind, label: impl Into<String>) -> Element {
    let DefaultPayload { content, styles } = default_payload(&kind);

    Element {
        id: id.into(),
        kind,
        label: label.into(),
        content,
        styles,
    }
}

pub fn default_content(kind: &ElementKind) -> Content {
    let value = match kind {
        ElementKind::Text => json!({ "text": "Edit me - Double click to change" }),
        ElementKind::Button => json!({ "text": "Click Me", "link": "#" }),
        ElementKind::Link => json!({ "text": "Click here", "href": "#" }),
        ElementKind::Image => json!({ "src": "", "alt": "Image placeholder" }),
        ElementKind::Icon => json!({ "name": "star" }),
        ElementKind::Card => json!({
            "title": "Card Title",
            "text": "Card description goes here",
            "buttonText": "Learn More",
        }),
        ElementKind::Form => json!({
            "fields": ["Name", "Email"],
            "submitText": "Submit",
        }),
        ElementKind::Navbar => json!({
            "logo": { "type": "text", "value": "Webara" },
            "links": [
                { "text": "Features", "url": "#features" },
                { "text": "Pricing", "url": "#pricing" },
                { "text": "Templates", "url": "#templates" },
                { "text": "Docs", "url": "#docs" },
            ],
            "buttons": [
                { "text": "Login", "url": "#login", "style": "outline" },
                { "text": "Get Started", "url": "#signup", "style": "primary" },
            ],
        }),
        ElementKind::Footer => json!({
            "tagline": "Build beautiful websites without code. Fast, intuitive, and powerful.",
            "columns": [
                {
                    "title": "Product",
                    "links": [
                        { "text": "Features", "url": "#features" },
                        { "text": "Pricing", "url": "#pricing" },
                        { "text": "Templates", "url": "#templates" },
                    ],
                },
                {
                    "title": "Resources",
                    "links": [
                        { "text": "Documentation", "url": "#docs" },
                        { "text": "Blog", "url": "#blog" },
                        { "text": "Support", "url": "#support" },
                    ],
                },
                {
                    "title": "Company",
                    "links": [
                        { "text": "About", "url": "#about" },
                        { "text": "Contact", "url": "#contact" },
                        { "text": "Privacy", "url": "#privacy" },
                    ],
                },
            ],
            "copyright": "© 2025 Webara. All rights reserved.",
        }),
        ElementKind::Container | ElementKind::Section | ElementKind::Custom(_) => Value::Null,
    };

    match value {
        Value::Object(map) => map,
        _ => Content::new(),
    }
}

pub fn default_styles(kind: &ElementKind) -> Styles {
    let pairs: &[(&str, &str)] = match kind {
        ElementKind::Text => &[
            ("fontSize", "16px"),
            ("color", "hsl(var(--foreground))"),
            ("fontWeight", "normal"),
        ],
        ElementKind::Button => &[
            ("backgroundColor", "#2563eb"),
            ("color", "#ffffff"),
            ("padding", "12px 24px"),
            ("borderRadius", "8px"),
            ("fontSize", "14px"),
            ("fontWeight", "600"),
            ("border", "none"),
            ("cursor", "pointer"),
        ],
        ElementKind::Link => &[
            ("color", "#2563eb"),
            ("textDecoration", "underline"),
            ("fontSize", "14px"),
        ],
        ElementKind::Image => &[
            ("width", "100%"),
            ("maxWidth", "400px"),
            ("height", "auto"),
            ("backgroundColor", "hsl(var(--muted))"),
        ],
        ElementKind::Card => &[
            ("padding", "24px"),
            ("backgroundColor", "hsl(var(--card))"),
            ("border", "1px solid hsl(var(--border))"),
            ("borderRadius", "12px"),
            ("boxShadow", "0 1px 3px rgba(0,0,0,0.1)"),
        ],
        ElementKind::Navbar => &[
            ("display", "flex"),
            ("justifyContent", "space-between"),
            ("alignItems", "center"),
            ("padding", "16px 24px"),
            ("backgroundColor", "hsl(var(--background))"),
            ("borderBottom", "1px solid hsl(var(--border))"),
        ],
        ElementKind::Footer => &[
            ("padding", "48px 24px"),
            ("backgroundColor", "hsl(var(--muted))"),
            ("color", "hsl(var(--muted-foreground))"),
            ("fontSize", "14px"),
        ],
        ElementKind::Icon
        | ElementKind::Form
        | ElementKind::Container
        | ElementKind::Section
        | ElementKind::Custom(_) => &[],
    };

    pairs
        .iter()
        .map(|(property, value)| (property.to_string(), value.to_string()))
        .collect()
}
