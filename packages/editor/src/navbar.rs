//! # Navbar Sub-Editor
//!
//! Builds content patches for the nested parts of a navbar element: the logo,
//! the ordered link list and the ordered button list.
//!
//! Each operation rewrites one whole content field (`logo`, `links` or
//! `buttons`) and returns it as an [`ElementPatch`]. The patch goes through
//! `EditSession::update_element` like any other edit, so it shallow-merges
//! and leaves the other content fields alone.

use crate::element::{Element, ElementPatch};
use serde_json::{json, Value};

const LOGO: &str = "logo";
const LINKS: &str = "links";
const BUTTONS: &str = "buttons";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoKind {
    Text,
    Image,
}

impl LogoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoKind::Text => "text",
            LogoKind::Image => "image",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Text,
    Url,
}

impl LinkField {
    fn key(&self) -> &'static str {
        match self {
            LinkField::Text => "text",
            LinkField::Url => "url",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonField {
    Text,
    Url,
    Style,
}

impl ButtonField {
    fn key(&self) -> &'static str {
        match self {
            ButtonField::Text => "text",
            ButtonField::Url => "url",
            ButtonField::Style => "style",
        }
    }
}

/// Patch builder over a navbar element's current content
pub struct NavbarEditor<'a> {
    element: &'a Element,
}

impl<'a> NavbarEditor<'a> {
    pub fn new(element: &'a Element) -> Self {
        Self { element }
    }

    /// Current logo as `(type, value)`, defaulting to a text logo
    pub fn logo(&self) -> (LogoKind, &str) {
        let logo = self.element.content.get(LOGO);
        let kind = match logo.and_then(|l| l.get("type")).and_then(Value::as_str) {
            Some("image") => LogoKind::Image,
            _ => LogoKind::Text,
        };
        let value = logo.and_then(|l| l.get("value")).and_then(Value::as_str).unwrap_or("");
        (kind, value)
    }

    pub fn links(&self) -> Vec<Value> {
        self.list(LINKS)
    }

    pub fn buttons(&self) -> Vec<Value> {
        self.list(BUTTONS)
    }

    pub fn set_logo(&self, kind: LogoKind, value: impl Into<String>) -> ElementPatch {
        ElementPatch::new().with_content(LOGO, json!({ "type": kind.as_str(), "value": value.into() }))
    }

    pub fn add_link(&self) -> ElementPatch {
        let mut links = self.links();
        links.push(json!({ "text": "New Link", "url": "#" }));
        ElementPatch::new().with_content(LINKS, links)
    }

    pub fn remove_link(&self, index: usize) -> Option<ElementPatch> {
        remove_at(self.links(), index).map(|links| ElementPatch::new().with_content(LINKS, links))
    }

    pub fn update_link(&self, index: usize, field: LinkField, value: impl Into<String>) -> Option<ElementPatch> {
        set_field(self.links(), index, field.key(), value.into())
            .map(|links| ElementPatch::new().with_content(LINKS, links))
    }

    pub fn add_button(&self) -> ElementPatch {
        let mut buttons = self.buttons();
        buttons.push(json!({ "text": "Button", "url": "#", "style": "primary" }));
        ElementPatch::new().with_content(BUTTONS, buttons)
    }

    pub fn remove_button(&self, index: usize) -> Option<ElementPatch> {
        remove_at(self.buttons(), index).map(|buttons| ElementPatch::new().with_content(BUTTONS, buttons))
    }

    pub fn update_button(&self, index: usize, field: ButtonField, value: impl Into<String>) -> Option<ElementPatch> {
        set_field(self.buttons(), index, field.key(), value.into())
            .map(|buttons| ElementPatch::new().with_content(BUTTONS, buttons))
    }

    fn list(&self, key: &str) -> Vec<Value> {
        self.element
            .content
            .get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }
}

fn remove_at(mut items: Vec<Value>, index: usize) -> Option<Vec<Value>> {
    if index >= items.len() {
        return None;
    }
    items.remove(index);
    Some(items)
}

fn set_field(mut items: Vec<Value>, index: usize, key: &str, value: String) -> Option<Vec<Value>> {
    let item = items.get_mut(index)?;
    match item {
        Value::Object(fields) => {
            fields.insert(key.to_string(), Value::String(value));
        }
        other => {
            let mut fields = serde_json::Map::new();
            fields.insert(key.to_string(), Value::String(value));
            *other = Value::Object(fields);
        }
    }
    Some(items)
}
