//! Drop resolution scenarios driven through an edit session

use serde_json::json;
use webara_editor::{
    defaults, Document, DragPayload, DropOutcome, DropTarget, EditSession, ElementKind, IdGenerator, IgnoreReason,
    Region,
};

fn session_with(doc: Document) -> EditSession {
    EditSession::new(doc, IdGenerator::with_seed("test"))
}

fn created(outcome: DropOutcome) -> String {
    match outcome {
        DropOutcome::Created { node_id } => node_id,
        DropOutcome::Ignored(reason) => panic!("drop was ignored: {}", reason),
    }
}

#[test]
fn test_text_on_top_section_is_noop() {
    let doc = Document::new().add_section(Region::Top, "top-1");
    let mut session = session_with(doc.clone());

    let outcome = session.handle_drop(&DropTarget::section("top-1"), &DragPayload::new("text", "Text"));

    assert_eq!(
        outcome,
        DropOutcome::Ignored(IgnoreReason::RegionRejects {
            region: Region::Top,
            kind: ElementKind::Text,
        })
    );
    assert_eq!(session.document(), &doc);
    assert_eq!(session.version(), 0);
    assert!(!session.can_undo());
}

#[test]
fn test_footer_lands_in_bottom_container() {
    let doc = Document::new()
        .add_section(Region::Top, "top-1")
        .add_section(Region::Bottom, "bottom-1");
    let mut session = session_with(doc);

    let footer = DragPayload::new("footer", "Footer");
    assert!(matches!(
        session.handle_drop(&DropTarget::section("top-1"), &footer),
        DropOutcome::Ignored(IgnoreReason::RegionRejects { .. })
    ));

    let container_id = created(session.handle_drop(&DropTarget::section("bottom-1"), &footer));
    let id = created(session.handle_drop(&DropTarget::container("bottom-1", &container_id), &footer));

    let bottom = &session.document().bottom[0];
    assert!(bottom.direct_elements.is_empty());
    assert_eq!(bottom.containers[0].elements[0].id, id);
    assert_eq!(bottom.containers[0].elements[0].kind, ElementKind::Footer);
}

#[test]
fn test_middle_section_takes_direct_elements() {
    let doc = Document::new().add_section(Region::Middle, "mid-1");
    let mut session = session_with(doc);

    let id = created(session.handle_drop(&DropTarget::section("mid-1"), &DragPayload::new("navbar", "Navbar")));

    let middle = &session.document().middle[0];
    assert!(middle.containers.is_empty());
    assert_eq!(middle.direct_elements[0].id, id);
    assert_eq!(session.active_element().map(|e| e.kind.clone()), Some(ElementKind::Navbar));
}

#[test]
fn test_navbar_on_top_section_creates_selected_container() {
    let doc = Document::new().add_section(Region::Top, "top-1");
    let mut session = session_with(doc);

    let container_id = created(session.handle_drop(&DropTarget::section("top-1"), &DragPayload::new("navbar", "Navbar")));

    let top = &session.document().top[0];
    assert_eq!(top.containers.len(), 1);
    assert_eq!(top.containers[0].id, container_id);
    assert!(top.containers[0].elements.is_empty());
    assert!(top.direct_elements.is_empty());

    assert_eq!(session.selection().container_id(), Some(container_id.as_str()));
    assert!(session.selection().element_id().is_none());
    assert!(session.active_element().is_none());
}

#[test]
fn test_navbar_on_top_section_with_container_becomes_direct_element() {
    let doc = Document::new()
        .add_section(Region::Top, "top-1")
        .add_container_to_section("top-1", "c0");
    let mut session = session_with(doc);

    let id = created(session.handle_drop(&DropTarget::section("top-1"), &DragPayload::new("navbar", "Navbar")));

    let top = &session.document().top[0];
    assert_eq!(top.containers.len(), 1);
    assert_eq!(top.direct_elements.len(), 1);
    assert_eq!(top.direct_elements[0].id, id);
    assert_eq!(top.direct_elements[0].kind, ElementKind::Navbar);

    assert_eq!(session.selection().element_id(), Some(id.as_str()));
    assert_eq!(session.active_element().map(|e| e.kind.clone()), Some(ElementKind::Navbar));
}

#[test]
fn test_footer_on_occupied_bottom_section_is_editable_in_place() {
    let doc = Document::new()
        .add_section(Region::Bottom, "bottom-1")
        .add_container_to_section("bottom-1", "c0");
    let mut session = session_with(doc);

    let id = created(session.handle_drop(&DropTarget::section("bottom-1"), &DragPayload::new("footer", "Footer")));
    assert!(session.update_element(&webara_editor::ElementPatch::new().with_label("Site footer")));

    let bottom = &session.document().bottom[0];
    assert_eq!(bottom.direct_elements[0].id, id);
    assert_eq!(bottom.direct_elements[0].label, "Site footer");
}

#[test]
fn test_button_into_container_gets_defaults_and_selection() {
    let doc = Document::new()
        .add_section(Region::Middle, "s-1")
        .add_container_to_section("s-1", "c-1");
    let mut session = session_with(doc);

    let id = created(session.handle_drop(
        &DropTarget::container("s-1", "c-1"),
        &DragPayload::new("button", "Click Me"),
    ));

    let elements = &session.document().middle[0].containers[0].elements;
    assert_eq!(elements.len(), 1);

    let button = &elements[0];
    assert_eq!(button.id, id);
    assert_eq!(button.kind, ElementKind::Button);
    assert_eq!(button.label, "Click Me");
    assert_eq!(serde_json::Value::Object(button.content.clone()), json!({ "text": "Click Me", "link": "#" }));
    assert_eq!(button.styles, defaults::default_styles(&ElementKind::Button));

    assert_eq!(session.selection().element_id(), Some(id.as_str()));
    assert_eq!(session.active_element(), Some(button.as_ref()));
}

#[test]
fn test_root_drop_auto_wraps_into_empty_middle() {
    let mut session = session_with(Document::new());

    let id = created(session.handle_drop(&DropTarget::CanvasRoot, &DragPayload::new("text", "Text")));

    let middle = &session.document().middle;
    assert_eq!(middle.len(), 1);
    assert!(middle[0].direct_elements.is_empty());
    assert_eq!(middle[0].containers.len(), 1);

    let elements = &middle[0].containers[0].elements;
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].id, id);
    assert_eq!(elements[0].kind, ElementKind::Text);
    assert_eq!(elements[0].content_str("text"), Some("Edit me - Double click to change"));

    let selection = session.selection();
    assert_eq!(selection.section_id(), Some(middle[0].id.as_str()));
    assert_eq!(selection.container_id(), Some(middle[0].containers[0].id.as_str()));
    assert_eq!(selection.element_id(), Some(id.as_str()));

    // Serialized shape matches the persisted canvas layout
    let value = session.document().to_value().unwrap();
    assert_eq!(value["middle"][0]["directElements"], json!([]));
    assert_eq!(value["middle"][0]["containers"][0]["elements"][0]["type"], "text");
}

#[test]
fn test_root_drop_ignored_once_middle_has_content() {
    let doc = Document::new().add_section(Region::Middle, "s-1");
    let mut session = session_with(doc.clone());

    let outcome = session.handle_drop(&DropTarget::CanvasRoot, &DragPayload::new("text", "Text"));

    assert_eq!(outcome, DropOutcome::Ignored(IgnoreReason::CanvasNotEmpty));
    assert_eq!(session.document(), &doc);
}

#[test]
fn test_stale_targets_are_ignored() {
    let doc = Document::new()
        .add_section(Region::Middle, "s-1")
        .add_container_to_section("s-1", "c-1");
    let mut session = session_with(doc.clone());
    let text = DragPayload::new("text", "Text");

    assert_eq!(
        session.handle_drop(&DropTarget::section("gone"), &text),
        DropOutcome::Ignored(IgnoreReason::UnknownSection("gone".to_string()))
    );
    assert_eq!(
        session.handle_drop(&DropTarget::container("s-1", "gone"), &text),
        DropOutcome::Ignored(IgnoreReason::UnknownContainer("gone".to_string()))
    );
    assert_eq!(session.document(), &doc);
}

#[test]
fn test_premade_component_becomes_custom_element() {
    let doc = Document::new().add_section(Region::Middle, "s-1");
    let mut session = session_with(doc);

    let hero = webara_editor::palette::component_library()
        .iter()
        .find(|item| item.kind == "hero")
        .unwrap();
    let payload = DragPayload::from_drag_data(&hero.drag_data());

    let id = created(session.handle_drop(&DropTarget::section("s-1"), &payload));

    let element = session.document().find_element(&id).unwrap();
    assert_eq!(element.kind, ElementKind::Custom("hero".to_string()));
    assert!(element.content.is_empty());
    assert!(element.styles.is_empty());
}

#[test]
fn test_drops_never_reuse_ids() {
    let mut session = session_with(Document::new());
    let section = session.add_section(Region::Middle);

    let ids: Vec<String> = (0..5)
        .map(|_| created(session.handle_drop(&DropTarget::section(&section), &DragPayload::new("text", "Text"))))
        .collect();

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}
