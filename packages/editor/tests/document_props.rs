//! Property-based invariants for document construction.
//!
//! Verifies:
//! 1. Every inserted node appears exactly once, in insertion order within its parent
//! 2. Writes never mutate the input snapshot
//! 3. Documents survive a JSON round trip unchanged

use proptest::prelude::*;
use webara_editor::{instantiate, Document, ElementKind, Region};

#[derive(Debug, Clone)]
enum Step {
    AddSection(Region),
    /// Index into the sections created so far
    AddContainer(usize),
    /// Index into the containers created so far
    AddElement(usize, ElementKind),
}

fn arb_region() -> impl Strategy<Value = Region> {
    prop_oneof![Just(Region::Top), Just(Region::Middle), Just(Region::Bottom)]
}

fn arb_kind() -> impl Strategy<Value = ElementKind> {
    prop_oneof![
        Just(ElementKind::Text),
        Just(ElementKind::Button),
        Just(ElementKind::Image),
        Just(ElementKind::Navbar),
        "[a-z]{3,8}".prop_map(|tag| ElementKind::parse(&tag)),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        arb_region().prop_map(Step::AddSection),
        any::<usize>().prop_map(Step::AddContainer),
        (any::<usize>(), arb_kind()).prop_map(|(i, kind)| Step::AddElement(i, kind)),
    ]
}

/// Expected contents, kept alongside the document
#[derive(Default)]
struct Model {
    /// (region, section id, container ids)
    sections: Vec<(Region, String, Vec<String>)>,
    /// (section id, container id, element ids)
    containers: Vec<(String, String, Vec<String>)>,
}

fn build(steps: &[Step]) -> (Document, Model) {
    let mut doc = Document::new();
    let mut model = Model::default();
    let mut counter = 0;
    let mut next_id = |prefix: &str| {
        counter += 1;
        format!("{}-{}", prefix, counter)
    };

    for step in steps {
        match step {
            Step::AddSection(region) => {
                let id = next_id("section");
                doc = doc.add_section(*region, id.clone());
                model.sections.push((*region, id, Vec::new()));
            }
            Step::AddContainer(i) if !model.sections.is_empty() => {
                let index = i % model.sections.len();
                let id = next_id("container");
                let section_id = model.sections[index].1.clone();
                doc = doc.add_container_to_section(&section_id, id.clone());
                model.sections[index].2.push(id.clone());
                model.containers.push((section_id, id, Vec::new()));
            }
            Step::AddElement(i, kind) if !model.containers.is_empty() => {
                let index = i % model.containers.len();
                let id = next_id(kind.as_str());
                let (section_id, container_id, elements) = &mut model.containers[index];
                doc = doc.add_element_to_container(section_id, container_id, instantiate(id.clone(), kind.clone(), "x"));
                elements.push(id);
            }
            _ => {}
        }
    }

    (doc, model)
}

proptest! {
    #[test]
    fn inserted_nodes_appear_once_in_order(steps in prop::collection::vec(arb_step(), 0..60)) {
        let (doc, model) = build(&steps);

        for region in Region::ALL {
            let expected: Vec<&str> = model
                .sections
                .iter()
                .filter(|(r, _, _)| *r == region)
                .map(|(_, id, _)| id.as_str())
                .collect();
            let actual: Vec<&str> = doc.sections(region).iter().map(|s| s.id.as_str()).collect();
            prop_assert_eq!(actual, expected);
        }

        for (_, section_id, container_ids) in &model.sections {
            let (_, section) = doc.find_section(section_id).unwrap();
            let actual: Vec<&str> = section.containers.iter().map(|c| c.id.as_str()).collect();
            prop_assert_eq!(actual, container_ids.iter().map(String::as_str).collect::<Vec<_>>());
        }

        for (section_id, container_id, element_ids) in &model.containers {
            let container = doc.find_container(section_id, container_id).unwrap();
            let actual: Vec<&str> = container.elements.iter().map(|e| e.id.as_str()).collect();
            prop_assert_eq!(actual, element_ids.iter().map(String::as_str).collect::<Vec<_>>());
        }

        let mut all = doc.ids();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        prop_assert_eq!(all.len(), total);
    }

    #[test]
    fn writes_leave_input_untouched(steps in prop::collection::vec(arb_step(), 1..30)) {
        let (doc, model) = build(&steps);
        let before = doc.clone();

        if let Some((section_id, container_id, _)) = model.containers.first() {
            let _ = doc.add_element_to_container(
                section_id,
                container_id,
                instantiate("extra", ElementKind::Text, "Text"),
            );
        }
        let _ = doc.add_section(Region::Middle, "extra-section");

        prop_assert_eq!(doc, before);
    }

    #[test]
    fn json_round_trip(steps in prop::collection::vec(arb_step(), 0..30)) {
        let (doc, _) = build(&steps);
        let json = doc.to_json_pretty().unwrap();
        prop_assert_eq!(Document::from_json(&json).unwrap(), doc);
    }
}
