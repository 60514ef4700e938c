//! Saving a tree as records and rebuilding it

mod common;

use common::{nested_report, tree_strategy};
use proptest::prelude::*;
use report_tree::formats::outline::render;
use report_tree::persist::{deserialize, load_tree, serialize, PersistError, Record, RecordFormat};
use report_tree::tree::elements::{Code, Grid, Image, Quote, Report, Section, Tab, Table, Text};
use report_tree::{Builder, NodeId, NodeKind, Tree};
use serde_json::json;

/// Kind and child count of every node, in pre-order
fn shape(tree: &Tree, root: NodeId) -> Vec<(NodeKind, usize)> {
    tree.descendants(root)
        .into_iter()
        .map(|id| (tree[id].kind(), tree[id].children().len()))
        .collect()
}

#[test]
fn reparented_tree_survives_a_round_trip() {
    let mut tree = Tree::new();
    let report = tree.create(Report::new("R"), None).unwrap();
    let a = tree.create(Section::new("A"), Some(report)).unwrap();
    let b = tree.create(Section::new("B"), Some(a)).unwrap();
    tree.create(Text::new("inside B"), Some(b)).unwrap();

    let new_root = tree.create(Report::new("New"), None).unwrap();
    tree.reparent(b, Some(new_root)).unwrap();
    assert!(tree[a].children().is_empty());

    for root in [report, new_root] {
        let record = serialize(&tree, root).unwrap();
        let (loaded, loaded_root) = load_tree(&record).unwrap();
        assert_eq!(shape(&loaded, loaded_root), shape(&tree, root));
        assert_eq!(render(&loaded, loaded_root, None), render(&tree, root, None));
    }
}

#[test]
fn nested_report_round_trips_through_both_formats() {
    let common::Nested { tree, report, .. } = nested_report();
    let record = serialize(&tree, report).unwrap();

    for format in [RecordFormat::Json, RecordFormat::Yaml] {
        for pretty in [true, false] {
            let text = format.to_text(&record, pretty).unwrap();
            let parsed = format.parse(&text).unwrap();
            assert_eq!(parsed, record, "{format} (pretty: {pretty})");

            let (loaded, root) = load_tree(&parsed).unwrap();
            assert_eq!(render(&loaded, root, None), render(&tree, report, None));
            assert_eq!(loaded.len(), tree.len());
        }
    }
}

#[test]
fn every_kind_keeps_its_attributes() {
    let mut builder = Builder::new();
    let report = {
        let mut report = builder
            .open(Report::new("All").with_meta("<meta charset=\"utf-8\">").with_pretext("pre"))
            .unwrap();
        {
            let mut section = report.open(Section::new("Media").with_tex(true)).unwrap();
            section
                .add(Image::new("plots/a.png").with_size(640.0, 480.0).with_scale(0.5))
                .unwrap();
            section.code(Code::new("print(1)").with_linenums(3).folded(true)).unwrap();
            section.quote(Quote::new("quoted")).unwrap();
            section
                .add(Table::new(["n", "name"], vec![vec![json!(1), json!("one")]]))
                .unwrap();
        }
        {
            let mut tabs = report.open(Tab::new(["left", "right"])).unwrap();
            tabs.add(Text::new("l").with_font_size(12.0)).unwrap();
            tabs.add(Text::new("r")).unwrap();
        }
        report.add(Grid::new(2).with_item_titles(["x", "y"])).unwrap();
        report.node()
    };
    let tree = builder.into_tree();

    let record = serialize(&tree, report).unwrap();
    let (loaded, root) = load_tree(&record).unwrap();

    let originals = tree.descendants(report);
    let rebuilt = loaded.descendants(root);
    assert_eq!(originals.len(), rebuilt.len());
    for (original, copy) in originals.into_iter().zip(rebuilt) {
        assert_eq!(loaded[copy].data(), tree[original].data());
    }
}

#[test]
fn subtree_is_rebuilt_under_an_existing_parent() {
    let common::Nested {
        tree,
        section1,
        ..
    } = nested_report();
    let record = serialize(&tree, section1).unwrap();

    let mut target = Tree::new();
    let report = target.create(Report::new("Copy"), None).unwrap();
    let copy = deserialize(&mut target, &record, Some(report)).unwrap();

    assert_eq!(target[copy].parent(), Some(report));
    assert_eq!(shape(&target, copy), shape(&tree, section1));
    assert_eq!(target.sections(copy).len(), 3);
}

#[test]
fn unknown_type_aborts_the_whole_load() {
    let record: Record = serde_json::from_value(json!({
        "type": "Report",
        "title": "R",
        "children": [
            { "type": "Section", "title": "ok" },
            { "type": "Section", "title": "S", "children": [
                { "type": "Text", "text": "fine" },
                { "type": "Widget" }
            ]}
        ]
    }))
    .unwrap();

    let mut target = Tree::new();
    let err = deserialize(&mut target, &record, None).unwrap_err();
    assert!(matches!(err, PersistError::UnknownType { ref tag, .. } if tag == "Widget"));
    assert_eq!(err.to_string(), "unknown node type 'Widget' at Report > Section[1] > Widget[1]");
    assert!(target.is_empty());
}

#[test]
fn missing_required_field_is_named() {
    let record: Record = serde_json::from_value(json!({
        "type": "Section",
        "title": "S",
        "children": [{ "type": "Link", "title": "no target" }]
    }))
    .unwrap();

    let err = load_tree(&record).unwrap_err();
    match err {
        PersistError::MissingField {
            node_type,
            field,
            ref path,
        } => {
            assert_eq!(node_type, NodeKind::Link);
            assert_eq!(field, "link");
            assert_eq!(path.to_string(), "Section > Link[0]");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_text_is_a_parse_error() {
    assert!(matches!(
        RecordFormat::Json.parse("{\"type\": "),
        Err(PersistError::Json(_))
    ));
    assert!(matches!(
        RecordFormat::Yaml.parse("type: [unclosed"),
        Err(PersistError::Yaml(_))
    ));
}

/// A report with `depth` sections nested one inside the next and a text at the bottom
fn nested_sections(depth: usize) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let report = tree.create(Report::new("Deep"), None).unwrap();
    let mut parent = report;
    for level in 0..depth {
        parent = tree.create(Section::new(format!("level {level}")), Some(parent)).unwrap();
    }
    tree.create(Text::new("bottom"), Some(parent)).unwrap();
    (tree, report)
}

#[test]
fn deeply_nested_json_round_trips() {
    let (tree, report) = nested_sections(300);
    let record = serialize(&tree, report).unwrap();
    assert_eq!(record.depth(), 301);

    for pretty in [true, false] {
        let text = RecordFormat::Json.to_text(&record, pretty).unwrap();
        let parsed = RecordFormat::Json.parse(&text).unwrap();
        assert_eq!(parsed, record);

        let (loaded, root) = load_tree(&parsed).unwrap();
        assert_eq!(shape(&loaded, root), shape(&tree, report));
    }
}

#[test]
fn yaml_reads_back_everything_it_writes() {
    let limit = RecordFormat::Yaml.max_depth().unwrap();

    let (tree, report) = nested_sections(limit - 1);
    let record = serialize(&tree, report).unwrap();
    assert_eq!(record.depth(), limit);
    let text = RecordFormat::Yaml.to_text(&record, true).unwrap();
    assert_eq!(RecordFormat::Yaml.parse(&text).unwrap(), record);

    let (tree, report) = nested_sections(limit);
    let record = serialize(&tree, report).unwrap();
    let err = RecordFormat::Yaml.to_text(&record, true).unwrap_err();
    assert!(matches!(
        err,
        PersistError::TooDeep { format: RecordFormat::Yaml, depth, limit: l } if depth == limit + 1 && l == limit
    ));
    assert!(RecordFormat::Json.to_text(&record, true).is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn load_after_save_renders_the_same_outline((tree, root) in tree_strategy()) {
        let record = serialize(&tree, root).unwrap();
        let (loaded, loaded_root) = load_tree(&record).unwrap();

        prop_assert_eq!(render(&loaded, loaded_root, None), render(&tree, root, None));
        prop_assert_eq!(loaded.len(), tree.len());
        prop_assert_eq!(serialize(&loaded, loaded_root).unwrap(), record);
    }

    #[test]
    fn json_text_round_trip_is_lossless((tree, root) in tree_strategy(), pretty in any::<bool>()) {
        let record = serialize(&tree, root).unwrap();
        let text = RecordFormat::Json.to_text(&record, pretty).unwrap();
        let (loaded, loaded_root) = load_tree(&RecordFormat::Json.parse(&text).unwrap()).unwrap();

        prop_assert_eq!(shape(&loaded, loaded_root), shape(&tree, root));
        prop_assert_eq!(serialize(&loaded, loaded_root).unwrap(), record);
    }
}
