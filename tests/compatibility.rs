//! Which kinds may hold which

use report_tree::tree::elements as el;
use report_tree::{NodeData, NodeId, NodeKind, Tree, TreeError};
use rstest::rstest;
use NodeKind::*;

fn sample(kind: NodeKind) -> NodeData {
    match kind {
        Report => el::Report::new("R").into(),
        Section => el::Section::new("S").into(),
        Tab => el::Tab::new(["a", "b"]).into(),
        Fold => el::Fold::new().into(),
        Grid => el::Grid::new(2).into(),
        Text => el::Text::new("t").into(),
        Quote => el::Quote::new("q").into(),
        Code => el::Code::new("c").into(),
        Link => el::Link::new("https://example.org/a.html").into(),
        Image => el::Image::new("a.png").into(),
        Plot => el::Plot::new("plot.html").into(),
        Map => el::Map::new("map.html").into(),
        Table => el::Table::new(["x"], vec![]).into(),
        Pdf => el::Pdf::new("a.pdf").into(),
    }
}

/// A live node of `kind`, parented wherever it is allowed to live
fn placed(tree: &mut Tree, kind: NodeKind) -> NodeId {
    if kind.is_root_capable() {
        return tree.create(sample(kind), None).unwrap();
    }
    let holder = tree.create(sample(Section), None).unwrap();
    tree.create(sample(kind), Some(holder)).unwrap()
}

fn allowed(parent: NodeKind, child: NodeKind) -> bool {
    match (parent, child) {
        (_, Report) => false,
        (Report, Section | Tab | Fold | Grid) => true,
        (Report, _) => false,
        (Section, _) => true,
        (Tab | Fold | Grid, Section) => false,
        (Tab | Fold | Grid, _) => true,
        _ => false,
    }
}

#[rstest]
fn attach_follows_nesting_rules(
    #[values(Report, Section, Tab, Fold, Grid, Text, Quote, Code, Link, Image, Plot, Map, Table, Pdf)]
    parent_kind: NodeKind,
    #[values(Report, Section, Tab, Fold, Grid, Text, Quote, Code, Link, Image, Plot, Map, Table, Pdf)]
    child_kind: NodeKind,
) {
    let mut tree = Tree::new();
    let parent = placed(&mut tree, parent_kind);
    let before = tree.len();

    match tree.create(sample(child_kind), Some(parent)) {
        Ok(child) => {
            assert!(allowed(parent_kind, child_kind));
            assert_eq!(tree[child].parent(), Some(parent));
            assert_eq!(tree[parent].children(), &[child]);
        }
        Err(TreeError::InvalidParent { child, .. }) => {
            assert!(!allowed(parent_kind, child_kind));
            assert_eq!(child, child_kind);
            assert_eq!(tree.len(), before);
            assert!(tree[parent].children().is_empty());
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn reparent_follows_nesting_rules(
    #[values(Report, Section, Tab, Grid, Text, Table)] parent_kind: NodeKind,
    #[values(Section, Fold, Code, Image)] child_kind: NodeKind,
) {
    let mut tree = Tree::new();
    let parent = placed(&mut tree, parent_kind);
    let child = placed(&mut tree, child_kind);
    let old_parent = tree[child].parent();

    let result = tree.reparent(child, Some(parent));
    if allowed(parent_kind, child_kind) {
        assert_eq!(result, Ok(()));
        assert_eq!(tree[child].parent(), Some(parent));
    } else {
        assert!(matches!(result, Err(TreeError::InvalidParent { .. })));
        assert_eq!(tree[child].parent(), old_parent);
    }
}

#[rstest]
#[case::report(Report, true)]
#[case::section(Section, true)]
#[case::tab(Tab, false)]
#[case::fold(Fold, false)]
#[case::grid(Grid, false)]
#[case::text(Text, false)]
#[case::quote(Quote, false)]
#[case::code(Code, false)]
#[case::link(Link, false)]
#[case::image(Image, false)]
#[case::plot(Plot, false)]
#[case::map(Map, false)]
#[case::table(Table, false)]
#[case::pdf(Pdf, false)]
fn only_reports_and_sections_stand_alone(#[case] kind: NodeKind, #[case] root_capable: bool) {
    let mut tree = Tree::new();
    match tree.create(sample(kind), None) {
        Ok(id) => {
            assert!(root_capable);
            assert!(tree[id].is_root());
        }
        Err(err) => {
            assert!(!root_capable);
            assert_eq!(err, TreeError::NoParentAvailable { kind });
            assert!(tree.is_empty());
        }
    }
}

#[test]
fn dead_parent_is_rejected() {
    let mut tree = Tree::new();
    let section = tree.create(sample(Section), None).unwrap();
    tree.prune(section).unwrap();

    let err = tree.create(sample(Text), Some(section)).unwrap_err();
    assert!(matches!(err, TreeError::InvalidParent { child: Text, .. }));
    assert!(tree.is_empty());
}

#[test]
fn payload_kind_matches_sample() {
    for kind in NodeKind::ALL {
        assert_eq!(sample(kind).kind(), kind);
    }
}
