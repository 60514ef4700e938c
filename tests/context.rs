//! Building with implicit parents

use proptest::prelude::*;
use report_tree::tree::elements::{Code, Fold, Grid, Report, Section, Tab, Text};
use report_tree::{Builder, NodeKind, TreeError};

#[test]
fn leaf_lands_in_innermost_open_container() {
    let mut builder = Builder::new();
    let (a, b, leaf) = {
        let mut a = builder.open(Section::new("A")).unwrap();
        let a_id = a.node();
        let (b_id, leaf) = {
            let mut b = a.open(Section::new("B")).unwrap();
            let leaf = b.add(Text::new("L")).unwrap();
            assert_eq!(b.contexts().depth(), 2);
            (b.node(), leaf)
        };
        assert_eq!(a.contexts().current(), Some(a_id));
        (a_id, b_id, leaf)
    };
    assert!(builder.contexts().is_empty());

    let tree = builder.tree();
    assert_eq!(tree[leaf].parent(), Some(b));
    assert_eq!(tree[b].parent(), Some(a));
    assert!(tree[a].is_root());
}

#[test]
fn sibling_scope_does_not_see_closed_one() {
    let mut builder = Builder::new();
    let mut report = builder.open(Report::new("R")).unwrap();
    let root = report.node();

    let first = {
        let mut section = report.open(Section::new("First")).unwrap();
        section.add(Text::new("one")).unwrap();
        section.node()
    };
    let second = {
        let section = report.open(Section::new("Second")).unwrap();
        assert_eq!(section.contexts().iter().collect::<Vec<_>>(), vec![root, section.node()]);
        section.node()
    };
    let tab = report.add(Tab::new(["x"])).unwrap();

    let tree = report.tree();
    assert_eq!(tree[first].parent(), Some(root));
    assert_eq!(tree[second].parent(), Some(root));
    assert!(tree[second].children().is_empty());
    assert_eq!(tree[tab].parent(), Some(root));
}

#[test]
fn failed_construction_still_closes_scope() {
    let mut builder = Builder::new();
    let mut report = builder.open(Report::new("R")).unwrap();
    let root = report.node();

    let failed: Result<(), TreeError> = (|| {
        let mut tab = report.open(Tab::new(["only"]))?;
        // Tabs never hold sections
        tab.add(Section::new("nested"))?;
        Ok(())
    })();
    assert!(matches!(
        failed,
        Err(TreeError::InvalidParent {
            child: NodeKind::Section,
            ..
        })
    ));
    assert_eq!(report.contexts().current(), Some(root));

    let section = report.add(Section::new("after")).unwrap();
    assert_eq!(report.tree()[section].parent(), Some(root));
}

#[test]
fn leaf_without_context_needs_a_parent() {
    let mut builder = Builder::new();
    assert_eq!(
        builder.add(Text::new("orphan")),
        Err(TreeError::NoParentAvailable {
            kind: NodeKind::Text
        })
    );
    assert_eq!(
        builder.add(Fold::new()),
        Err(TreeError::NoParentAvailable {
            kind: NodeKind::Fold
        })
    );
    assert!(builder.tree().is_empty());

    let section = builder.add(Section::new("free")).unwrap();
    assert!(builder.tree()[section].is_root());
}

#[test]
fn explicit_parent_wins_over_context() {
    let mut builder = Builder::new();
    let other = builder.add(Section::new("Other")).unwrap();
    let mut report = builder.open(Report::new("R")).unwrap();
    let mut section = report.open(Section::new("Open")).unwrap();

    let text = section.add_to(Text::new("elsewhere"), other).unwrap();
    assert_eq!(section.tree()[text].parent(), Some(other));
    assert!(section.tree()[section.node()].children().is_empty());
}

#[test]
fn reentering_an_existing_container() {
    let mut builder = Builder::new();
    let report = builder.add(Report::new("R")).unwrap();
    let grid = builder.add_to(Grid::new(2), report).unwrap();
    assert_eq!(
        builder.add_to(Text::new("direct"), report),
        Err(TreeError::InvalidParent {
            child: NodeKind::Text,
            reason: "Report (ReportPolicy) does not accept Text children".to_string(),
        })
    );

    let section = builder.add_to(Section::new("S"), report).unwrap();
    {
        let mut scope = builder.enter(section).unwrap();
        scope.code(Code::new("x = 1").folded(true)).unwrap();
    }
    {
        let mut scope = builder.enter(section).unwrap();
        scope.add(Text::new("later")).unwrap();
    }

    let tree = builder.tree();
    let kinds: Vec<NodeKind> = tree[section]
        .children()
        .iter()
        .map(|c| tree[*c].kind())
        .collect();
    assert_eq!(kinds, vec![NodeKind::Fold, NodeKind::Text]);
    assert_eq!(tree[report].children(), &[grid, section]);
}

proptest! {
    #[test]
    fn stack_is_empty_after_any_nesting(depth in 1usize..12, fail_at in 0usize..12) {
        let mut builder = Builder::new();
        fn descend(builder: &mut Builder, remaining: usize, fail_at: usize) -> Result<(), TreeError> {
            if remaining == 0 {
                return Ok(());
            }
            let mut scope = builder.open(Section::new(format!("level {remaining}")))?;
            if remaining == fail_at {
                scope.add(Report::new("nested report"))?;
            }
            descend(&mut scope, remaining - 1, fail_at)
        }

        let result = descend(&mut builder, depth, fail_at);
        prop_assert_eq!(result.is_err(), fail_at >= 1 && fail_at <= depth);
        prop_assert!(builder.contexts().is_empty());
    }
}
