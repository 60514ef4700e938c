//! Node kinds and nesting rules
//!
//! Every node in a report tree carries one of a closed set of kinds. The kind decides three
//! structural facts:
//!
//! - whether the node is a container (may own children) or a leaf;
//! - whether the node may exist without a parent (root-capable);
//! - which child kinds it accepts.
//!
//! Nesting rules are grouped into policies, one per container family:
//!
//! - **ReportPolicy**: top-level containers only (Section, Tab, Fold, Grid). Leaf content never
//!   hangs directly off a report.
//! - **SectionPolicy**: anything except a Report. Sections nest arbitrarily.
//! - **GeneralPolicy**: anything except Reports and Sections. Used by Tab, Fold and Grid, which
//!   arrange content but never open a numbered section of their own.
//!
//! Leaves have no policy and accept nothing.

use std::fmt;
use std::str::FromStr;

/// The closed set of node kinds a report tree can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Report,
    Section,
    Tab,
    Fold,
    Grid,
    Text,
    Quote,
    Code,
    Link,
    Image,
    Plot,
    Map,
    Table,
    Pdf,
}

impl NodeKind {
    pub const ALL: [NodeKind; 14] = [
        NodeKind::Report,
        NodeKind::Section,
        NodeKind::Tab,
        NodeKind::Fold,
        NodeKind::Grid,
        NodeKind::Text,
        NodeKind::Quote,
        NodeKind::Code,
        NodeKind::Link,
        NodeKind::Image,
        NodeKind::Plot,
        NodeKind::Map,
        NodeKind::Table,
        NodeKind::Pdf,
    ];

    /// The type tag used in persisted records
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Report => "Report",
            NodeKind::Section => "Section",
            NodeKind::Tab => "Tab",
            NodeKind::Fold => "Fold",
            NodeKind::Grid => "Grid",
            NodeKind::Text => "Text",
            NodeKind::Quote => "Quote",
            NodeKind::Code => "Code",
            NodeKind::Link => "Link",
            NodeKind::Image => "Image",
            NodeKind::Plot => "Plot",
            NodeKind::Map => "Map",
            NodeKind::Table => "Table",
            NodeKind::Pdf => "Pdf",
        }
    }

    pub fn from_tag(tag: &str) -> Option<NodeKind> {
        NodeKind::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Upper-case name used in outlines
    pub fn outline_name(self) -> &'static str {
        match self {
            NodeKind::Report => "REPORT",
            NodeKind::Section => "SECTION",
            NodeKind::Tab => "TAB",
            NodeKind::Fold => "FOLD",
            NodeKind::Grid => "GRID",
            NodeKind::Text => "TEXT",
            NodeKind::Quote => "QUOTE",
            NodeKind::Code => "CODE",
            NodeKind::Link => "LINK",
            NodeKind::Image => "IMAGE",
            NodeKind::Plot => "PLOT",
            NodeKind::Map => "MAP",
            NodeKind::Table => "TABLE",
            NodeKind::Pdf => "PDF",
        }
    }

    pub fn policy(self) -> Option<NestingPolicy> {
        match self {
            NodeKind::Report => Some(NestingPolicy::Report),
            NodeKind::Section => Some(NestingPolicy::Section),
            NodeKind::Tab | NodeKind::Fold | NodeKind::Grid => Some(NestingPolicy::General),
            _ => None,
        }
    }

    pub fn is_container(self) -> bool {
        self.policy().is_some()
    }

    /// Root-capable kinds may be created without a parent or an open context.
    pub fn is_root_capable(self) -> bool {
        matches!(self, NodeKind::Report | NodeKind::Section)
    }

    /// Whether a node of this kind may own a child of kind `child`.
    pub fn accepts_child(self, child: NodeKind) -> bool {
        self.policy().is_some_and(|policy| policy.allows(child))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::from_tag(s).ok_or_else(|| format!("unknown node kind '{s}'"))
    }
}

/// Nesting rules shared by a family of container kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestingPolicy {
    Report,
    Section,
    General,
}

impl NestingPolicy {
    pub fn allows_sections(self) -> bool {
        matches!(self, NestingPolicy::Report | NestingPolicy::Section)
    }

    pub fn allows_leaves(self) -> bool {
        !matches!(self, NestingPolicy::Report)
    }

    pub fn allows(self, child: NodeKind) -> bool {
        match child {
            NodeKind::Report => false,
            NodeKind::Section => self.allows_sections(),
            kind if kind.is_container() => true,
            _ => self.allows_leaves(),
        }
    }

    /// Human-readable name for error messages
    pub fn name(self) -> &'static str {
        match self {
            NestingPolicy::Report => "ReportPolicy",
            NestingPolicy::Section => "SectionPolicy",
            NestingPolicy::General => "GeneralPolicy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_tag(kind.tag()), Some(kind));
            assert_eq!(kind.to_string().parse::<NodeKind>(), Ok(kind));
        }
        assert_eq!(NodeKind::from_tag("Paragraph"), None);
    }

    #[test]
    fn test_leaves_accept_nothing() {
        for parent in NodeKind::ALL.into_iter().filter(|k| !k.is_container()) {
            for child in NodeKind::ALL {
                assert!(!parent.accepts_child(child), "{parent} accepted {child}");
            }
        }
    }

    #[test]
    fn test_report_only_takes_containers() {
        assert!(NodeKind::Report.accepts_child(NodeKind::Section));
        assert!(NodeKind::Report.accepts_child(NodeKind::Grid));
        assert!(!NodeKind::Report.accepts_child(NodeKind::Text));
        assert!(!NodeKind::Report.accepts_child(NodeKind::Report));
    }

    #[test]
    fn test_general_policy_rejects_sections() {
        assert!(!NodeKind::Tab.accepts_child(NodeKind::Section));
        assert!(NodeKind::Tab.accepts_child(NodeKind::Grid));
        assert!(NodeKind::Fold.accepts_child(NodeKind::Code));
    }
}
