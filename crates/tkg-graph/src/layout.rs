//! Tiered layout: Organization → Person → Email
//!
//! Persons are grouped under their organizations, groups are ordered by size
//! (largest first) and laid out left to right as blocks. Each block is
//! `members * MEMBER_SPACING` wide and consecutive blocks are separated by
//! `ORG_PADDING`, so blocks never overlap. Vertical positions are fixed tiers.
//!
//! The layout is plain data; drawing it is left to a [`crate::render::Renderer`].

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::graph::KnowledgeGraph;
use crate::label::LabelFormatter;
use tkg_core::{NodeKind, Position};

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// Horizontal distance between adjacent persons of one organization
pub const MEMBER_SPACING: f64 = 12.0;

/// Horizontal gap between consecutive organization blocks
pub const ORG_PADDING: f64 = 4.0;

/// Vertical positions for the tiers (Y coordinates, larger is higher)
pub const ORGANIZATION_TIER: f64 = 4.0;
pub const PERSON_TIER: f64 = 2.0;
pub const EMAIL_TIER: f64 = 1.0;

/// Tier of a node kind
pub fn tier(kind: NodeKind) -> f64 {
    match kind {
        NodeKind::Organization => ORGANIZATION_TIER,
        NodeKind::Person => PERSON_TIER,
        NodeKind::Email => EMAIL_TIER,
    }
}

/// Fill color of a node kind (CSS color name)
pub fn color(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Person => "skyblue",
        NodeKind::Organization => "orange",
        NodeKind::Email => "violet",
    }
}

// =============================================================================
// LAYOUT OUTPUT
// =============================================================================

/// A positioned, colored and labeled node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
    pub color: &'static str,
    /// Display label; may contain `\n` line breaks
    pub label: String,
}

/// Horizontal span allocated to one organization and its members
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgBlock {
    pub organization: String,
    /// Left edge; equals the x of the first member
    pub start_x: f64,
    /// `members.len() * MEMBER_SPACING`
    pub width: f64,
    /// x of the organization node
    pub center: f64,
    /// Person ids in placement order
    pub members: Vec<String>,
}

impl OrgBlock {
    /// Right edge of the block (exclusive)
    pub fn end_x(&self) -> f64 {
        self.start_x + self.width
    }
}

/// Axis-aligned extent of the placed nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Result of a layout pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    /// Placed nodes in graph insertion order
    pub nodes: Vec<LayoutNode>,
    /// Edges between placed nodes
    pub edges: Vec<(String, String)>,
    /// Organization blocks, left to right
    pub blocks: Vec<OrgBlock>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Layout {
    /// Look up a placed node
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Position of a placed node
    pub fn position(&self, id: &str) -> Option<Position> {
        self.node(id).map(|node| node.position)
    }

    /// Extent of all placed nodes, `None` when nothing was placed
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.nodes.first()?.position;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };

        Some(self.nodes.iter().fold(init, |b, node| Bounds {
            min_x: b.min_x.min(node.position.x),
            max_x: b.max_x.max(node.position.x),
            min_y: b.min_y.min(node.position.y),
            max_y: b.max_y.max(node.position.y),
        }))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// =============================================================================
// LAYOUT ENGINE
// =============================================================================

/// Persons of one organization, in first-seen order
#[derive(Debug, Clone)]
struct OrgGroup<'g> {
    organization: &'g str,
    members: Vec<&'g str>,
}

/// Computes the tiered layout of a knowledge graph
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    formatter: LabelFormatter,
}

impl LayoutEngine {
    /// Engine wrapping Person and Email labels at 15 columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label wrap width
    pub fn with_label_width(mut self, width: usize) -> Self {
        self.formatter = LabelFormatter::new(width);
        self
    }

    /// Set the label formatter
    pub fn with_formatter(mut self, formatter: LabelFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Group persons by organization neighbor.
    ///
    /// A person linked to several organizations (shared name across records)
    /// joins every one of their groups.
    fn group<'g>(&self, graph: &'g KnowledgeGraph) -> Vec<OrgGroup<'g>> {
        let mut groups: Vec<OrgGroup<'g>> = Vec::new();
        let mut slot: HashMap<&'g str, usize> = HashMap::new();

        for node in graph.nodes().filter(|n| n.kind == NodeKind::Person) {
            for org in graph.neighbors_of_kind(&node.id, NodeKind::Organization) {
                let i = *slot.entry(org).or_insert_with(|| {
                    groups.push(OrgGroup {
                        organization: org,
                        members: Vec::new(),
                    });
                    groups.len() - 1
                });
                groups[i].members.push(node.id.as_str());
            }
        }

        // Stable: equal-size groups keep first-seen order
        groups.sort_by(|a, b| b.members.len().cmp(&a.members.len()));
        groups
    }

    /// Display label of a node
    pub fn label(&self, id: &str, kind: NodeKind) -> String {
        match kind {
            NodeKind::Person | NodeKind::Email => self.formatter.wrap(id),
            NodeKind::Organization => id.to_string(),
        }
    }

    /// Compute positions, colors and labels for every node
    pub fn compute(&self, graph: &KnowledgeGraph) -> Layout {
        let groups = self.group(graph);
        let mut positions: HashMap<&str, Position> = HashMap::new();
        let mut blocks = Vec::with_capacity(groups.len());
        let mut current_x = 0.0;

        for group in &groups {
            let width = group.members.len() as f64 * MEMBER_SPACING;
            let center = current_x + width / 2.0;

            positions.insert(
                group.organization,
                Position::new(center, tier(NodeKind::Organization)),
            );

            for (i, &person) in group.members.iter().enumerate() {
                let x = current_x + i as f64 * MEMBER_SPACING;
                positions.insert(person, Position::new(x, tier(NodeKind::Person)));

                for email in graph.neighbors_of_kind(person, NodeKind::Email) {
                    positions.insert(email, Position::new(x, tier(NodeKind::Email)));
                }
            }

            blocks.push(OrgBlock {
                organization: group.organization.to_string(),
                start_x: current_x,
                width,
                center,
                members: group.members.iter().map(|m| m.to_string()).collect(),
            });

            current_x += width + ORG_PADDING;
        }

        let mut layout = Layout {
            blocks,
            ..Default::default()
        };

        for node in graph.nodes() {
            let Some(&position) = positions.get(node.id.as_str()) else {
                warn!(id = %node.id, kind = %node.kind, "Node has no layout position");
                continue;
            };

            layout.index.insert(node.id.clone(), layout.nodes.len());
            layout.nodes.push(LayoutNode {
                id: node.id.clone(),
                kind: node.kind,
                position,
                color: color(node.kind),
                label: self.label(&node.id, node.kind),
            });
        }

        layout.edges = graph
            .edges()
            .filter(|(a, b)| layout.index.contains_key(*a) && layout.index.contains_key(*b))
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();

        debug!(
            organizations = layout.blocks.len(),
            nodes = layout.nodes.len(),
            edges = layout.edges.len(),
            width = current_x,
            "Computed tiered layout"
        );

        layout
    }
}
