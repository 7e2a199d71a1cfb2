//! Value-keyed relationship graph of people, emails and organizations
//!
//! Nodes are identified by their literal string, so records that share a
//! name, email or organization string merge into the same node.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use tkg_core::{NodeKind, PersonRecord};

/// A node in the knowledge graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Literal name, email or organization string
    pub id: String,
    /// Kind fixed at first insertion
    pub kind: NodeKind,
}

/// Undirected graph with idempotent node and edge insertion
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    graph: UnGraph<GraphNode, ()>,
    index: HashMap<String, NodeIndex>,
}

impl KnowledgeGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from extracted records
    pub fn from_records(records: &[PersonRecord]) -> Self {
        let mut graph = Self::new();
        for record in records {
            graph.add_record(record);
        }

        tracing::debug!(
            records = records.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built knowledge graph"
        );
        graph
    }

    /// Add the three nodes and two edges of one record
    pub fn add_record(&mut self, record: &PersonRecord) {
        self.add_node(&record.name, NodeKind::Person);
        self.add_node(&record.email, NodeKind::Email);
        self.add_node(&record.organization, NodeKind::Organization);

        self.add_edge(&record.name, &record.email);
        self.add_edge(&record.name, &record.organization);
    }

    /// Insert a node. Returns false if the id already exists; the existing
    /// kind is kept.
    pub fn add_node(&mut self, id: &str, kind: NodeKind) -> bool {
        if self.index.contains_key(id) {
            return false;
        }

        let idx = self.graph.add_node(GraphNode {
            id: id.to_string(),
            kind,
        });
        self.index.insert(id.to_string(), idx);
        true
    }

    /// Insert an undirected edge. Returns false if either endpoint is
    /// missing or the pair is already connected.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        let (Some(&ia), Some(&ib)) = (self.index.get(a), self.index.get(b)) else {
            return false;
        };

        if self.graph.find_edge(ia, ib).is_some() {
            return false;
        }

        self.graph.add_edge(ia, ib, ());
        true
    }

    /// Kind of a node, if present
    pub fn kind(&self, id: &str) -> Option<NodeKind> {
        self.index.get(id).map(|&idx| self.graph[idx].kind)
    }

    /// Check whether a node exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges as `(first, second)` id pairs, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].id.as_str(),
                self.graph[edge.target()].id.as_str(),
            )
        })
    }

    /// Check whether two nodes are connected, in either orientation
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&ia), Some(&ib)) => self.graph.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    /// Neighbors of the given kind, in the order their edges were added
    pub fn neighbors_of_kind(&self, id: &str, kind: NodeKind) -> Vec<&str> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };

        let mut incident: Vec<_> = self
            .graph
            .edges(idx)
            .map(|edge| {
                let other = if edge.source() == idx {
                    edge.target()
                } else {
                    edge.source()
                };
                (edge.id().index(), other)
            })
            .collect();
        incident.sort_by_key(|(edge_id, _)| *edge_id);

        incident
            .into_iter()
            .map(|(_, other)| &self.graph[other])
            .filter(|node| node.kind == kind)
            .map(|node| node.id.as_str())
            .collect()
    }

    /// Count nodes of one kind
    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes().filter(|node| node.kind == kind).count()
    }
}
