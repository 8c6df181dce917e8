// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::graph::{Graph, NodeKind};
use crate::config::DependencyGraph;

/// A type-safe wrapper for workflow entry points, ordered by preference.
///
/// Entry candidates are nodes with no incoming connection in the graph as written. When
/// several qualify, input nodes come first, then retrieval nodes, then everything else; ties
/// keep declaration order. The first candidate is where execution starts.
///
/// # Examples
///
/// ## Building entry points incrementally
/// ```
/// use the_switchboard::config::EntryPoints;
///
/// let mut entry_points = EntryPoints::new();
/// entry_points.add("text-in".to_string());
/// entry_points.add("rag".to_string());
///
/// assert_eq!(entry_points.primary(), Some("text-in"));
/// assert_eq!(entry_points.iter().count(), 2);
/// ```
///
/// ## Converting back to Vec<String>
/// ```
/// use the_switchboard::config::EntryPoints;
///
/// let entry_points = EntryPoints::from(vec!["in".to_string()]);
/// let vec_form: Vec<String> = entry_points.into();
/// assert_eq!(vec_form, vec!["in".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPoints(pub Vec<String>);

impl EntryPoints {
    /// Create a new empty entrypoints list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Resolve entry candidates for a graph.
    ///
    /// A graph in which every node has an incoming connection (a cycle through the entry)
    /// still gets a deterministic start: the same preference applied to all nodes.
    pub fn resolve(graph: &Graph) -> Self {
        let predecessors = DependencyGraph::predecessors(graph);
        let mut candidates: Vec<(usize, usize, &str)> = graph
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, n)| predecessors.degree(&n.id) == 0)
            .map(|(position, n)| (Self::preference(&n.kind), position, n.id.as_str()))
            .collect();

        if candidates.is_empty() {
            candidates = graph
                .nodes()
                .iter()
                .enumerate()
                .map(|(position, n)| (Self::preference(&n.kind), position, n.id.as_str()))
                .collect();
        }

        candidates.sort();
        Self(candidates.into_iter().map(|(_, _, id)| id.to_string()).collect())
    }

    fn preference(kind: &NodeKind) -> usize {
        match kind {
            NodeKind::Input(_) => 0,
            NodeKind::Retrieval => 1,
            _ => 2,
        }
    }

    /// Add an entrypoint
    pub fn add(&mut self, node_id: String) {
        self.0.push(node_id);
    }

    /// The node execution starts from
    pub fn primary(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Get iterator over entrypoints
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for EntryPoints {
    fn from(entrypoints: Vec<String>) -> Self {
        Self(entrypoints)
    }
}

impl From<EntryPoints> for Vec<String> {
    fn from(value: EntryPoints) -> Self {
        value.0
    }
}
