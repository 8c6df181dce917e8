// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};

use crate::config::graph::Graph;

/// Newtype wrapper for a node adjacency list providing type safety.
///
/// Neighbour lists keep connection declaration order, which is what every ordering rule in
/// the compiler keys on. Duplicate connections between the same pair of nodes are collapsed.
///
/// # Examples
///
/// ```
/// use the_switchboard::config::DependencyGraph;
///
/// let mut graph = DependencyGraph::new();
/// graph.add_edge("input", "llm");
/// graph.add_edge("input", "rag");
/// graph.add_edge("input", "llm");
///
/// assert_eq!(graph.neighbours("input"), &["llm".to_string(), "rag".to_string()]);
/// assert!(graph.neighbours("llm").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyGraph(pub HashMap<String, Vec<String>>);

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Forward adjacency: node id to the nodes it connects to
    pub fn successors(graph: &Graph) -> Self {
        let mut adjacency = Self::with_nodes(graph);
        for connection in graph.connections() {
            adjacency.add_edge(&connection.source, &connection.target);
        }
        adjacency
    }

    /// Reverse adjacency: node id to the nodes connecting into it
    pub fn predecessors(graph: &Graph) -> Self {
        let mut adjacency = Self::with_nodes(graph);
        for connection in graph.connections() {
            adjacency.add_edge(&connection.target, &connection.source);
        }
        adjacency
    }

    fn with_nodes(graph: &Graph) -> Self {
        Self(
            graph
                .nodes()
                .iter()
                .map(|n| (n.id.clone(), Vec::new()))
                .collect(),
        )
    }

    /// Add an edge, ignoring it if already present
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let neighbours = self.0.entry(from.to_string()).or_default();
        if !neighbours.iter().any(|n| n == to) {
            neighbours.push(to.to_string());
        }
        self.0.entry(to.to_string()).or_default();
    }

    /// Neighbours of a node, empty when unknown
    pub fn neighbours(&self, id: &str) -> &[String] {
        self.0.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, id: &str) -> usize {
        self.neighbours(id).len()
    }

    /// First cycle reachable in this adjacency, as a closed path (`a -> b -> a`).
    ///
    /// Roots are visited in `order` so the reported cycle is stable across runs.
    pub fn find_cycle<'a>(&'a self, order: impl IntoIterator<Item = &'a str>) -> Option<Vec<String>> {
        let mut visited = HashSet::new();
        let mut on_path = HashSet::new();
        let mut path = Vec::new();

        for root in order {
            if !visited.contains(root) {
                if let Some(cycle) = self.dfs(root, &mut visited, &mut on_path, &mut path) {
                    return Some(cycle);
                }
            }
        }
        None
    }

    fn dfs<'a>(
        &'a self,
        node: &'a str,
        visited: &mut HashSet<&'a str>,
        on_path: &mut HashSet<&'a str>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        visited.insert(node);
        on_path.insert(node);
        path.push(node);

        for next in self.neighbours(node) {
            let next = next.as_str();
            if on_path.contains(next) {
                let start = path.iter().position(|n| *n == next).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(next.to_string());
                return Some(cycle);
            }
            if !visited.contains(next) {
                if let Some(cycle) = self.dfs(next, visited, on_path, path) {
                    return Some(cycle);
                }
            }
        }

        on_path.remove(node);
        path.pop();
        None
    }
}

impl From<HashMap<String, Vec<String>>> for DependencyGraph {
    fn from(graph: HashMap<String, Vec<String>>) -> Self {
        Self(graph)
    }
}

impl From<DependencyGraph> for HashMap<String, Vec<String>> {
    fn from(graph: DependencyGraph) -> Self {
        graph.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_simple_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("c", "b");

        let cycle = graph.find_cycle(["a", "b", "c"]).unwrap();
        assert_eq!(cycle, vec!["b", "c", "b"]);
    }

    #[test]
    fn acyclic_graph_has_no_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "c");
        graph.add_edge("b", "c");

        assert!(graph.find_cycle(["a", "b", "c"]).is_none());
        assert_eq!(graph.degree("a"), 2);
        assert_eq!(graph.degree("c"), 0);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "a");
        assert_eq!(graph.find_cycle(["a"]).unwrap(), vec!["a", "a"]);
    }
}
