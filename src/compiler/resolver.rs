// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Effective edge set of a workflow.
//!
//! The literal connections are not executed as written. Two rules rewrite them, in order:
//!
//! 1. **Context redirection.** When retrieval or spreadsheet nodes feed an ai-call node's
//!    `context`-role port, each input node wired straight into that ai-call node is rewired to
//!    the first producer, and the producers are chained in front of the ai-call node
//!    (retrievals before spreadsheets, declaration order within a kind). `input -> ai` plus
//!    `rag -> ai (context)` therefore runs as `input -> rag -> ai`. Other predecessors keep
//!    their edges, and a rewrite that would close a loop is skipped.
//! 2. **Fan-out collapse.** A node left with several outgoing edges keeps the first one by
//!    connection declaration order; the execution state has no merge for parallel writers.
//!
//! Edges leaving conditional nodes never enter this process; they become routers.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{Graph, NodeKind, PortRole};
use crate::observability::messages::compiler::{ContextEdgeRedirected, FanOutCollapsed};
use crate::observability::messages::StructuredLog;

/// Plain edges after rewriting, plus the literal edges that were replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedEdges {
    pub edges: BTreeMap<String, String>,
    pub rewritten: BTreeSet<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Edge {
    source: String,
    target: String,
    /// Literal target port has the `context` role
    context: bool,
}

pub fn resolve(graph: &Graph) -> ResolvedEdges {
    let mut edges: Vec<Edge> = graph
        .connections()
        .iter()
        .filter(|c| !is_conditional(graph, &c.source))
        .map(|c| Edge {
            source: c.source.clone(),
            target: c.target.clone(),
            context: c.target_role == PortRole::Context,
        })
        .collect();

    let mut rewritten = BTreeSet::new();
    for consumer in graph.nodes().iter().filter(|n| n.kind == NodeKind::AiCall) {
        redirect_context(graph, &consumer.id, &mut edges, &mut rewritten);
    }

    dedupe(&mut edges);

    ResolvedEdges {
        edges: collapse_fan_out(edges),
        rewritten,
    }
}

fn is_conditional(graph: &Graph, id: &str) -> bool {
    graph
        .node(id)
        .map(|n| n.kind == NodeKind::Conditional)
        .unwrap_or(false)
}

/// Context producers wired into `consumer`'s context port, in execution order
fn producers_of(graph: &Graph, consumer: &str, edges: &[Edge]) -> Vec<String> {
    let mut producers: Vec<(bool, usize, &str)> = edges
        .iter()
        .filter(|e| e.target == consumer && e.context)
        .filter_map(|e| graph.node(&e.source))
        .filter(|n| n.kind.is_context_producer())
        .map(|n| {
            (
                n.kind != NodeKind::Retrieval,
                graph.position(&n.id).unwrap_or(usize::MAX),
                n.id.as_str(),
            )
        })
        .collect();

    producers.sort();
    producers.dedup();
    producers.into_iter().map(|(_, _, id)| id.to_string()).collect()
}

fn redirect_context(
    graph: &Graph,
    consumer: &str,
    edges: &mut [Edge],
    rewritten: &mut BTreeSet<(String, String)>,
) {
    let producers = producers_of(graph, consumer, edges);
    let Some(first) = producers.first() else {
        return;
    };

    for index in 0..edges.len() {
        let edge = &edges[index];
        if edge.target != consumer {
            continue;
        }

        let redirected = match producers.iter().position(|p| *p == edge.source) {
            // the last producer keeps its edge to the consumer
            Some(position) => match producers.get(position + 1) {
                Some(next) => next,
                None => continue,
            },
            None if is_input(graph, &edge.source) => first,
            None => continue,
        };

        // source -> redirected must not close a loop
        if reaches(edges, redirected, &edge.source) {
            continue;
        }

        ContextEdgeRedirected {
            source: &edge.source,
            consumer,
            producer: redirected,
        }
        .log();

        rewritten.insert((edge.source.clone(), consumer.to_string()));
        let edge = &mut edges[index];
        edge.target = redirected.clone();
        edge.context = false;
    }
}

fn is_input(graph: &Graph, id: &str) -> bool {
    graph.node(id).map(|n| n.kind.is_input()).unwrap_or(false)
}

/// Whether `to` can be reached from `from` over the current edges
fn reaches(edges: &[Edge], from: &str, to: &str) -> bool {
    let mut visited = BTreeSet::new();
    let mut pending = vec![from];
    while let Some(current) = pending.pop() {
        if current == to {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        pending.extend(
            edges
                .iter()
                .filter(|e| e.source == current)
                .map(|e| e.target.as_str()),
        );
    }
    false
}

fn dedupe(edges: &mut Vec<Edge>) {
    let mut seen = BTreeSet::new();
    edges.retain(|e| seen.insert((e.source.clone(), e.target.clone())));
}

fn collapse_fan_out(edges: Vec<Edge>) -> BTreeMap<String, String> {
    let mut plain: BTreeMap<String, String> = BTreeMap::new();
    let mut dropped: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for edge in edges {
        if plain.contains_key(&edge.source) {
            dropped.entry(edge.source).or_default().push(edge.target);
        } else {
            plain.insert(edge.source, edge.target);
        }
    }

    for (source, targets) in &dropped {
        if let Some(kept) = plain.get(source) {
            let targets: Vec<&str> = targets.iter().map(String::as_str).collect();
            FanOutCollapsed {
                node_id: source,
                kept,
                dropped: &targets,
            }
            .log();
        }
    }

    plain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_workflow_yaml;

    fn graph(yaml: &str) -> Graph {
        Graph::from_config(&parse_workflow_yaml(yaml).unwrap()).unwrap()
    }

    fn edge_list(resolved: &ResolvedEdges) -> Vec<(&str, &str)> {
        resolved
            .edges
            .iter()
            .map(|(s, t)| (s.as_str(), t.as_str()))
            .collect()
    }

    #[test]
    fn input_is_redirected_through_retrieval() {
        let resolved = resolve(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: rag, type: rag-documents }
  - { id: llm, type: ai-model }
  - { id: out, type: text-output }
connections:
  - { sourceNodeId: in, targetNodeId: llm, targetPortId: in }
  - { sourceNodeId: rag, targetNodeId: llm, targetPortId: context }
  - { sourceNodeId: llm, targetNodeId: out }
"#,
        ));
        assert_eq!(
            edge_list(&resolved),
            vec![("in", "rag"), ("llm", "out"), ("rag", "llm")]
        );
        assert_eq!(
            resolved.rewritten,
            BTreeSet::from([("in".to_string(), "llm".to_string())])
        );
    }

    #[test]
    fn retrieval_runs_before_spreadsheet() {
        let resolved = resolve(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: sheet, type: google-sheets }
  - { id: rag, type: rag-documents }
  - { id: llm, type: ai-model }
connections:
  - { sourceNodeId: in, targetNodeId: llm }
  - { sourceNodeId: sheet, targetNodeId: llm, targetPortId: context }
  - { sourceNodeId: rag, targetNodeId: llm, targetPortId: context }
"#,
        ));
        assert_eq!(
            edge_list(&resolved),
            vec![("in", "rag"), ("rag", "sheet"), ("sheet", "llm")]
        );
        assert_eq!(resolved.rewritten.len(), 2);
        assert!(resolved
            .rewritten
            .contains(&("rag".to_string(), "llm".to_string())));
    }

    #[test]
    fn existing_chain_is_left_alone() {
        let resolved = resolve(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: rag, type: rag-documents }
  - { id: llm, type: ai-model }
connections:
  - { sourceNodeId: in, targetNodeId: rag }
  - { sourceNodeId: rag, targetNodeId: llm }
"#,
        ));
        assert_eq!(edge_list(&resolved), vec![("in", "rag"), ("rag", "llm")]);
        assert!(resolved.rewritten.is_empty());
    }

    #[test]
    fn redirected_edge_merges_with_existing_one() {
        let resolved = resolve(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: rag, type: rag-documents }
  - { id: llm, type: ai-model }
connections:
  - { sourceNodeId: in, targetNodeId: rag }
  - { sourceNodeId: in, targetNodeId: llm }
  - { sourceNodeId: rag, targetNodeId: llm }
"#,
        ));
        assert_eq!(edge_list(&resolved), vec![("in", "rag"), ("rag", "llm")]);
    }

    #[test]
    fn fan_out_keeps_first_declared_edge() {
        let resolved = resolve(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: a, type: text-output }
  - { id: b, type: text-output }
connections:
  - { sourceNodeId: in, targetNodeId: b }
  - { sourceNodeId: in, targetNodeId: a }
"#,
        ));
        assert_eq!(edge_list(&resolved), vec![("in", "b")]);
    }

    #[test]
    fn conditional_edges_are_untouched() {
        let resolved = resolve(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: check, type: if-condition }
  - { id: rag, type: rag-documents }
  - { id: llm, type: ai-model }
connections:
  - { sourceNodeId: in, targetNodeId: check }
  - { sourceNodeId: check, sourcePortId: "true", targetNodeId: llm }
  - { sourceNodeId: rag, targetNodeId: llm }
"#,
        ));
        assert_eq!(edge_list(&resolved), vec![("in", "check"), ("rag", "llm")]);
        assert!(resolved.rewritten.is_empty());
    }

    #[test]
    fn shared_retrieval_feeding_chained_models_stays_acyclic() {
        let resolved = resolve(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: rag, type: rag-documents }
  - { id: llm1, type: ai-model }
  - { id: llm2, type: ai-model }
  - { id: out, type: text-output }
connections:
  - { sourceNodeId: in, targetNodeId: llm1, targetPortId: in }
  - { sourceNodeId: rag, targetNodeId: llm1, targetPortId: context }
  - { sourceNodeId: rag, targetNodeId: llm2, targetPortId: context }
  - { sourceNodeId: llm1, targetNodeId: llm2, targetPortId: in }
  - { sourceNodeId: llm2, targetNodeId: out }
"#,
        ));
        assert_eq!(
            edge_list(&resolved),
            vec![
                ("in", "rag"),
                ("llm1", "llm2"),
                ("llm2", "out"),
                ("rag", "llm1")
            ]
        );
        assert_eq!(
            resolved.rewritten,
            BTreeSet::from([("in".to_string(), "llm1".to_string())])
        );
    }

    #[test]
    fn producer_on_data_port_is_not_redirected() {
        let resolved = resolve(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: rag, type: rag-documents }
  - { id: llm, type: ai-model }
connections:
  - { sourceNodeId: in, targetNodeId: llm, targetPortId: in }
  - { sourceNodeId: rag, targetNodeId: llm, targetPortId: in }
"#,
        ));
        assert_eq!(edge_list(&resolved), vec![("in", "llm"), ("rag", "llm")]);
        assert!(resolved.rewritten.is_empty());
    }

    #[test]
    fn redirect_that_would_close_a_loop_is_skipped() {
        let resolved = resolve(&graph(
            r#"
nodes:
  - { id: rag, type: rag-documents }
  - { id: in, type: text-input }
  - { id: llm, type: ai-model }
connections:
  - { sourceNodeId: rag, targetNodeId: in }
  - { sourceNodeId: in, targetNodeId: llm, targetPortId: in }
  - { sourceNodeId: rag, targetNodeId: llm, targetPortId: context }
"#,
        ));
        assert_eq!(edge_list(&resolved), vec![("in", "llm"), ("rag", "in")]);
        assert!(resolved.rewritten.is_empty());
    }
}
