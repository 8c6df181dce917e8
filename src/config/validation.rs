// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Advisory structural validation of a workflow graph.
//!
//! Validation never blocks execution: a workflow with issues still compiles and runs, and the
//! report is meant for the editor to show its author. Two tiers are reported:
//!
//! * **issues** decide `valid`: a missing input, output or ai-call node, and orphan nodes
//!   (nodes no connection touches, only reported when the workflow has more than one node);
//! * **warnings** do not: conditional nodes with an unwired branch (the router falls back to
//!   the other branch or ends the turn) and cycles (execution fails once the visit budget is
//!   exhausted).
//!
//! # Examples
//!
//! ```rust
//! use the_switchboard::config::{parse_workflow_yaml, validate_workflow, Graph};
//!
//! let cfg = parse_workflow_yaml(r#"
//! nodes:
//!   - { id: in, type: text-input }
//!   - { id: out, type: text-output }
//! connections:
//!   - { sourceNodeId: in, targetNodeId: out }
//! "#).unwrap();
//! let graph = Graph::from_config(&cfg).unwrap();
//!
//! let report = validate_workflow(&graph);
//! assert!(!report.valid);
//! assert_eq!(report.issues, vec!["Workflow needs an AI model node".to_string()]);
//! ```

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::config::graph::{Graph, NodeKind, PortRole};
use crate::config::DependencyGraph;
use crate::observability::messages::validation::{
    CyclicConnectionDetected, ValidationCompleted, ValidationIssueFound,
};
use crate::observability::messages::StructuredLog;

/// Result of validating a workflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub node_count: usize,
    pub connection_count: usize,
    /// Distinct node type tags, sorted
    pub node_types: Vec<String>,
}

/// Validate a workflow graph. Pure apart from logging; never fails.
pub fn validate_workflow(graph: &Graph) -> ValidationReport {
    let mut issues = required_kind_issues(graph);
    issues.extend(orphan_issue(graph));

    let mut warnings = unwired_branch_warnings(graph);
    warnings.extend(cycle_warning(graph));

    for issue in issues.iter().chain(warnings.iter()) {
        ValidationIssueFound {
            issue: issue.as_str(),
        }
        .log();
    }

    let node_types: BTreeSet<&str> = graph.nodes().iter().map(|n| n.kind.tag()).collect();

    let report = ValidationReport {
        valid: issues.is_empty(),
        issues,
        warnings,
        node_count: graph.len(),
        connection_count: graph.connections().len(),
        node_types: node_types.into_iter().map(str::to_string).collect(),
    };

    ValidationCompleted {
        valid: report.valid,
        node_count: report.node_count,
        issue_count: report.issues.len(),
        warning_count: report.warnings.len(),
    }
    .log();

    report
}

fn required_kind_issues(graph: &Graph) -> Vec<String> {
    let mut issues = Vec::new();
    if !graph.has_kind(NodeKind::is_input) {
        issues.push("Workflow needs an input node (text-input or voice-input)".to_string());
    }
    if !graph.has_kind(NodeKind::is_output) {
        issues.push("Workflow needs an output node (text-output or voice-output)".to_string());
    }
    if !graph.has_kind(|k| *k == NodeKind::AiCall) {
        issues.push("Workflow needs an AI model node".to_string());
    }
    issues
}

fn orphan_issue(graph: &Graph) -> Option<String> {
    if graph.len() <= 1 {
        return None;
    }

    let connected: HashSet<&str> = graph
        .connections()
        .iter()
        .flat_map(|c| [c.source.as_str(), c.target.as_str()])
        .collect();

    let orphans: Vec<String> = graph
        .nodes()
        .iter()
        .filter(|n| !connected.contains(n.id.as_str()))
        .map(|n| format!("'{}'", n.id))
        .collect();

    if orphans.is_empty() {
        None
    } else {
        Some(format!("Orphan nodes (not connected): [{}]", orphans.join(", ")))
    }
}

fn unwired_branch_warnings(graph: &Graph) -> Vec<String> {
    graph
        .nodes()
        .iter()
        .filter(|n| n.kind == NodeKind::Conditional)
        .filter_map(|n| {
            let roles: Vec<PortRole> = graph.outgoing(&n.id).map(|c| c.source_role).collect();
            let has_true = roles.contains(&PortRole::True);
            let has_false = roles.contains(&PortRole::False);
            match (has_true, has_false) {
                (true, true) => None,
                (true, false) => Some(format!(
                    "Condition node '{}' has no false branch; a false result follows the true branch",
                    n.id
                )),
                (false, true) => Some(format!(
                    "Condition node '{}' has no true branch; a true result follows the false branch",
                    n.id
                )),
                (false, false) => Some(format!(
                    "Condition node '{}' has no true or false branch wired; the turn ends after it",
                    n.id
                )),
            }
        })
        .collect()
}

fn cycle_warning(graph: &Graph) -> Option<String> {
    let successors = DependencyGraph::successors(graph);
    let cycle = successors.find_cycle(graph.nodes().iter().map(|n| n.id.as_str()))?;
    let message = CyclicConnectionDetected { cycle: &cycle };
    message.log();
    Some(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_workflow_yaml;

    fn graph(yaml: &str) -> Graph {
        Graph::from_config(&parse_workflow_yaml(yaml).unwrap()).unwrap()
    }

    #[test]
    fn complete_linear_workflow_is_valid() {
        let report = validate_workflow(&graph(
            r#"
nodes:
  - { id: in, type: voice-input }
  - { id: llm, type: ai-model }
  - { id: out, type: text-output }
connections:
  - { sourceNodeId: in, targetNodeId: llm }
  - { sourceNodeId: llm, targetNodeId: out }
"#,
        ));
        assert!(report.valid);
        assert!(report.issues.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.node_count, 3);
        assert_eq!(report.connection_count, 2);
        assert_eq!(report.node_types, vec!["ai-model", "text-output", "voice-input"]);
    }

    #[test]
    fn missing_ai_node_is_exactly_one_issue() {
        let report = validate_workflow(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: out, type: text-output }
connections:
  - { sourceNodeId: in, targetNodeId: out }
"#,
        ));
        assert!(!report.valid);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("AI model node"));
    }

    #[test]
    fn reports_orphans_in_declaration_order() {
        let report = validate_workflow(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: stray, type: google-sheets }
  - { id: llm, type: ai-model }
  - { id: lost, type: rag-documents }
  - { id: out, type: text-output }
connections:
  - { sourceNodeId: in, targetNodeId: llm }
  - { sourceNodeId: llm, targetNodeId: out }
"#,
        ));
        assert_eq!(
            report.issues,
            vec!["Orphan nodes (not connected): ['stray', 'lost']".to_string()]
        );
    }

    #[test]
    fn single_node_is_never_an_orphan() {
        let report = validate_workflow(&graph("nodes:\n  - { id: llm, type: ai-model }\n"));
        assert_eq!(report.issues.len(), 2);
        assert!(report.issues.iter().all(|i| !i.starts_with("Orphan")));
    }

    #[test]
    fn half_wired_condition_is_a_warning_not_an_issue() {
        let report = validate_workflow(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: llm, type: ai-model }
  - { id: check, type: if-condition }
  - { id: out, type: text-output }
connections:
  - { sourceNodeId: in, targetNodeId: llm }
  - { sourceNodeId: llm, targetNodeId: check }
  - { sourceNodeId: check, sourcePortId: "true", targetNodeId: out }
"#,
        ));
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("no false branch"));
    }

    #[test]
    fn cycle_is_reported_as_warning() {
        let report = validate_workflow(&graph(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: llm, type: ai-model }
  - { id: out, type: text-output }
connections:
  - { sourceNodeId: in, targetNodeId: llm }
  - { sourceNodeId: llm, targetNodeId: out }
  - { sourceNodeId: out, targetNodeId: llm }
"#,
        ));
        assert!(report.valid);
        assert_eq!(
            report.warnings,
            vec!["Cyclic connection detected: llm -> out -> llm".to_string()]
        );
    }
}
