// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Workflow compiler: turns a `Graph` into a `CompiledPlan`.
//!
//! Compilation is pure and deterministic. It resolves the entry node, rewrites the literal
//! connections into a single-successor edge set (see `resolver`), and turns every conditional
//! node into a `BranchRouter`.
//!
//! # Examples
//!
//! ```rust
//! use the_switchboard::compiler::compile;
//! use the_switchboard::config::{parse_workflow_json, Graph};
//!
//! let cfg = parse_workflow_json(r#"{
//!   "nodes": [
//!     {"id": "in", "type": "text-input"},
//!     {"id": "rag", "type": "rag-documents"},
//!     {"id": "llm", "type": "ai-model"},
//!     {"id": "out", "type": "text-output"}
//!   ],
//!   "connections": [
//!     {"sourceNodeId": "in", "targetNodeId": "llm", "targetPortId": "in"},
//!     {"sourceNodeId": "rag", "targetNodeId": "llm", "targetPortId": "context"},
//!     {"sourceNodeId": "llm", "targetNodeId": "out"}
//!   ]
//! }"#).unwrap();
//!
//! let plan = compile(&Graph::from_config(&cfg).unwrap()).unwrap();
//! assert_eq!(plan.entry, "in");
//! assert_eq!(plan.edges["in"], "rag");
//! assert_eq!(plan.edges["rag"], "llm");
//! ```

pub mod branch;
pub mod plan;
pub mod resolver;

pub use branch::{BranchRouter, RouteTarget};
pub use plan::CompiledPlan;

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{EntryPoints, Graph, NodeKind, WorkflowConfig};
use crate::errors::GraphError;
use crate::observability::messages::compiler::PlanCompiled;
use crate::observability::messages::StructuredLog;

/// Compile a graph into an executable plan.
pub fn compile(graph: &Graph) -> Result<CompiledPlan, GraphError> {
    let entry = EntryPoints::resolve(graph)
        .primary()
        .map(str::to_string)
        .ok_or(GraphError::EmptyGraph)?;

    let resolved = resolver::resolve(graph);

    let routers: BTreeMap<String, BranchRouter> = graph
        .nodes()
        .iter()
        .filter(|n| n.kind == NodeKind::Conditional)
        .map(|n| {
            (
                n.id.clone(),
                BranchRouter::from_connections(&n.id, graph.outgoing(&n.id)),
            )
        })
        .collect();

    let exits: BTreeSet<String> = graph
        .nodes()
        .iter()
        .filter(|n| n.kind != NodeKind::Conditional && !resolved.edges.contains_key(&n.id))
        .map(|n| n.id.clone())
        .collect();

    let plan = CompiledPlan {
        entry,
        nodes: graph
            .nodes()
            .iter()
            .map(|n| (n.id.clone(), n.clone()))
            .collect(),
        edges: resolved.edges,
        routers,
        exits,
        rewritten_edges: resolved.rewritten,
    };

    PlanCompiled {
        entry: &plan.entry,
        node_count: plan.len(),
        edge_count: plan.edges.len(),
        router_count: plan.routers.len(),
        rewritten_count: plan.rewritten_edges.len(),
    }
    .log();

    Ok(plan)
}

/// Build the graph for a wire description and compile it
pub fn compile_workflow(cfg: &WorkflowConfig) -> Result<CompiledPlan, GraphError> {
    compile(&Graph::from_config(cfg)?)
}
