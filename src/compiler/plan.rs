// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::compiler::branch::{BranchRouter, RouteTarget};
use crate::config::Node;

/// Executable form of a workflow graph.
///
/// Ordered collections only, so two compilations of the same graph compare equal and
/// serialize identically. A node has either one plain edge, a router, or neither (an exit).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledPlan {
    pub entry: String,
    pub nodes: BTreeMap<String, Node>,
    /// Plain successor of each non-conditional node that has one
    pub edges: BTreeMap<String, String>,
    pub routers: BTreeMap<String, BranchRouter>,
    /// Non-conditional nodes without a successor; reaching one ends the turn
    pub exits: BTreeSet<String>,
    /// Literal connections `(source, target)` replaced by the resolver
    pub rewritten_edges: BTreeSet<(String, String)>,
}

impl CompiledPlan {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Successor of a non-conditional node
    pub fn next_after(&self, id: &str) -> RouteTarget {
        self.edges
            .get(id)
            .map(|target| RouteTarget::Node(target.clone()))
            .unwrap_or(RouteTarget::End)
    }

    pub fn router(&self, id: &str) -> Option<&BranchRouter> {
        self.routers.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
