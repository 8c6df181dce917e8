// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt;

use crate::config::{Connection, PortRole};

/// Where traversal goes next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RouteTarget {
    Node(String),
    End,
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTarget::Node(id) => f.write_str(id),
            RouteTarget::End => f.write_str("END"),
        }
    }
}

/// Routing table of one conditional node.
///
/// Targets keep connection declaration order. Connections leaving the node through a port
/// that is neither a true nor a false port do not take part in routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchRouter {
    pub node_id: String,
    pub true_targets: Vec<String>,
    pub false_targets: Vec<String>,
}

impl BranchRouter {
    pub fn from_connections<'a>(
        node_id: &str,
        outgoing: impl IntoIterator<Item = &'a Connection>,
    ) -> Self {
        let mut router = Self {
            node_id: node_id.to_string(),
            true_targets: Vec::new(),
            false_targets: Vec::new(),
        };
        for connection in outgoing {
            match connection.source_role {
                PortRole::True => router.true_targets.push(connection.target.clone()),
                PortRole::False => router.false_targets.push(connection.target.clone()),
                PortRole::Data | PortRole::Context => {}
            }
        }
        router
    }

    /// Pick the successor for a condition result.
    ///
    /// The branch matching the result wins. A result whose branch is unwired falls back to
    /// the other branch (true list first), and a router with nothing wired ends the turn.
    pub fn route(&self, result: bool) -> RouteTarget {
        let preferred = if result {
            &self.true_targets
        } else {
            &self.false_targets
        };

        preferred
            .first()
            .or_else(|| self.true_targets.first())
            .or_else(|| self.false_targets.first())
            .map(|id| RouteTarget::Node(id.clone()))
            .unwrap_or(RouteTarget::End)
    }

    /// Every node this router can reach
    pub fn targets(&self) -> impl Iterator<Item = &String> {
        self.true_targets.iter().chain(self.false_targets.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router(true_targets: &[&str], false_targets: &[&str]) -> BranchRouter {
        BranchRouter {
            node_id: "check".to_string(),
            true_targets: true_targets.iter().map(|s| s.to_string()).collect(),
            false_targets: false_targets.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn follows_matching_branch() {
        let r = router(&["yes-out", "yes-other"], &["no-out"]);
        assert_eq!(r.route(true), RouteTarget::Node("yes-out".into()));
        assert_eq!(r.route(false), RouteTarget::Node("no-out".into()));
    }

    #[test]
    fn falls_back_to_wired_branch() {
        let only_true = router(&["a"], &[]);
        assert_eq!(only_true.route(false), RouteTarget::Node("a".into()));

        let only_false = router(&[], &["b"]);
        assert_eq!(only_false.route(true), RouteTarget::Node("b".into()));
    }

    #[test]
    fn unwired_router_ends() {
        let r = router(&[], &[]);
        assert_eq!(r.route(true), RouteTarget::End);
        assert_eq!(r.route(false), RouteTarget::End);
        assert_eq!(RouteTarget::End.to_string(), "END");
    }

    #[test]
    fn partitions_connections_by_port_role() {
        let conn = |target: &str, role: PortRole| Connection {
            id: format!("to-{}", target),
            source: "check".into(),
            source_port: String::new(),
            source_role: role,
            target: target.into(),
            target_port: "in".into(),
            target_role: PortRole::Data,
        };
        let connections = vec![
            conn("b", PortRole::False),
            conn("ignored", PortRole::Data),
            conn("a", PortRole::True),
            conn("c", PortRole::False),
        ];

        let r = BranchRouter::from_connections("check", &connections);
        assert_eq!(r.true_targets, vec!["a"]);
        assert_eq!(r.false_targets, vec!["b", "c"]);
        assert_eq!(r.targets().count(), 3);
    }
}
