// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while turning a workflow description into a typed graph, and while loading
//! configuration files from disk.

use thiserror::Error;

/// The workflow description cannot be turned into a graph.
///
/// These are fatal and surface before any node runs. Advisory findings (missing output node,
/// orphans, unwired branches) are not errors; see `config::validate_workflow`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The description contains no nodes at all
    #[error("Workflow contains no nodes")]
    EmptyGraph,

    /// A node declares a type outside the supported set
    #[error("Node '{node_id}' has an unknown type: '{type_name}'")]
    UnknownNodeKind { node_id: String, type_name: String },

    /// Two nodes share the same identifier
    #[error("Duplicate node ID: '{node_id}'")]
    DuplicateNodeId { node_id: String },

    /// A connection points at a node that does not exist
    #[error(
        "Connection '{connection_id}' references node '{missing_node_id}' which does not exist"
    )]
    DanglingConnection {
        connection_id: String,
        missing_node_id: String,
    },

    /// A port declares an explicit role that is not recognised
    #[error("Port '{port_id}' on node '{node_id}' has an unknown role: '{role}'")]
    UnknownPortRole {
        node_id: String,
        port_id: String,
        role: String,
    },
}

/// Failures while reading workflow descriptions or engine settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON workflow: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML workflow: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid engine settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported workflow file extension for '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dangling_connection_names_both_ids() {
        let err = GraphError::DanglingConnection {
            connection_id: "c1".to_string(),
            missing_node_id: "ghost".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("c1"));
        assert!(msg.contains("'ghost' which does not exist"));
    }

    #[test]
    fn unknown_kind_message() {
        let err = GraphError::UnknownNodeKind {
            node_id: "n1".to_string(),
            type_name: "video-input".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Node 'n1' has an unknown type: 'video-input'"
        );
    }
}
