// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed in-memory model of a workflow: nodes, ports and connections.
//!
//! A `Graph` is built from a `WorkflowConfig` and is the only input the compiler, the
//! validator and the modality detector accept. Building one checks exactly the things that
//! would make the description meaningless:
//!
//! * every node type belongs to the supported set,
//! * node ids are unique,
//! * every connection points at existing nodes,
//! * explicit port roles are recognised.
//!
//! Everything else (missing output node, orphans, half-wired branches) is advisory and lives
//! in `validation`.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::config::loader::{NodeConfig, PortConfig, WorkflowConfig};
use crate::errors::GraphError;

/// Whether a pipeline endpoint is textual or spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Voice,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Text => write!(f, "text"),
            Modality::Voice => write!(f, "voice"),
        }
    }
}

/// The closed set of node kinds.
///
/// Input and output nodes carry their modality; a voice input behaves like a text input once
/// the transcript is in the execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Input(Modality),
    AiCall,
    Retrieval,
    Spreadsheet,
    Conditional,
    Output(Modality),
}

impl NodeKind {
    /// Every kind, in a stable order
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Input(Modality::Text),
        NodeKind::Input(Modality::Voice),
        NodeKind::AiCall,
        NodeKind::Retrieval,
        NodeKind::Spreadsheet,
        NodeKind::Conditional,
        NodeKind::Output(Modality::Text),
        NodeKind::Output(Modality::Voice),
    ];

    /// Parse an editor type name. Generic names map to the text variants.
    pub fn parse(type_name: &str) -> Option<Self> {
        let kind = match type_name.trim() {
            "text-input" | "input" => NodeKind::Input(Modality::Text),
            "voice-input" => NodeKind::Input(Modality::Voice),
            "ai-model" | "ai-call" => NodeKind::AiCall,
            "rag-documents" | "retrieval" => NodeKind::Retrieval,
            "google-sheets" | "spreadsheet" => NodeKind::Spreadsheet,
            "if-condition" | "conditional" => NodeKind::Conditional,
            "text-output" | "output" => NodeKind::Output(Modality::Text),
            "voice-output" => NodeKind::Output(Modality::Voice),
            _ => return None,
        };
        Some(kind)
    }

    /// Tag recorded in the execution log and reported by introspection
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Input(Modality::Text) => "text-input",
            NodeKind::Input(Modality::Voice) => "voice-input",
            NodeKind::AiCall => "ai-model",
            NodeKind::Retrieval => "rag-documents",
            NodeKind::Spreadsheet => "google-sheets",
            NodeKind::Conditional => "if-condition",
            NodeKind::Output(Modality::Text) => "text-output",
            NodeKind::Output(Modality::Voice) => "voice-output",
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, NodeKind::Input(_))
    }

    pub fn is_output(&self) -> bool {
        matches!(self, NodeKind::Output(_))
    }

    /// Retrieval and spreadsheet nodes fill a context slot read by ai-call nodes
    pub fn is_context_producer(&self) -> bool {
        matches!(self, NodeKind::Retrieval | NodeKind::Spreadsheet)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// Semantic role of a port, used only to classify connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortRole {
    Data,
    Context,
    True,
    False,
}

impl PortRole {
    /// Strict parse of an explicitly declared role
    pub fn parse(role: &str) -> Option<Self> {
        match role.trim().to_ascii_lowercase().as_str() {
            "data" | "default" | "" => Some(PortRole::Data),
            "context" => Some(PortRole::Context),
            "true" => Some(PortRole::True),
            "false" => Some(PortRole::False),
            _ => None,
        }
    }

    /// Role of an undeclared port, derived from its id (`"true-out"`, `"context"`, ...)
    pub fn infer(port_id: &str) -> Self {
        let lowered = port_id.to_ascii_lowercase();
        if lowered.contains("true") {
            PortRole::True
        } else if lowered.contains("false") {
            PortRole::False
        } else if lowered.contains("context") {
            PortRole::Context
        } else {
            PortRole::Data
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Port {
    pub id: String,
    pub label: Option<String>,
    pub role: PortRole,
}

/// A typed workflow node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub options: serde_json::Map<String, serde_json::Value>,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
}

impl Node {
    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.get(key)
    }

    /// String option; empty strings count as unset
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn option_f64(&self, key: &str) -> Option<f64> {
        self.options.get(key).and_then(|v| v.as_f64())
    }

    pub fn option_u64(&self, key: &str) -> Option<u64> {
        self.options.get(key).and_then(|v| v.as_u64())
    }

    fn role_of(ports: &[Port], port_id: &str) -> PortRole {
        ports
            .iter()
            .find(|p| p.id == port_id)
            .map(|p| p.role)
            .unwrap_or_else(|| PortRole::infer(port_id))
    }
}

/// A directed, classified connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub source_port: String,
    pub source_role: PortRole,
    pub target: String,
    pub target_port: String,
    pub target_role: PortRole,
}

/// Typed workflow graph. Nodes and connections keep their declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    index: HashMap<String, usize>,
}

impl Graph {
    /// Build a graph from its wire description.
    ///
    /// # Errors
    /// Returns `GraphError` for an empty description, an unknown node type, a duplicate node
    /// id, an unknown explicit port role, or a connection to a node that does not exist.
    pub fn from_config(cfg: &WorkflowConfig) -> Result<Self, GraphError> {
        if cfg.nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let mut nodes = Vec::with_capacity(cfg.nodes.len());
        let mut index = HashMap::with_capacity(cfg.nodes.len());
        for node_cfg in &cfg.nodes {
            let node = Self::build_node(node_cfg)?;
            if index.insert(node.id.clone(), nodes.len()).is_some() {
                return Err(GraphError::DuplicateNodeId { node_id: node.id });
            }
            nodes.push(node);
        }

        let mut connections = Vec::with_capacity(cfg.connections.len());
        for (position, conn) in cfg.connections.iter().enumerate() {
            let connection_id = conn
                .id
                .clone()
                .unwrap_or_else(|| format!("connection-{}", position));

            let source = index
                .get(&conn.source_node_id)
                .map(|&i| &nodes[i])
                .ok_or_else(|| GraphError::DanglingConnection {
                    connection_id: connection_id.clone(),
                    missing_node_id: conn.source_node_id.clone(),
                })?;
            let target = index
                .get(&conn.target_node_id)
                .map(|&i| &nodes[i])
                .ok_or_else(|| GraphError::DanglingConnection {
                    connection_id: connection_id.clone(),
                    missing_node_id: conn.target_node_id.clone(),
                })?;

            connections.push(Connection {
                id: connection_id,
                source: source.id.clone(),
                source_port: conn.source_port_id.clone(),
                source_role: Node::role_of(&source.outputs, &conn.source_port_id),
                target: target.id.clone(),
                target_port: conn.target_port_id.clone(),
                target_role: Node::role_of(&target.inputs, &conn.target_port_id),
            });
        }

        Ok(Self {
            nodes,
            connections,
            index,
        })
    }

    fn build_node(cfg: &NodeConfig) -> Result<Node, GraphError> {
        let kind = NodeKind::parse(&cfg.kind).ok_or_else(|| GraphError::UnknownNodeKind {
            node_id: cfg.id.clone(),
            type_name: cfg.kind.clone(),
        })?;

        let build_ports = |ports: &[PortConfig]| -> Result<Vec<Port>, GraphError> {
            ports
                .iter()
                .map(|p| {
                    let role = match &p.role {
                        Some(explicit) => {
                            PortRole::parse(explicit).ok_or_else(|| GraphError::UnknownPortRole {
                                node_id: cfg.id.clone(),
                                port_id: p.id.clone(),
                                role: explicit.clone(),
                            })?
                        }
                        None => PortRole::infer(&p.id),
                    };
                    Ok(Port {
                        id: p.id.clone(),
                        label: p.label.clone(),
                        role,
                    })
                })
                .collect()
        };

        Ok(Node {
            id: cfg.id.clone(),
            kind,
            options: cfg.data.clone(),
            inputs: build_ports(&cfg.inputs)?,
            outputs: build_ports(&cfg.outputs)?,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Declaration position of a node
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Connections leaving `id`, in declaration order
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |c| c.source == id)
    }

    /// Connections entering `id`, in declaration order
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |c| c.target == id)
    }

    pub fn has_kind(&self, predicate: impl Fn(&NodeKind) -> bool) -> bool {
        self.nodes.iter().any(|n| predicate(&n.kind))
    }
}

impl TryFrom<&WorkflowConfig> for Graph {
    type Error = GraphError;

    fn try_from(cfg: &WorkflowConfig) -> Result<Self, Self::Error> {
        Graph::from_config(cfg)
    }
}
