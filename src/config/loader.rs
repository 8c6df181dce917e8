// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Workflow description as submitted by the editor.
///
/// This is the untyped wire form: node types and port roles are plain strings here and are
/// checked when the description is turned into a `Graph`.
///
/// # Example
/// ```json
/// {
///   "nodes": [
///     { "id": "in",  "type": "text-input" },
///     { "id": "llm", "type": "ai-model", "data": { "modelName": "gpt-4o-mini" } },
///     { "id": "out", "type": "text-output" }
///   ],
///   "connections": [
///     { "id": "c1", "sourceNodeId": "in",  "sourcePortId": "out", "targetNodeId": "llm", "targetPortId": "in" },
///     { "id": "c2", "sourceNodeId": "llm", "sourcePortId": "out", "targetNodeId": "out", "targetPortId": "in" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WorkflowConfig {
    pub nodes: Vec<NodeConfig>,
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
}

/// A single node of the workflow description.
///
/// `data` holds the node's options (model name, prompt, condition type, ...). The compiler
/// never looks inside it; node processors do.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub inputs: Vec<PortConfig>,
    #[serde(default)]
    pub outputs: Vec<PortConfig>,
}

/// A named attachment point on a node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PortConfig {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Explicit role ("context", "true", "false", "data"); inferred from the id when absent
    #[serde(default)]
    pub role: Option<String>,
}

/// A directed connection between two ports.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    #[serde(default)]
    pub id: Option<String>,
    pub source_node_id: String,
    #[serde(default)]
    pub source_port_id: String,
    pub target_node_id: String,
    #[serde(default)]
    pub target_port_id: String,
}

/// Parse a workflow description from a JSON string
pub fn parse_workflow_json(content: &str) -> Result<WorkflowConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a workflow description from a YAML string
pub fn parse_workflow_yaml(content: &str) -> Result<WorkflowConfig, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Load a workflow description from a `.json`, `.yaml` or `.yml` file
pub fn load_workflow<P: AsRef<Path>>(path: P) -> Result<WorkflowConfig, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_workflow_json(&content),
        Some("yaml") | Some("yml") => parse_workflow_yaml(&content),
        _ => Err(ConfigError::UnsupportedFormat(display)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_editor_payload() {
        let json = r#"
{
  "nodes": [
    { "id": "in", "type": "text-input", "position": { "x": 0, "y": 0 } },
    { "id": "llm", "type": "ai-model", "data": { "modelName": "gpt-4o", "temperature": 0.2 },
      "inputs": [ { "id": "in", "label": "Input" }, { "id": "context", "label": "Context" } ] },
    { "id": "out", "type": "text-output" }
  ],
  "connections": [
    { "id": "c1", "sourceNodeId": "in", "sourcePortId": "out", "targetNodeId": "llm", "targetPortId": "in" },
    { "id": "c2", "sourceNodeId": "llm", "sourcePortId": "out", "targetNodeId": "out", "targetPortId": "in" }
  ]
}
"#;
        let cfg = parse_workflow_json(json).unwrap();
        assert_eq!(cfg.nodes.len(), 3);
        assert_eq!(cfg.nodes[1].kind, "ai-model");
        assert_eq!(cfg.nodes[1].inputs.len(), 2);
        assert_eq!(cfg.nodes[1].data["modelName"], "gpt-4o");
        assert_eq!(cfg.connections[1].source_node_id, "llm");
        assert_eq!(cfg.connections[0].id.as_deref(), Some("c1"));
    }

    #[test]
    fn parse_yaml_with_defaults() {
        let yaml = r#"
nodes:
  - id: in
    type: text-input
  - id: out
    type: text-output
connections:
  - sourceNodeId: in
    targetNodeId: out
"#;
        let cfg = parse_workflow_yaml(yaml).unwrap();
        assert_eq!(cfg.connections.len(), 1);
        assert_eq!(cfg.connections[0].source_port_id, "");
        assert!(cfg.connections[0].id.is_none());
        assert!(cfg.nodes[0].data.is_empty());
    }

    #[test]
    fn load_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "nodes:\n  - id: only\n    type: text-input").unwrap();

        let cfg = load_workflow(file.path()).unwrap();
        assert_eq!(cfg.nodes[0].id, "only");
    }

    #[test]
    fn reject_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();
        let err = load_workflow(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_workflow("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
