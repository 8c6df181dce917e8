// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod dependency_graph;
mod entry_points;
mod loader;
mod modality;
mod processor_map;
mod runtime;
mod validation;

pub mod consts;
pub mod graph;
pub mod settings;

pub use dependency_graph::DependencyGraph;
pub use entry_points::EntryPoints;
pub use graph::{Connection, Graph, Modality, Node, NodeKind, Port, PortRole};
pub use loader::{
    load_workflow, parse_workflow_json, parse_workflow_yaml, ConnectionConfig, NodeConfig,
    PortConfig, WorkflowConfig,
};
pub use modality::{detect_modality, ModalityReport};
pub use processor_map::ProcessorMap;
pub use runtime::{ChatRequest, ChatResponse, RuntimeBuilder, WorkflowRuntime};
pub use settings::{load_engine_config, EngineConfig};
pub use validation::{validate_workflow, ValidationReport};
