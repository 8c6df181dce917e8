// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::backends::local::{Collaborators, LocalProcessorFactory};
use crate::compiler::compile_workflow;
use crate::config::{EngineConfig, WorkflowConfig};
use crate::engine::SequentialExecutor;
use crate::errors::WorkflowError;
use crate::observability::messages::engine::RequestCompleted;
use crate::observability::messages::StructuredLog;
use crate::state::{ChatTurn, ExecutionResult, ExecutionState};
use crate::traits::PlanExecutor;

/// One conversational turn against a workflow description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Result of a turn. Always produced, even when the workflow could not run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub model_used: Option<String>,
    pub processing_time_ms: f64,
    #[serde(default)]
    pub nodes_executed: Vec<String>,
}

/// Workflow runtime builder - pairs the local processors with an executor.
///
/// # Examples
///
/// ```
/// use the_switchboard::config::{parse_workflow_json, EngineConfig, RuntimeBuilder};
///
/// let runtime = RuntimeBuilder::from_config(&EngineConfig::default());
/// let workflow = parse_workflow_json(r#"{
///   "nodes": [
///     {"id": "in", "type": "text-input"},
///     {"id": "llm", "type": "ai-model"},
///     {"id": "out", "type": "text-output"}
///   ],
///   "connections": [
///     {"sourceNodeId": "in", "targetNodeId": "llm"},
///     {"sourceNodeId": "llm", "targetNodeId": "out"}
///   ]
/// }"#).unwrap();
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let result = rt.block_on(runtime.run(&workflow, "hello", vec![])).unwrap();
/// assert_eq!(result.nodes_executed, vec!["text-input", "ai-model", "text-output"]);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Runtime backed by the credential-free demo collaborators
    pub fn from_config(cfg: &EngineConfig) -> WorkflowRuntime {
        Self::with_collaborators(cfg, Collaborators::demo())
    }

    pub fn with_collaborators(cfg: &EngineConfig, collaborators: Collaborators) -> WorkflowRuntime {
        let processors = LocalProcessorFactory::create_processors(cfg, collaborators);
        WorkflowRuntime::new(Box::new(SequentialExecutor::from_config(processors, cfg)))
    }
}

/// Compiles a workflow per request and runs it.
pub struct WorkflowRuntime {
    executor: Box<dyn PlanExecutor>,
}

impl WorkflowRuntime {
    pub fn new(executor: Box<dyn PlanExecutor>) -> Self {
        Self { executor }
    }

    /// Compile and execute one turn.
    ///
    /// # Errors
    /// `WorkflowError::Build` for a malformed description, `WorkflowError::Execution` when the
    /// traversal cannot finish. Node failures are not errors; they show up in the response.
    pub async fn run(
        &self,
        workflow: &WorkflowConfig,
        message: &str,
        history: Vec<ChatTurn>,
    ) -> Result<ExecutionResult, WorkflowError> {
        let plan = compile_workflow(workflow)?;
        let state = self
            .executor
            .execute(&plan, ExecutionState::new(message, history))
            .await?;
        Ok(state.into_result())
    }

    /// Answer a chat request; failures become the response text.
    pub async fn respond(&self, request: ChatRequest) -> ChatResponse {
        let started = Instant::now();

        let outcome = self
            .run(
                &request.workflow,
                &request.message,
                request.conversation_history,
            )
            .await;

        let (response, model_used, nodes_executed) = match outcome {
            Ok(result) => (result.response, result.model_used, result.nodes_executed),
            Err(error) => (error.to_string(), None, Vec::new()),
        };
        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        RequestCompleted {
            session_id: request.session_id.as_deref(),
            model_used: model_used.as_deref(),
            processing_time_ms,
        }
        .log();

        ChatResponse {
            response,
            model_used,
            processing_time_ms,
            nodes_executed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_workflow_json;

    fn request(workflow: &str, message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            workflow: parse_workflow_json(workflow).unwrap(),
            conversation_history: vec![],
            session_id: Some("s-1".to_string()),
        }
    }

    #[tokio::test]
    async fn malformed_workflow_becomes_build_error_response() {
        let runtime = RuntimeBuilder::from_config(&EngineConfig::default());
        let response = runtime
            .respond(request(
                r#"{"nodes": [{"id": "x", "type": "teleporter"}], "connections": []}"#,
                "hi",
            ))
            .await;

        assert!(response.response.starts_with("Error building workflow: "));
        assert!(response.nodes_executed.is_empty());
        assert_eq!(response.model_used, None);
        assert!(response.processing_time_ms >= 0.0);
    }

    #[tokio::test]
    async fn cyclic_workflow_becomes_execution_error_response() {
        let runtime = RuntimeBuilder::from_config(&EngineConfig::default());
        let response = runtime
            .respond(request(
                r#"{
                  "nodes": [{"id": "a", "type": "text-input"}, {"id": "b", "type": "ai-model"}],
                  "connections": [
                    {"sourceNodeId": "a", "targetNodeId": "b"},
                    {"sourceNodeId": "b", "targetNodeId": "a"}
                  ]
                }"#,
                "hi",
            ))
            .await;

        assert!(response.response.starts_with("Error executing workflow: Cyclic workflow"));
        assert!(response.nodes_executed.is_empty());
    }

    #[test]
    fn chat_request_reads_snake_case_envelope() {
        let req: ChatRequest = serde_json::from_str(
            r#"{
              "message": "hi",
              "workflow": {"nodes": [], "connections": []},
              "conversation_history": [{"role": "user", "content": "earlier"}]
            }"#,
        )
        .unwrap();

        assert_eq!(req.conversation_history, vec![ChatTurn::user("earlier")]);
        assert_eq!(req.session_id, None);
    }
}
