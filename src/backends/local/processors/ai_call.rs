// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use crate::config::settings::AiSection;
use crate::config::Node;
use crate::errors::ProcessorError;
use crate::observability::messages::processor::ChatModelInvoked;
use crate::observability::messages::StructuredLog;
use crate::state::{ChatRole, ChatTurn, ExecutionState};
use crate::traits::{ChatModel, CompletionRequest, NodeProcessor};

/// Calls a chat model with the conversation so far plus any gathered context.
///
/// Node options: `modelName`, `systemPrompt`, `temperature`, `expectedOutput`,
/// `outputVariableName`. Writes `response`, `model_used` and, when named, an output variable.
pub struct AiCallProcessor {
    model: Arc<dyn ChatModel>,
    defaults: AiSection,
}

impl AiCallProcessor {
    pub fn new(model: Arc<dyn ChatModel>, defaults: AiSection) -> Self {
        Self { model, defaults }
    }

    fn request(
        &self,
        state: &ExecutionState,
        node: &Node,
    ) -> Result<CompletionRequest, ProcessorError> {
        let mut system_prompt = node
            .option_str("systemPrompt")
            .unwrap_or(self.defaults.default_system_prompt.as_str())
            .to_string();
        if let Some(format) = node.option_str("expectedOutput") {
            system_prompt.push_str(&format!(
                "\n\nIMPORTANT: Your response MUST follow this format: {}",
                format
            ));
        }

        let mut messages = vec![ChatTurn::system(system_prompt)];
        messages.extend(
            state
                .history()
                .iter()
                .filter(|turn| matches!(turn.role, ChatRole::User | ChatRole::Assistant))
                .cloned(),
        );
        messages.push(ChatTurn::user(user_content(state)));

        Ok(CompletionRequest {
            model: node
                .option_str("modelName")
                .unwrap_or(self.defaults.default_model.as_str())
                .to_string(),
            temperature: self.temperature(node)?,
            messages,
            query: state.message().to_string(),
        })
    }

    /// `temperature` option, which must be a number in `0..=2` when set
    fn temperature(&self, node: &Node) -> Result<f64, ProcessorError> {
        match node.option("temperature") {
            None | Some(serde_json::Value::Null) => Ok(self.defaults.default_temperature),
            Some(value) => value
                .as_f64()
                .filter(|t| (0.0..=2.0).contains(t))
                .ok_or_else(|| ProcessorError::InvalidOption {
                    option: "temperature".to_string(),
                    message: format!("expected a number between 0 and 2, got {}", value),
                }),
        }
    }
}

/// The final user turn: available context blocks, then the query.
fn user_content(state: &ExecutionState) -> String {
    let mut context_parts = Vec::new();
    if let Some(text) = state.retrieval_context.as_ref().and_then(|s| s.available()) {
        context_parts.push(format!("Relevant context from documents:\n{}", text));
    }
    if let Some(text) = state.spreadsheet_context.as_ref().and_then(|s| s.available()) {
        context_parts.push(format!("Data from spreadsheet:\n{}", text));
    }

    if context_parts.is_empty() {
        state.message().to_string()
    } else {
        format!("{}\n\nUser query: {}", context_parts.join("\n"), state.message())
    }
}

#[async_trait]
impl NodeProcessor for AiCallProcessor {
    async fn process(&self, state: &mut ExecutionState, node: &Node) -> Result<(), ProcessorError> {
        let request = self.request(state, node)?;
        let requested_model = request.model.clone();
        let timeout = self.defaults.timeout();
        let started = Instant::now();

        let completion = tokio::time::timeout(timeout, self.model.complete(request))
            .await
            .map_err(|_| ProcessorError::Timeout {
                collaborator: self.model.name().to_string(),
                timeout,
            })??;
        if completion.content.trim().is_empty() {
            return Err(ProcessorError::MalformedResponse {
                collaborator: self.model.name().to_string(),
                message: "empty completion".to_string(),
            });
        }

        ChatModelInvoked {
            node_id: &node.id,
            model: &requested_model,
            history_turns: state.history().len(),
            duration: started.elapsed(),
        }
        .log();

        if let Some(variable) = node.option_str("outputVariableName") {
            state
                .output_variables
                .insert(variable.to_string(), completion.content.clone());
        }
        state.response = completion.content;
        state.model_used = Some(completion.model);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ai_call"
    }
}
