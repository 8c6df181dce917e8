// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::ProcessorError;
use crate::traits::{ChatCompletion, ChatModel, CompletionRequest};

/// Model id reported by the demo chat model
pub const DEMO_MODEL_ID: &str = "mock";

/// Chat model used when no provider is configured; echoes the user's message.
pub struct DemoChatModel;

impl DemoChatModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DemoChatModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatModel for DemoChatModel {
    async fn complete(&self, request: CompletionRequest) -> Result<ChatCompletion, ProcessorError> {
        Ok(ChatCompletion {
            content: format!("[Demo Mode - No API Key] Received: {}", request.query),
            model: DEMO_MODEL_ID.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "demo_chat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChatTurn;

    #[tokio::test]
    async fn echoes_the_raw_query() {
        let completion = DemoChatModel::new()
            .complete(CompletionRequest {
                model: "gpt-4o-mini".to_string(),
                temperature: 0.7,
                messages: vec![ChatTurn::user("ctx\n\nUser query: hello")],
                query: "hello".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(completion.content, "[Demo Mode - No API Key] Received: hello");
        assert_eq!(completion.model, "mock");
    }
}
