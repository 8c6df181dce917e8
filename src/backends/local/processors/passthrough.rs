// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::graph::Modality;
use crate::config::Node;
use crate::errors::ProcessorError;
use crate::state::ExecutionState;
use crate::traits::NodeProcessor;

/// Input and output nodes.
///
/// The user message is already in the state when traversal starts and the response is read
/// from it when traversal ends, so neither end of the conversation transforms anything.
pub struct PassthroughProcessor {
    label: &'static str,
}

impl PassthroughProcessor {
    pub fn input(modality: Modality) -> Self {
        Self {
            label: match modality {
                Modality::Text => "text_input",
                Modality::Voice => "voice_input",
            },
        }
    }

    pub fn output(modality: Modality) -> Self {
        Self {
            label: match modality {
                Modality::Text => "text_output",
                Modality::Voice => "voice_output",
            },
        }
    }
}

#[async_trait]
impl NodeProcessor for PassthroughProcessor {
    async fn process(&self, _state: &mut ExecutionState, _node: &Node) -> Result<(), ProcessorError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeKind;

    #[tokio::test]
    async fn leaves_state_untouched() {
        let node = Node {
            id: "out".to_string(),
            kind: NodeKind::Output(Modality::Voice),
            options: Default::default(),
            inputs: vec![],
            outputs: vec![],
        };
        let mut state = ExecutionState::new("hi", vec![]);
        state.response = "answer".to_string();
        let before = state.clone();

        let processor = PassthroughProcessor::output(Modality::Voice);
        processor.process(&mut state, &node).await.unwrap();

        assert_eq!(state, before);
        assert_eq!(processor.name(), "voice_output");
    }
}
