// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::Node;
use crate::engine::condition::Condition;
use crate::errors::ProcessorError;
use crate::observability::messages::processor::{ConditionEvaluated, InvalidRegexPattern};
use crate::observability::messages::StructuredLog;
use crate::state::ExecutionState;
use crate::traits::NodeProcessor;

/// Evaluates the node's predicate and records the result under the node id.
///
/// A malformed regex evaluates to false.
pub struct ConditionalProcessor;

impl ConditionalProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConditionalProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeProcessor for ConditionalProcessor {
    async fn process(&self, state: &mut ExecutionState, node: &Node) -> Result<(), ProcessorError> {
        let condition = Condition::from_node(node);
        let subject = condition.field.resolve(state);

        let result = condition.evaluate(subject).unwrap_or_else(|error| {
            InvalidRegexPattern {
                node_id: &node.id,
                pattern: &condition.value,
                error: &error.to_string(),
            }
            .log();
            false
        });

        ConditionEvaluated {
            node_id: &node.id,
            condition: condition.kind.name(),
            field: condition.field.name(),
            result,
        }
        .log();

        state.condition_results.insert(node.id.clone(), result);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "conditional"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeKind;
    use serde_json::json;

    fn check_node(options: serde_json::Value) -> Node {
        Node {
            id: "check".to_string(),
            kind: NodeKind::Conditional,
            options: options.as_object().cloned().unwrap_or_default(),
            inputs: vec![],
            outputs: vec![],
        }
    }

    #[tokio::test]
    async fn records_result_keyed_by_node_id() {
        let mut state = ExecutionState::new("hi", vec![]);
        state.response = "Yes, we can help".to_string();

        ConditionalProcessor::new()
            .process(
                &mut state,
                &check_node(json!({"conditionType": "contains", "conditionValue": "yes"})),
            )
            .await
            .unwrap();

        assert_eq!(state.condition_results.get("check"), Some(&true));
    }

    #[tokio::test]
    async fn malformed_regex_is_false() {
        let mut state = ExecutionState::new("abc", vec![]);

        ConditionalProcessor::new()
            .process(
                &mut state,
                &check_node(json!({"conditionType": "regex", "field": "message", "value": "([a-"})),
            )
            .await
            .unwrap();

        assert_eq!(state.condition_results.get("check"), Some(&false));
    }

    #[tokio::test]
    async fn reads_output_variables() {
        let mut state = ExecutionState::new("hi", vec![]);
        state.response = "something else".to_string();
        state
            .output_variables
            .insert("intent".to_string(), "billing".to_string());

        ConditionalProcessor::new()
            .process(
                &mut state,
                &check_node(json!({"conditionType": "equals", "field": "intent", "conditionValue": "Billing"})),
            )
            .await
            .unwrap();

        assert_eq!(state.condition_results.get("check"), Some(&true));
    }
}
