// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::config::Node;
use crate::errors::ProcessorError;
use crate::state::ExecutionState;
use crate::traits::NodeProcessor;

/// Records the ids of the nodes it is invoked for and appends them to the response
pub struct RecordingProcessor {
    label: &'static str,
    pub visited: Arc<Mutex<Vec<String>>>,
}

impl RecordingProcessor {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            visited: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Share one visit log between several processors
    pub fn sharing(label: &'static str, visited: Arc<Mutex<Vec<String>>>) -> Self {
        Self { label, visited }
    }
}

#[async_trait]
impl NodeProcessor for RecordingProcessor {
    async fn process(&self, state: &mut ExecutionState, node: &Node) -> Result<(), ProcessorError> {
        self.visited.lock().unwrap().push(node.id.clone());
        if !state.response.is_empty() {
            state.response.push(' ');
        }
        state.response.push_str(&node.id);
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.label
    }
}

/// A processor that always fails, for testing degraded responses
pub struct FailingProcessor {
    pub error: ProcessorError,
}

impl FailingProcessor {
    pub fn new(error: ProcessorError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl NodeProcessor for FailingProcessor {
    async fn process(&self, _state: &mut ExecutionState, _node: &Node) -> Result<(), ProcessorError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Records a fixed condition result for every node it sees
pub struct FixedConditionProcessor {
    pub result: bool,
}

#[async_trait]
impl NodeProcessor for FixedConditionProcessor {
    async fn process(&self, state: &mut ExecutionState, node: &Node) -> Result<(), ProcessorError> {
        state.condition_results.insert(node.id.clone(), self.result);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fixed_condition"
    }
}
