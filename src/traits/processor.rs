// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::Node;
use crate::errors::ProcessorError;
use crate::state::ExecutionState;

/// Behavior of one node kind.
///
/// A processor mutates the state it is handed and returns. Recoverable conditions (no
/// documents, missing credentials) are written into the state as absence markers; an `Err`
/// means the node could not do its job at all, and the engine ends the turn with a degraded
/// response.
///
/// The engine appends the node's tag to the execution log before calling `process`.
#[async_trait]
pub trait NodeProcessor: Send + Sync {
    async fn process(&self, state: &mut ExecutionState, node: &Node) -> Result<(), ProcessorError>;

    fn name(&self) -> &'static str;
}
