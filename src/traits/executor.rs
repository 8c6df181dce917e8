// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::compiler::CompiledPlan;
use crate::errors::ExecutionError;
use crate::state::ExecutionState;

#[async_trait]
pub trait PlanExecutor: Send + Sync {
    /// Run a compiled plan against a fresh state and hand the final state back.
    ///
    /// Node failures do not surface here: they are folded into the returned state's
    /// response. Only defects of the plan itself are errors:
    /// - `ExecutionError::CyclicGraph`: the visit budget ran out
    /// - `ExecutionError::Routing`: an edge or router points outside the plan
    /// - `ExecutionError::ProcessorNotRegistered`: no behavior for a node kind
    async fn execute(
        &self,
        plan: &CompiledPlan,
        state: ExecutionState,
    ) -> Result<ExecutionState, ExecutionError>;
}
