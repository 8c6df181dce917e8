// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequential plan executor.
//!
//! Walks a `CompiledPlan` from its entry node, one node at a time, threading a single
//! `ExecutionState` through every processor. The next node is the plain successor, or for a
//! conditional node whatever its router picks from the recorded condition result. The walk
//! ends at a node without a successor or when a router yields END.
//!
//! ## Failure handling
//! - A processor error ends the turn: the node stays in the execution log, its error becomes
//!   the response, and the state is returned as a success.
//! - Running out of visit budget (`node_count * visit_budget_factor`) means the plan loops,
//!   and is fatal.
//! - A successor outside the plan is a compiler defect, and is fatal.
//!
//! ## Concurrency
//! None inside a traversal; the executor awaits each processor before choosing the next node.
//! The executor itself holds no per-invocation state, so one instance can serve concurrent
//! invocations.

use async_trait::async_trait;
use std::time::Instant;
use tracing::Instrument;

use crate::compiler::{CompiledPlan, RouteTarget};
use crate::config::consts::DEFAULT_VISIT_BUDGET_FACTOR;
use crate::config::{EngineConfig, ProcessorMap};
use crate::errors::ExecutionError;
use crate::observability::messages::engine::{
    BranchRouted, ExecutionCompleted, ExecutionFailed, ExecutionStarted, NodeFailureRecovered,
    NodeVisited,
};
use crate::observability::messages::StructuredLog;
use crate::state::ExecutionState;
use crate::traits::PlanExecutor;

pub struct SequentialExecutor {
    processors: ProcessorMap,
    visit_budget_factor: usize,
}

impl SequentialExecutor {
    pub fn new(processors: ProcessorMap) -> Self {
        Self {
            processors,
            visit_budget_factor: DEFAULT_VISIT_BUDGET_FACTOR,
        }
    }

    pub fn from_config(processors: ProcessorMap, cfg: &EngineConfig) -> Self {
        Self::new(processors).with_visit_budget_factor(cfg.engine.visit_budget_factor)
    }

    pub fn with_visit_budget_factor(mut self, factor: usize) -> Self {
        self.visit_budget_factor = factor.max(1);
        self
    }

    fn visit_budget(&self, node_count: usize) -> usize {
        node_count.saturating_mul(self.visit_budget_factor)
    }

    async fn run(
        &self,
        plan: &CompiledPlan,
        mut state: ExecutionState,
        budget: usize,
    ) -> Result<ExecutionState, ExecutionError> {
        let started = Instant::now();
        let mut current = RouteTarget::Node(plan.entry.clone());
        let mut previous: Option<String> = None;
        let mut visits = 0usize;

        loop {
            let node_id = match current {
                RouteTarget::Node(id) => id,
                RouteTarget::End => break,
            };

            let node = plan.node(&node_id).ok_or_else(|| ExecutionError::Routing {
                from: previous.clone().unwrap_or_else(|| "<entry>".to_string()),
                target: node_id.clone(),
            })?;

            visits += 1;
            if visits > budget {
                return Err(ExecutionError::CyclicGraph { node_id, budget });
            }

            let processor =
                self.processors
                    .get(node.kind)
                    .ok_or_else(|| ExecutionError::ProcessorNotRegistered {
                        node_id: node_id.clone(),
                        kind: node.kind.tag().to_string(),
                    })?;

            NodeVisited {
                node_id: &node_id,
                kind: node.kind.tag(),
                visit: visits,
            }
            .log();

            state.record_executed(node.kind.tag());
            if let Err(error) = processor.process(&mut state, node).await {
                NodeFailureRecovered {
                    node_id: &node_id,
                    kind: node.kind.tag(),
                    error: &error,
                }
                .log();
                state.response = format!(
                    "Error in {} node '{}': {}",
                    node.kind.tag(),
                    node_id,
                    error
                );
                break;
            }

            current = match plan.router(&node_id) {
                Some(router) => {
                    let result = state
                        .condition_results
                        .get(&node_id)
                        .copied()
                        .unwrap_or(false);
                    let target = router.route(result);
                    BranchRouted {
                        node_id: &node_id,
                        result,
                        target: &target.to_string(),
                    }
                    .log();
                    target
                }
                None => plan.next_after(&node_id),
            };
            previous = Some(node_id);
        }

        ExecutionCompleted {
            nodes_executed: state.nodes_executed(),
            duration: started.elapsed(),
        }
        .log();

        Ok(state)
    }
}

#[async_trait]
impl PlanExecutor for SequentialExecutor {
    async fn execute(
        &self,
        plan: &CompiledPlan,
        state: ExecutionState,
    ) -> Result<ExecutionState, ExecutionError> {
        let budget = self.visit_budget(plan.len());
        let start = ExecutionStarted {
            entry: &plan.entry,
            node_count: plan.len(),
            visit_budget: budget,
        };
        let span = start.span("sequential_execute");
        start.log();

        let outcome = self.run(plan, state, budget).instrument(span).await;

        if let Err(error) = &outcome {
            let node_id = match error {
                ExecutionError::CyclicGraph { node_id, .. }
                | ExecutionError::ProcessorNotRegistered { node_id, .. } => node_id.as_str(),
                ExecutionError::Routing { target, .. } => target.as_str(),
            };
            ExecutionFailed { node_id, error }.log();
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{FailingProcessor, FixedConditionProcessor, RecordingProcessor};
    use crate::compiler::compile_workflow;
    use crate::config::{parse_workflow_yaml, Modality, NodeKind};
    use crate::errors::ProcessorError;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn recording_map(visited: &Arc<Mutex<Vec<String>>>) -> ProcessorMap {
        let mut map = ProcessorMap::new();
        for kind in NodeKind::ALL {
            map.insert(kind, Arc::new(RecordingProcessor::sharing("recording", visited.clone())));
        }
        map
    }

    fn plan(yaml: &str) -> CompiledPlan {
        compile_workflow(&parse_workflow_yaml(yaml).unwrap()).unwrap()
    }

    const LINEAR: &str = r#"
nodes:
  - { id: in, type: text-input }
  - { id: llm, type: ai-model }
  - { id: out, type: text-output }
connections:
  - { sourceNodeId: in, targetNodeId: llm }
  - { sourceNodeId: llm, targetNodeId: out }
"#;

    #[tokio::test]
    async fn visits_linear_plan_in_order() {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let executor = SequentialExecutor::new(recording_map(&visited));

        let state = executor
            .execute(&plan(LINEAR), ExecutionState::new("hi", vec![]))
            .await
            .unwrap();

        assert_eq!(state.nodes_executed(), &["text-input", "ai-model", "text-output"]);
        assert_eq!(*visited.lock().unwrap(), vec!["in", "llm", "out"]);
        assert_eq!(state.response, "in llm out");
    }

    #[tokio::test]
    async fn failing_node_degrades_response_and_halts() {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let mut map = recording_map(&visited);
        map.insert(
            NodeKind::AiCall,
            Arc::new(FailingProcessor::new(ProcessorError::Timeout {
                collaborator: "chat model".to_string(),
                timeout: Duration::from_secs(30),
            })),
        );

        let state = SequentialExecutor::new(map)
            .execute(&plan(LINEAR), ExecutionState::new("hi", vec![]))
            .await
            .unwrap();

        assert_eq!(state.nodes_executed(), &["text-input", "ai-model"]);
        assert_eq!(
            state.response,
            "Error in ai-model node 'llm': chat model timed out after 30s"
        );
        assert_eq!(*visited.lock().unwrap(), vec!["in"]);
    }

    #[tokio::test]
    async fn cycle_exhausts_visit_budget() {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let cyclic = plan(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: llm, type: ai-model }
  - { id: out, type: text-output }
connections:
  - { sourceNodeId: in, targetNodeId: llm }
  - { sourceNodeId: llm, targetNodeId: out }
  - { sourceNodeId: out, targetNodeId: llm }
"#,
        );

        let err = SequentialExecutor::new(recording_map(&visited))
            .execute(&cyclic, ExecutionState::new("hi", vec![]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ExecutionError::CyclicGraph {
                node_id: "llm".to_string(),
                budget: 3,
            }
        );
    }

    #[tokio::test]
    async fn larger_budget_factor_allows_more_visits() {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let cyclic = plan(
            r#"
nodes:
  - { id: a, type: text-input }
  - { id: b, type: ai-model }
connections:
  - { sourceNodeId: a, targetNodeId: b }
  - { sourceNodeId: b, targetNodeId: a }
"#,
        );

        let err = SequentialExecutor::new(recording_map(&visited))
            .with_visit_budget_factor(3)
            .execute(&cyclic, ExecutionState::new("hi", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, ExecutionError::CyclicGraph { budget: 6, .. }));
        assert_eq!(visited.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn missing_processor_is_fatal() {
        let err = SequentialExecutor::new(ProcessorMap::new())
            .execute(&plan(LINEAR), ExecutionState::new("hi", vec![]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ExecutionError::ProcessorNotRegistered {
                node_id: "in".to_string(),
                kind: "text-input".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn router_target_outside_plan_is_a_routing_error() {
        let mut broken = plan(
            r#"
nodes:
  - { id: in, type: text-input }
  - { id: check, type: if-condition }
  - { id: out, type: text-output }
connections:
  - { sourceNodeId: in, targetNodeId: check }
  - { sourceNodeId: check, sourcePortId: "true", targetNodeId: out }
"#,
        );
        if let Some(router) = broken.routers.get_mut("check") {
            router.true_targets = vec!["vanished".to_string()];
        }

        let visited = Arc::new(Mutex::new(Vec::new()));
        let mut map = recording_map(&visited);
        map.insert(NodeKind::Conditional, Arc::new(FixedConditionProcessor { result: true }));

        let err = SequentialExecutor::new(map)
            .execute(&broken, ExecutionState::new("hi", vec![]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ExecutionError::Routing {
                from: "check".to_string(),
                target: "vanished".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn voice_nodes_use_their_own_tags() {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let voice = plan(
            r#"
nodes:
  - { id: mic, type: voice-input }
  - { id: speaker, type: voice-output }
connections:
  - { sourceNodeId: mic, targetNodeId: speaker }
"#,
        );
        let mut map = ProcessorMap::new();
        map.insert(
            NodeKind::Input(Modality::Voice),
            Arc::new(RecordingProcessor::sharing("in", visited.clone())),
        );
        map.insert(
            NodeKind::Output(Modality::Voice),
            Arc::new(RecordingProcessor::sharing("out", visited.clone())),
        );

        let state = SequentialExecutor::new(map)
            .execute(&voice, ExecutionState::new("hi", vec![]))
            .await
            .unwrap();
        assert_eq!(state.nodes_executed(), &["voice-input", "voice-output"]);
    }
}
