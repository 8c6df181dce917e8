// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for plan traversal lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Traversal lifecycle (start, completion, failure)
//! * Node visits and branch routing
//! * Recovery of node failures into a degraded response

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Traversal started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::engine::ExecutionStarted;
///
/// let msg = ExecutionStarted {
///     entry: "text-in",
///     node_count: 3,
///     visit_budget: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExecutionStarted<'a> {
    pub entry: &'a str,
    pub node_count: usize,
    pub visit_budget: usize,
}

impl Display for ExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting workflow execution at '{}': {} nodes, visit_budget={}",
            self.entry, self.node_count, self.visit_budget
        )
    }
}

impl StructuredLog for ExecutionStarted<'_> {
    fn log(&self) {
        tracing::info!(
            entry = self.entry,
            node_count = self.node_count,
            visit_budget = self.visit_budget,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution",
            span_name = name,
            entry = self.entry,
            node_count = self.node_count,
            visit_budget = self.visit_budget,
        )
    }
}

/// Traversal reached END.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::engine::ExecutionCompleted;
/// use std::time::Duration;
///
/// let executed = vec!["text-input".to_string(), "ai-model".to_string()];
/// let msg = ExecutionCompleted {
///     nodes_executed: &executed,
///     duration: Duration::from_millis(250),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExecutionCompleted<'a> {
    pub nodes_executed: &'a [String],
    pub duration: Duration,
}

impl Display for ExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Workflow execution completed: [{}] in {:?}",
            self.nodes_executed.join(" -> "),
            self.duration
        )
    }
}

impl StructuredLog for ExecutionCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            nodes_executed = self.nodes_executed.join(" -> "),
            visit_count = self.nodes_executed.len(),
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution_completed",
            span_name = name,
            visit_count = self.nodes_executed.len(),
            duration = ?self.duration,
        )
    }
}

/// Traversal aborted with a fatal error.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::engine::ExecutionFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
/// let msg = ExecutionFailed {
///     node_id: "llm",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ExecutionFailed<'a> {
    pub node_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Workflow execution failed at '{}': {}",
            self.node_id, self.error
        )
    }
}

impl StructuredLog for ExecutionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            node_id = self.node_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "execution_failed",
            span_name = name,
            node_id = self.node_id,
            error = %self.error,
        )
    }
}

/// A node is about to be invoked.
///
/// # Log Level
/// `debug!` - Traversal detail
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::engine::NodeVisited;
///
/// let msg = NodeVisited {
///     node_id: "llm",
///     kind: "ai-model",
///     visit: 2,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct NodeVisited<'a> {
    pub node_id: &'a str,
    pub kind: &'a str,
    pub visit: usize,
}

impl Display for NodeVisited<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Visiting {} node '{}' (visit {})",
            self.kind, self.node_id, self.visit
        )
    }
}

impl StructuredLog for NodeVisited<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            kind = self.kind,
            visit = self.visit,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "node",
            span_name = name,
            node_id = self.node_id,
            kind = self.kind,
        )
    }
}

/// A conditional node's router picked its successor.
///
/// # Log Level
/// `debug!` - Traversal detail
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::engine::BranchRouted;
///
/// let msg = BranchRouted {
///     node_id: "check",
///     result: true,
///     target: "out-a",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct BranchRouted<'a> {
    pub node_id: &'a str,
    pub result: bool,
    pub target: &'a str,
}

impl Display for BranchRouted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Condition '{}' evaluated {}; routing to '{}'",
            self.node_id, self.result, self.target
        )
    }
}

impl StructuredLog for BranchRouted<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            result = self.result,
            target = self.target,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "branch",
            span_name = name,
            node_id = self.node_id,
            result = self.result,
        )
    }
}

/// A node behavior failed; the traversal stops with a degraded response.
///
/// # Log Level
/// `warn!` - The turn completes, but not as the workflow intended
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::engine::NodeFailureRecovered;
///
/// let error = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
/// let msg = NodeFailureRecovered {
///     node_id: "llm",
///     kind: "ai-model",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct NodeFailureRecovered<'a> {
    pub node_id: &'a str,
    pub kind: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for NodeFailureRecovered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} node '{}' failed, halting with degraded response: {}",
            self.kind, self.node_id, self.error
        )
    }
}

impl StructuredLog for NodeFailureRecovered<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            kind = self.kind,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "node_failure",
            span_name = name,
            node_id = self.node_id,
            kind = self.kind,
            error = %self.error,
        )
    }
}

/// A chat request was answered.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::engine::RequestCompleted;
///
/// let msg = RequestCompleted {
///     session_id: Some("abc"),
///     model_used: Some("mock"),
///     processing_time_ms: 12.5,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RequestCompleted<'a> {
    pub session_id: Option<&'a str>,
    pub model_used: Option<&'a str>,
    pub processing_time_ms: f64,
}

impl Display for RequestCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Chat request for session '{}' answered by '{}' in {:.2}ms",
            self.session_id.unwrap_or("-"),
            self.model_used.unwrap_or("-"),
            self.processing_time_ms
        )
    }
}

impl StructuredLog for RequestCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            session_id = self.session_id,
            model_used = self.model_used,
            processing_time_ms = self.processing_time_ms,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "request",
            span_name = name,
            session_id = self.session_id,
        )
    }
}
