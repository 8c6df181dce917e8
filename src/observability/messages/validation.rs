// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for advisory workflow validation.
//!
//! This module contains message types for logging events related to:
//! * Validation issues and warnings
//! * Cycles found by static analysis
//! * Validation summaries

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cycle found among the workflow's connections.
///
/// # Log Level
/// `warn!` - Execution would fail once the visit budget runs out
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::validation::CyclicConnectionDetected;
///
/// let cycle = vec!["a".to_string(), "b".to_string(), "a".to_string()];
/// let msg = CyclicConnectionDetected {
///     cycle: &cycle,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct CyclicConnectionDetected<'a> {
    pub cycle: &'a [String],
}

impl Display for CyclicConnectionDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic connection detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicConnectionDetected<'_> {
    fn log(&self) {
        tracing::warn!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "cyclic_connection",
            span_name = name,
            cycle = self.cycle.join(" -> "),
        )
    }
}

/// One advisory validation issue.
///
/// # Log Level
/// `warn!` - The workflow may not behave as intended
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::validation::ValidationIssueFound;
///
/// let msg = ValidationIssueFound {
///     issue: "Workflow needs an AI model node",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct ValidationIssueFound<'a> {
    pub issue: &'a str,
}

impl Display for ValidationIssueFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Validation issue: {}", self.issue)
    }
}

impl StructuredLog for ValidationIssueFound<'_> {
    fn log(&self) {
        tracing::warn!(issue = self.issue, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("validation_issue", span_name = name, issue = self.issue)
    }
}

/// Validation finished.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::validation::ValidationCompleted;
///
/// let msg = ValidationCompleted {
///     valid: true,
///     node_count: 3,
///     issue_count: 0,
///     warning_count: 1,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ValidationCompleted {
    pub valid: bool,
    pub node_count: usize,
    pub issue_count: usize,
    pub warning_count: usize,
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Validated {} nodes: valid={}, {} issues, {} warnings",
            self.node_count, self.valid, self.issue_count, self.warning_count
        )
    }
}

impl StructuredLog for ValidationCompleted {
    fn log(&self) {
        tracing::info!(
            valid = self.valid,
            node_count = self.node_count,
            issue_count = self.issue_count,
            warning_count = self.warning_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "validation",
            span_name = name,
            valid = self.valid,
            node_count = self.node_count,
        )
    }
}
