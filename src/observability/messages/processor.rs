// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for node behavior and collaborator events.
//!
//! This module contains message types for logging events related to:
//! * Chat model invocations
//! * Condition evaluation
//! * Collaborators that could not serve a request and left an absence marker

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A chat model answered an ai-call node.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::processor::ChatModelInvoked;
/// use std::time::Duration;
///
/// let msg = ChatModelInvoked {
///     node_id: "llm",
///     model: "gpt-4o-mini",
///     history_turns: 2,
///     duration: Duration::from_millis(800),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ChatModelInvoked<'a> {
    pub node_id: &'a str,
    pub model: &'a str,
    pub history_turns: usize,
    pub duration: Duration,
}

impl Display for ChatModelInvoked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' called model '{}' with {} history turns in {:?}",
            self.node_id, self.model, self.history_turns, self.duration
        )
    }
}

impl StructuredLog for ChatModelInvoked<'_> {
    fn log(&self) {
        tracing::info!(
            node_id = self.node_id,
            model = self.model,
            history_turns = self.history_turns,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "chat_model",
            span_name = name,
            node_id = self.node_id,
            model = self.model,
        )
    }
}

/// A conditional node evaluated its predicate.
///
/// # Log Level
/// `debug!` - Evaluation detail
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::processor::ConditionEvaluated;
///
/// let msg = ConditionEvaluated {
///     node_id: "check",
///     condition: "contains",
///     field: "message",
///     result: true,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ConditionEvaluated<'a> {
    pub node_id: &'a str,
    pub condition: &'a str,
    pub field: &'a str,
    pub result: bool,
}

impl Display for ConditionEvaluated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Condition '{}' ({} on {}) evaluated to {}",
            self.node_id, self.condition, self.field, self.result
        )
    }
}

impl StructuredLog for ConditionEvaluated<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            condition = self.condition,
            field = self.field,
            result = self.result,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "condition",
            span_name = name,
            node_id = self.node_id,
            condition = self.condition,
        )
    }
}

/// A regex predicate could not be compiled and evaluated to false.
///
/// # Log Level
/// `warn!` - Authoring mistake, evaluation continues
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::processor::InvalidRegexPattern;
///
/// let msg = InvalidRegexPattern {
///     node_id: "check",
///     pattern: "([a-z",
///     error: "unclosed group",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct InvalidRegexPattern<'a> {
    pub node_id: &'a str,
    pub pattern: &'a str,
    pub error: &'a str,
}

impl Display for InvalidRegexPattern<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Condition '{}' has an invalid regex '{}', evaluating to false: {}",
            self.node_id, self.pattern, self.error
        )
    }
}

impl StructuredLog for InvalidRegexPattern<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            pattern = self.pattern,
            error = self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "invalid_regex",
            span_name = name,
            node_id = self.node_id,
            pattern = self.pattern,
        )
    }
}

/// A collaborator could not serve the node; an absence marker was written instead.
///
/// # Log Level
/// `warn!` - Degraded but recoverable
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::processor::CollaboratorUnavailable;
///
/// let msg = CollaboratorUnavailable {
///     node_id: "rag",
///     collaborator: "document retriever",
///     reason: "Documents directory not found: ./docs",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct CollaboratorUnavailable<'a> {
    pub node_id: &'a str,
    pub collaborator: &'a str,
    pub reason: &'a str,
}

impl Display for CollaboratorUnavailable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}': {} unavailable: {}",
            self.node_id, self.collaborator, self.reason
        )
    }
}

impl StructuredLog for CollaboratorUnavailable<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            collaborator = self.collaborator,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "collaborator_unavailable",
            span_name = name,
            node_id = self.node_id,
            collaborator = self.collaborator,
        )
    }
}

/// A context producer filled its slot.
///
/// # Log Level
/// `debug!` - Processing detail
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::processor::ContextProduced;
///
/// let msg = ContextProduced {
///     node_id: "rag",
///     slot: "retrieval",
///     size: 420,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ContextProduced<'a> {
    pub node_id: &'a str,
    pub slot: &'a str,
    pub size: usize,
}

impl Display for ContextProduced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' filled the {} context: {} bytes",
            self.node_id, self.slot, self.size
        )
    }
}

impl StructuredLog for ContextProduced<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            slot = self.slot,
            size = self.size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "context_produced",
            span_name = name,
            node_id = self.node_id,
            slot = self.slot,
        )
    }
}

/// A file in a documents directory could not be read and was skipped.
///
/// # Log Level
/// `warn!` - Partial corpus
pub struct DocumentSkipped<'a> {
    pub path: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for DocumentSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.path, self.error)
    }
}

impl StructuredLog for DocumentSkipped<'_> {
    fn log(&self) {
        tracing::warn!(
            path = self.path,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("document_skipped", span_name = name, path = self.path)
    }
}
