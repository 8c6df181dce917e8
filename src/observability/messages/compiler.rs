// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for plan compilation events.
//!
//! This module contains message types for logging events related to:
//! * Context edge redirection
//! * Fan-out collapse
//! * Compiled plan summaries

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A direct edge into an ai-call node was redirected through a context producer.
///
/// # Log Level
/// `debug!` - Compiler detail
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::compiler::ContextEdgeRedirected;
///
/// let msg = ContextEdgeRedirected {
///     source: "text-in",
///     consumer: "llm",
///     producer: "rag",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ContextEdgeRedirected<'a> {
    pub source: &'a str,
    pub consumer: &'a str,
    pub producer: &'a str,
}

impl Display for ContextEdgeRedirected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Redirected edge '{}' -> '{}' through context producer '{}'",
            self.source, self.consumer, self.producer
        )
    }
}

impl StructuredLog for ContextEdgeRedirected<'_> {
    fn log(&self) {
        tracing::debug!(
            source = self.source,
            consumer = self.consumer,
            producer = self.producer,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "context_redirect",
            span_name = name,
            source = self.source,
            consumer = self.consumer,
            producer = self.producer,
        )
    }
}

/// A node had several outgoing edges and only the first was kept.
///
/// # Log Level
/// `warn!` - The workflow author probably expected parallel branches
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::compiler::FanOutCollapsed;
///
/// let dropped = vec!["out-b"];
/// let msg = FanOutCollapsed {
///     node_id: "llm",
///     kept: "out-a",
///     dropped: &dropped,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct FanOutCollapsed<'a> {
    pub node_id: &'a str,
    pub kept: &'a str,
    pub dropped: &'a [&'a str],
}

impl Display for FanOutCollapsed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' has {} outgoing edges; following '{}' and ignoring [{}]",
            self.node_id,
            self.dropped.len() + 1,
            self.kept,
            self.dropped.join(", ")
        )
    }
}

impl StructuredLog for FanOutCollapsed<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            kept = self.kept,
            dropped = self.dropped.join(", "),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "fan_out_collapsed",
            span_name = name,
            node_id = self.node_id,
            kept = self.kept,
        )
    }
}

/// A plan was compiled.
///
/// # Log Level
/// `debug!` - Compiler summary
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::compiler::PlanCompiled;
///
/// let msg = PlanCompiled {
///     entry: "text-in",
///     node_count: 4,
///     edge_count: 3,
///     router_count: 0,
///     rewritten_count: 1,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct PlanCompiled<'a> {
    pub entry: &'a str,
    pub node_count: usize,
    pub edge_count: usize,
    pub router_count: usize,
    pub rewritten_count: usize,
}

impl Display for PlanCompiled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Compiled plan from '{}': {} nodes, {} edges, {} routers, {} rewritten edges",
            self.entry, self.node_count, self.edge_count, self.router_count, self.rewritten_count
        )
    }
}

impl StructuredLog for PlanCompiled<'_> {
    fn log(&self) {
        tracing::debug!(
            entry = self.entry,
            node_count = self.node_count,
            edge_count = self.edge_count,
            router_count = self.router_count,
            rewritten_count = self.rewritten_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "plan_compiled",
            span_name = name,
            entry = self.entry,
            node_count = self.node_count,
        )
    }
}
