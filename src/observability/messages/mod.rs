// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and `StructuredLog`
//! to emit the same information as `tracing` fields at the level appropriate to the event.
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_switchboard::observability::messages::engine::ExecutionStarted;
//! use the_switchboard::observability::messages::StructuredLog;
//!
//! let msg = ExecutionStarted {
//!     entry: "text-in",
//!     node_count: 3,
//!     visit_budget: 3,
//! };
//!
//! let _span = msg.span("execute").entered();
//! msg.log();
//! ```

use tracing::Span;

pub mod compiler;
pub mod engine;
pub mod processor;
pub mod validation;

/// Emit a message as a `tracing` event or open a span carrying its fields.
pub trait StructuredLog {
    /// Emit the message at its own level
    fn log(&self);

    /// Span carrying the message fields, for wrapping the work the message describes
    fn span(&self, name: &str) -> Span;
}
