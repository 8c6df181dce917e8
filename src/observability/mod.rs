// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout The Switchboard. Message types follow a struct-based pattern
//! with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep field names identical between the human-readable line and structured fields
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::compiler` - Plan compilation and edge rewriting events
//! * `messages::engine` - Plan traversal lifecycle and routing events
//! * `messages::processor` - Node behavior and collaborator events
//! * `messages::validation` - Advisory workflow validation results
//!
//! # Usage
//!
//! ```rust
//! use the_switchboard::observability::messages::processor::CollaboratorUnavailable;
//! use the_switchboard::observability::messages::StructuredLog;
//!
//! let msg = CollaboratorUnavailable {
//!     node_id: "rag",
//!     collaborator: "document retriever",
//!     reason: "directory not found",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
