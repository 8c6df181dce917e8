// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Node behaviors and the external services they call.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process processors for every node kind, wired to collaborator traits:
//! - **Input / Output**: pass-through ends of the conversation
//! - **AI call**: prompt composition around a `ChatModel`
//! - **Retrieval / Spreadsheet**: fill context slots from a `DocumentRetriever` / `SheetReader`
//! - **Conditional**: predicate evaluation for branch routing
//!
//! The bundled collaborators need no credentials: an echoing chat model, a keyword retriever
//! over in-memory or on-disk documents, and a canned sheet reader.
//!
//! ## Stub Backend (Test-Only)
//! - **RecordingProcessor**: records visited node ids
//! - **FailingProcessor**: always fails with a given `ProcessorError`
//! - **FixedConditionProcessor**: records a constant condition result
//!
//! # Examples
//!
//! ```rust
//! use the_switchboard::backends::local::{Collaborators, KeywordRetriever, LocalProcessorFactory};
//! use the_switchboard::config::{EngineConfig, NodeKind};
//! use std::sync::Arc;
//!
//! let collaborators = Collaborators {
//!     retriever: Arc::new(KeywordRetriever::new().with_document(
//!         "default",
//!         "faq.md",
//!         "Refunds take five business days.",
//!     )),
//!     ..Collaborators::demo()
//! };
//!
//! let processors = LocalProcessorFactory::create_processors(&EngineConfig::default(), collaborators);
//! assert!(processors.contains_kind(NodeKind::Retrieval));
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
