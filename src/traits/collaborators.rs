// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Interfaces of the external services node processors call out to.
//!
//! Each trait is the seam where a real language model, vector index or spreadsheet API
//! plugs in. The crate ships reference implementations in `backends::local`.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::errors::ProcessorError;
use crate::state::{ChatTurn, ContextSlot};

/// A chat completion request, system prompt first.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f64,
    pub messages: Vec<ChatTurn>,
    /// The user's message as typed, without injected context
    pub query: String,
}

/// A model's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    pub content: String,
    /// Identifier of the model that actually answered
    pub model: String,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<ChatCompletion, ProcessorError>;

    fn name(&self) -> &'static str;
}

/// A similarity search against one corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalQuery {
    pub query: String,
    /// `<user>/<project>` or `default`
    pub corpus: String,
    pub documents_path: PathBuf,
    pub top_k: usize,
}

/// One retrieved passage.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    /// File name or other short label of the passage's origin
    pub source: String,
    pub content: String,
    pub score: f64,
}

/// What a retriever could do with a query.
#[derive(Debug, Clone, PartialEq)]
pub enum RetrievalOutcome {
    /// Best matches first; may be empty when nothing matched
    Found(Vec<ScoredDocument>),
    /// The corpus could not be searched; carries the absence marker to record
    Unavailable(String),
}

#[async_trait]
pub trait DocumentRetriever: Send + Sync {
    async fn retrieve(&self, query: &RetrievalQuery) -> Result<RetrievalOutcome, ProcessorError>;

    fn name(&self) -> &'static str;
}

/// A spreadsheet range to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetQuery {
    pub spreadsheet_id: Option<String>,
    pub sheet_name: String,
}

#[async_trait]
pub trait SheetReader: Send + Sync {
    /// Read a sheet into a context slot; an unreachable sheet yields `ContextSlot::Unavailable`
    async fn read(&self, query: &SheetQuery) -> Result<ContextSlot, ProcessorError>;

    fn name(&self) -> &'static str;
}
