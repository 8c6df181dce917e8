// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod collaborators;
pub mod executor;
pub mod processor;

pub use collaborators::{
    ChatCompletion, ChatModel, CompletionRequest, DocumentRetriever, RetrievalOutcome,
    RetrievalQuery, ScoredDocument, SheetQuery, SheetReader,
};
pub use executor::PlanExecutor;
pub use processor::NodeProcessor;
