// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::consts::DEFAULT_CORPUS;
use crate::config::settings::RetrievalSection;
use crate::config::Node;
use crate::errors::ProcessorError;
use crate::observability::messages::processor::{CollaboratorUnavailable, ContextProduced};
use crate::observability::messages::StructuredLog;
use crate::state::{ContextSlot, ExecutionState};
use crate::traits::{
    DocumentRetriever, NodeProcessor, RetrievalOutcome, RetrievalQuery, ScoredDocument,
};

/// Marker written when the search returned nothing
pub const NO_RELEVANT_DOCUMENTS: &str = "[No relevant documents found]";

/// Searches a document corpus with the user's message and fills the retrieval context.
///
/// Node options: `documentsPath`, `projectId`, `userId`, `topK`. Retriever failures never fail
/// the node; they leave an absence marker in the slot. A malformed `topK` does fail it.
pub struct RetrievalProcessor {
    retriever: Arc<dyn DocumentRetriever>,
    defaults: RetrievalSection,
}

impl RetrievalProcessor {
    pub fn new(retriever: Arc<dyn DocumentRetriever>, defaults: RetrievalSection) -> Self {
        Self {
            retriever,
            defaults,
        }
    }

    fn query(
        &self,
        state: &ExecutionState,
        node: &Node,
    ) -> Result<RetrievalQuery, ProcessorError> {
        Ok(RetrievalQuery {
            query: state.message().to_string(),
            corpus: corpus_key(node),
            documents_path: node
                .option_str("documentsPath")
                .map(PathBuf::from)
                .unwrap_or_else(|| self.defaults.index_root.clone()),
            top_k: self.top_k(node)?,
        })
    }

    /// `topK` option, a positive integer when set
    fn top_k(&self, node: &Node) -> Result<usize, ProcessorError> {
        match node.option("topK") {
            None | Some(serde_json::Value::Null) => Ok(self.defaults.default_top_k),
            Some(value) => value
                .as_u64()
                .filter(|k| *k > 0)
                .map(|k| k as usize)
                .ok_or_else(|| ProcessorError::InvalidOption {
                    option: "topK".to_string(),
                    message: format!("expected a positive integer, got {}", value),
                }),
        }
    }

    fn format(&self, documents: &[ScoredDocument]) -> String {
        documents
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                format!(
                    "[Source {}: {} (score: {:.3})]\n{}",
                    i + 1,
                    file_name(&doc.source),
                    doc.score,
                    truncate(&doc.content, self.defaults.max_snippet_chars)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// `<userId>/<projectId>` when a project is set, else the shared corpus
fn corpus_key(node: &Node) -> String {
    match (node.option_str("userId"), node.option_str("projectId")) {
        (Some(user), Some(project)) => format!("{}/{}", user, project),
        (None, Some(project)) => project.to_string(),
        _ => DEFAULT_CORPUS.to_string(),
    }
}

fn file_name(source: &str) -> &str {
    Path::new(source)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(source)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[async_trait]
impl NodeProcessor for RetrievalProcessor {
    async fn process(&self, state: &mut ExecutionState, node: &Node) -> Result<(), ProcessorError> {
        let query = self.query(state, node)?;

        let slot = match self.retriever.retrieve(&query).await {
            Ok(RetrievalOutcome::Found(documents)) if !documents.is_empty() => {
                ContextSlot::Available(self.format(&documents))
            }
            Ok(RetrievalOutcome::Found(_)) => {
                ContextSlot::Unavailable(NO_RELEVANT_DOCUMENTS.to_string())
            }
            Ok(RetrievalOutcome::Unavailable(marker)) => ContextSlot::Unavailable(marker),
            Err(error) => ContextSlot::Unavailable(format!("[Retrieval error: {}]", error)),
        };

        match &slot {
            ContextSlot::Available(text) => ContextProduced {
                node_id: &node.id,
                slot: "retrieval",
                size: text.len(),
            }
            .log(),
            ContextSlot::Unavailable(marker) => CollaboratorUnavailable {
                node_id: &node.id,
                collaborator: self.retriever.name(),
                reason: marker,
            }
            .log(),
        }

        state.retrieval_context = Some(slot);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "retrieval"
    }
}
