// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Keyword-overlap document retriever.
//!
//! Documents are either registered in memory under a corpus key or read on demand from the
//! query's documents directory (`.txt` and `.md` files, non-recursive). A document's score is
//! the fraction of distinct query terms it contains; documents sharing no term are not
//! returned.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::errors::ProcessorError;
use crate::observability::messages::processor::DocumentSkipped;
use crate::observability::messages::StructuredLog;
use crate::traits::{DocumentRetriever, RetrievalOutcome, RetrievalQuery, ScoredDocument};

const LOADABLE_EXTENSIONS: &[&str] = &["txt", "md"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub source: String,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct KeywordRetriever {
    corpora: HashMap<String, Vec<SourceDocument>>,
}

impl KeywordRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under a corpus key
    pub fn with_document(
        mut self,
        corpus: &str,
        source: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.corpora
            .entry(corpus.to_string())
            .or_default()
            .push(SourceDocument {
                source: source.into(),
                content: content.into(),
            });
        self
    }

    async fn load_directory(dir: &Path) -> Result<Vec<SourceDocument>, ProcessorError> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| collaborator_error(dir, e))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| collaborator_error(dir, e))?
        {
            let path = entry.path();
            let loadable = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| LOADABLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false);
            if loadable && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => documents.push(SourceDocument {
                    source: path.to_string_lossy().into_owned(),
                    content,
                }),
                Err(error) => DocumentSkipped {
                    path: &path.to_string_lossy(),
                    error: &error,
                }
                .log(),
            }
        }
        Ok(documents)
    }

    fn rank(query: &str, documents: &[SourceDocument], top_k: usize) -> Vec<ScoredDocument> {
        let query_terms = terms(query);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredDocument> = documents
            .iter()
            .filter_map(|doc| {
                let doc_terms = terms(&doc.content);
                let hits = query_terms.iter().filter(|t| doc_terms.contains(*t)).count();
                (hits > 0).then(|| ScoredDocument {
                    source: doc.source.clone(),
                    content: doc.content.clone(),
                    score: hits as f64 / query_terms.len() as f64,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.source.cmp(&b.source))
        });
        scored.truncate(top_k);
        scored
    }
}

#[async_trait]
impl DocumentRetriever for KeywordRetriever {
    async fn retrieve(&self, query: &RetrievalQuery) -> Result<RetrievalOutcome, ProcessorError> {
        if let Some(documents) = self.corpora.get(&query.corpus).filter(|d| !d.is_empty()) {
            return Ok(RetrievalOutcome::Found(Self::rank(
                &query.query,
                documents,
                query.top_k,
            )));
        }

        let dir = &query.documents_path;
        if !dir.is_dir() {
            return Ok(RetrievalOutcome::Unavailable(format!(
                "[Documents directory not found: {}]",
                dir.display()
            )));
        }

        let documents = Self::load_directory(dir).await?;
        if documents.is_empty() {
            return Ok(RetrievalOutcome::Unavailable(format!(
                "[No documents found at {}]",
                dir.display()
            )));
        }

        Ok(RetrievalOutcome::Found(Self::rank(
            &query.query,
            &documents,
            query.top_k,
        )))
    }

    fn name(&self) -> &'static str {
        "keyword_retriever"
    }
}

fn terms(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn collaborator_error(dir: &Path, error: std::io::Error) -> ProcessorError {
    ProcessorError::Collaborator {
        collaborator: "keyword_retriever".to_string(),
        message: format!("{}: {}", dir.display(), error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn query(text: &str, corpus: &str, dir: PathBuf) -> RetrievalQuery {
        RetrievalQuery {
            query: text.to_string(),
            corpus: corpus.to_string(),
            documents_path: dir,
            top_k: 3,
        }
    }

    #[tokio::test]
    async fn ranks_in_memory_corpus_by_term_overlap() {
        let retriever = KeywordRetriever::new()
            .with_document("shop", "returns.txt", "Our refund policy allows returns within 30 days.")
            .with_document("shop", "shipping.txt", "Shipping takes five days.")
            .with_document("shop", "jobs.txt", "We are hiring.");

        let outcome = retriever
            .retrieve(&query("refund policy days", "shop", PathBuf::from("/nonexistent")))
            .await
            .unwrap();

        let RetrievalOutcome::Found(docs) = outcome else {
            panic!("expected documents");
        };
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].source, "returns.txt");
        assert!((docs[0].score - 1.0).abs() < f64::EPSILON);
        assert_eq!(docs[1].source, "shipping.txt");
    }

    #[tokio::test]
    async fn missing_directory_is_reported_as_marker() {
        let outcome = KeywordRetriever::new()
            .retrieve(&query("anything", "default", PathBuf::from("/no/such/dir")))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            RetrievalOutcome::Unavailable("[Documents directory not found: /no/such/dir]".into())
        );
    }

    #[tokio::test]
    async fn loads_text_and_markdown_files_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("faq.md"), "Refunds are processed weekly.").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "Nothing relevant here.").unwrap();
        std::fs::write(dir.path().join("image.png"), "refunds").unwrap();

        let outcome = KeywordRetriever::new()
            .retrieve(&query("refunds", "default", dir.path().to_path_buf()))
            .await
            .unwrap();

        let RetrievalOutcome::Found(docs) = outcome else {
            panic!("expected documents");
        };
        assert_eq!(docs.len(), 1);
        assert!(docs[0].source.ends_with("faq.md"));
    }

    #[tokio::test]
    async fn empty_directory_is_reported_as_marker() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = KeywordRetriever::new()
            .retrieve(&query("refunds", "default", dir.path().to_path_buf()))
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            RetrievalOutcome::Unavailable(marker) if marker.starts_with("[No documents found at ")
        ));
    }
}
