// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::collaborators::{DemoChatModel, DemoSheetReader, KeywordRetriever};
use super::processors::*;
use crate::config::graph::{Modality, NodeKind};
use crate::config::{EngineConfig, ProcessorMap};
use crate::traits::{ChatModel, DocumentRetriever, SheetReader};

/// The external services local processors call out to
#[derive(Clone)]
pub struct Collaborators {
    pub chat_model: Arc<dyn ChatModel>,
    pub retriever: Arc<dyn DocumentRetriever>,
    pub sheets: Arc<dyn SheetReader>,
}

impl Collaborators {
    /// Credential-free collaborators: echoing chat model, keyword retriever, canned sheets
    pub fn demo() -> Self {
        Self {
            chat_model: Arc::new(DemoChatModel::new()),
            retriever: Arc::new(KeywordRetriever::new()),
            sheets: Arc::new(DemoSheetReader::new()),
        }
    }
}

/// Factory for the in-process processors backing every node kind
pub struct LocalProcessorFactory;

impl LocalProcessorFactory {
    /// Register a processor for each of the eight node kinds
    pub fn create_processors(cfg: &EngineConfig, collaborators: Collaborators) -> ProcessorMap {
        let mut map = ProcessorMap::new();

        for modality in [Modality::Text, Modality::Voice] {
            map.insert(
                NodeKind::Input(modality),
                Arc::new(PassthroughProcessor::input(modality)),
            );
            map.insert(
                NodeKind::Output(modality),
                Arc::new(PassthroughProcessor::output(modality)),
            );
        }

        map.insert(
            NodeKind::AiCall,
            Arc::new(AiCallProcessor::new(collaborators.chat_model, cfg.ai.clone())),
        );
        map.insert(
            NodeKind::Retrieval,
            Arc::new(RetrievalProcessor::new(
                collaborators.retriever,
                cfg.retrieval.clone(),
            )),
        );
        map.insert(
            NodeKind::Spreadsheet,
            Arc::new(SpreadsheetProcessor::new(
                collaborators.sheets,
                cfg.spreadsheet.clone(),
            )),
        );
        map.insert(NodeKind::Conditional, Arc::new(ConditionalProcessor::new()));

        map
    }

    /// Processors wired to the demo collaborators
    pub fn demo(cfg: &EngineConfig) -> ProcessorMap {
        Self::create_processors(cfg, Collaborators::demo())
    }
}
