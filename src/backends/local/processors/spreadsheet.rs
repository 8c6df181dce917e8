// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::settings::SpreadsheetSection;
use crate::config::Node;
use crate::errors::ProcessorError;
use crate::observability::messages::processor::{CollaboratorUnavailable, ContextProduced};
use crate::observability::messages::StructuredLog;
use crate::state::{ContextSlot, ExecutionState};
use crate::traits::{NodeProcessor, SheetQuery, SheetReader};

/// Reads a sheet into the spreadsheet context. Options: `spreadsheetId`, `sheetName`.
pub struct SpreadsheetProcessor {
    reader: Arc<dyn SheetReader>,
    defaults: SpreadsheetSection,
}

impl SpreadsheetProcessor {
    pub fn new(reader: Arc<dyn SheetReader>, defaults: SpreadsheetSection) -> Self {
        Self { reader, defaults }
    }
}

#[async_trait]
impl NodeProcessor for SpreadsheetProcessor {
    async fn process(&self, state: &mut ExecutionState, node: &Node) -> Result<(), ProcessorError> {
        let query = SheetQuery {
            spreadsheet_id: node.option_str("spreadsheetId").map(str::to_string),
            sheet_name: node
                .option_str("sheetName")
                .unwrap_or(self.defaults.default_sheet.as_str())
                .to_string(),
        };

        let slot = self.reader.read(&query).await?;
        match &slot {
            ContextSlot::Available(text) => ContextProduced {
                node_id: &node.id,
                slot: "spreadsheet",
                size: text.len(),
            }
            .log(),
            ContextSlot::Unavailable(marker) => CollaboratorUnavailable {
                node_id: &node.id,
                collaborator: self.reader.name(),
                reason: marker,
            }
            .log(),
        }

        state.spreadsheet_context = Some(slot);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "spreadsheet"
    }
}
