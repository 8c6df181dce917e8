// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::ProcessorError;
use crate::state::ContextSlot;
use crate::traits::{SheetQuery, SheetReader};

/// Sheet reader returning canned rows for any sheet.
pub struct DemoSheetReader;

impl DemoSheetReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DemoSheetReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetReader for DemoSheetReader {
    async fn read(&self, query: &SheetQuery) -> Result<ContextSlot, ProcessorError> {
        Ok(ContextSlot::Available(format!(
            "[Demo] Data from {}: Sample row 1, Sample row 2",
            query.sheet_name
        )))
    }

    fn name(&self) -> &'static str {
        "demo_sheets"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_sample_rows_for_named_sheet() {
        let slot = DemoSheetReader::new()
            .read(&SheetQuery {
                spreadsheet_id: None,
                sheet_name: "Orders".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            slot,
            ContextSlot::Available("[Demo] Data from Orders: Sample row 1, Sample row 2".into())
        );
    }
}
