// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::consts::{
    DEFAULT_AI_TIMEOUT_SECONDS, DEFAULT_DOCUMENTS_PATH, DEFAULT_LOG_FILTER, DEFAULT_MODEL,
    DEFAULT_SHEET_NAME, DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE, DEFAULT_TOP_K,
    DEFAULT_VISIT_BUDGET_FACTOR, MAX_SNIPPET_CHARS,
};
use crate::errors::ConfigError;

/// Engine settings, read from a TOML file. Every section and key is optional.
///
/// ```toml
/// [engine]
/// visit_budget_factor = 1
///
/// [logging]
/// filter = "info,the_switchboard=debug"
///
/// [ai]
/// default_model = "gpt-4o-mini"
/// timeout_seconds = 30
///
/// [retrieval]
/// default_top_k = 3
/// index_root = "./documents"
///
/// [spreadsheet]
/// default_sheet = "Sheet1"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub ai: AiSection,
    #[serde(default)]
    pub retrieval: RetrievalSection,
    #[serde(default)]
    pub spreadsheet: SpreadsheetSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineSection {
    /// Visit budget is `node_count * visit_budget_factor`
    #[serde(default = "default_visit_budget_factor")]
    pub visit_budget_factor: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingSection {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AiSection {
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_system_prompt")]
    pub default_system_prompt: String,
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RetrievalSection {
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    #[serde(default = "default_max_snippet_chars")]
    pub max_snippet_chars: usize,
    /// Directory searched when a retrieval node has no `documentsPath`
    #[serde(default = "default_index_root")]
    pub index_root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpreadsheetSection {
    #[serde(default = "default_sheet")]
    pub default_sheet: String,
}

fn default_visit_budget_factor() -> usize {
    DEFAULT_VISIT_BUDGET_FACTOR
}
fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}
fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}
fn default_timeout_seconds() -> u64 {
    DEFAULT_AI_TIMEOUT_SECONDS
}
fn default_top_k() -> usize {
    DEFAULT_TOP_K
}
fn default_max_snippet_chars() -> usize {
    MAX_SNIPPET_CHARS
}
fn default_index_root() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENTS_PATH)
}
fn default_sheet() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            visit_budget_factor: default_visit_budget_factor(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for AiSection {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            default_system_prompt: default_system_prompt(),
            default_temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for RetrievalSection {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            max_snippet_chars: default_max_snippet_chars(),
            index_root: default_index_root(),
        }
    }
}

impl Default for SpreadsheetSection {
    fn default() -> Self {
        Self {
            default_sheet: default_sheet(),
        }
    }
}

impl AiSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl EngineConfig {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Visit budget for a plan of `node_count` nodes. Never below one visit per node.
    pub fn visit_budget(&self, node_count: usize) -> usize {
        node_count.saturating_mul(self.engine.visit_budget_factor.max(1))
    }
}

/// Load engine settings from a TOML file
pub fn load_engine_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    EngineConfig::from_toml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.ai.default_model, DEFAULT_MODEL);
        assert_eq!(cfg.retrieval.default_top_k, 3);
        assert_eq!(cfg.spreadsheet.default_sheet, "Sheet1");
        assert_eq!(cfg.visit_budget(4), 4);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = EngineConfig::from_toml_str(
            r#"
[engine]
visit_budget_factor = 2

[ai]
timeout_seconds = 5
"#,
        )
        .unwrap();
        assert_eq!(cfg.visit_budget(3), 6);
        assert_eq!(cfg.ai.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.ai.default_temperature, DEFAULT_TEMPERATURE);
        assert_eq!(cfg.logging.filter, "info");
    }

    #[test]
    fn zero_factor_still_allows_one_visit_per_node() {
        let cfg = EngineConfig::from_toml_str("[engine]\nvisit_budget_factor = 0\n").unwrap();
        assert_eq!(cfg.visit_budget(5), 5);
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = EngineConfig::from_toml_str("[engine\nvisit_budget_factor = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[retrieval]\nindex_root = \"/srv/docs\"").unwrap();
        let cfg = load_engine_config(file.path()).unwrap();
        assert_eq!(cfg.retrieval.index_root, PathBuf::from("/srv/docs"));
    }
}
