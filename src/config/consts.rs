// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default chat model when a node does not name one
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default system prompt for ai-call nodes
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
/// Default sampling temperature for ai-call nodes
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Default timeout for a single chat model call (seconds)
pub const DEFAULT_AI_TIMEOUT_SECONDS: u64 = 30;

/// Number of retrieved snippets when a node does not set `topK`
pub const DEFAULT_TOP_K: usize = 3;
/// Retrieved snippets longer than this are truncated
pub const MAX_SNIPPET_CHARS: usize = 500;
/// Corpus key used when a retrieval node has no project
pub const DEFAULT_CORPUS: &str = "default";
/// Directory searched when a retrieval node has no `documentsPath`
pub const DEFAULT_DOCUMENTS_PATH: &str = "./documents";

/// Sheet read when a spreadsheet node has no `sheetName`
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Multiplier applied to the node count to obtain the traversal visit budget
pub const DEFAULT_VISIT_BUDGET_FACTOR: usize = 1;

/// Log filter used when neither `RUST_LOG` nor the settings file provide one
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Tokens accepted by the `isYes` predicate
pub const AFFIRMATIVE_TOKENS: &[&str] = &[
    "yes",
    "y",
    "true",
    "1",
    "correct",
    "affirmative",
    "yeah",
    "yep",
];

/// Tokens accepted by the `isNo` predicate
pub const NEGATIVE_TOKENS: &[&str] = &[
    "no",
    "n",
    "false",
    "0",
    "incorrect",
    "negative",
    "nope",
    "nah",
];

/// Field keyword resolving to the user message
pub const FIELD_MESSAGE: &str = "message";
/// Field keyword resolving to the current response
pub const FIELD_RESPONSE: &str = "response";
