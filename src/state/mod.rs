// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The single mutable record threaded through one traversal of a compiled plan.
//!
//! Node processors receive `&mut ExecutionState` and may change any public field. The user's
//! message, the conversation history and the execution log are private: processors can read
//! them, only the engine appends to the log, and nothing changes the inputs after
//! construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
    /// Anything else the editor sends; ignored when prompts are built
    #[serde(other)]
    Unknown,
}

/// One previous turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    #[serde(default)]
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

/// A context slot written by a retrieval or spreadsheet node.
///
/// `Unavailable` carries a human-readable marker (`"[No relevant documents found]"`) so the
/// consumer can tell "ran and found nothing" apart from "never ran" (`None` in the state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum ContextSlot {
    Available(String),
    Unavailable(String),
}

impl ContextSlot {
    pub fn text(&self) -> &str {
        match self {
            ContextSlot::Available(text) | ContextSlot::Unavailable(text) => text,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ContextSlot::Available(_))
    }

    /// Usable context text, `None` for absence markers
    pub fn available(&self) -> Option<&str> {
        match self {
            ContextSlot::Available(text) => Some(text),
            ContextSlot::Unavailable(_) => None,
        }
    }
}

/// Mutable state of one workflow invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionState {
    message: String,
    history: Vec<ChatTurn>,
    nodes_executed: Vec<String>,

    pub retrieval_context: Option<ContextSlot>,
    pub spreadsheet_context: Option<ContextSlot>,
    /// Condition node id to its last result
    pub condition_results: BTreeMap<String, bool>,
    pub response: String,
    /// Named outputs of ai-call nodes, readable by later conditions
    pub output_variables: BTreeMap<String, String>,
    pub model_used: Option<String>,
}

impl ExecutionState {
    pub fn new(message: impl Into<String>, history: Vec<ChatTurn>) -> Self {
        Self {
            message: message.into(),
            history,
            nodes_executed: Vec::new(),
            retrieval_context: None,
            spreadsheet_context: None,
            condition_results: BTreeMap::new(),
            response: String::new(),
            output_variables: BTreeMap::new(),
            model_used: None,
        }
    }

    /// The user's message for this turn
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Kind tags of visited nodes, in visit order
    pub fn nodes_executed(&self) -> &[String] {
        &self.nodes_executed
    }

    pub(crate) fn record_executed(&mut self, tag: &str) {
        self.nodes_executed.push(tag.to_string());
    }

    /// Reduce the state to what the caller gets back
    pub fn into_result(self) -> ExecutionResult {
        ExecutionResult {
            response: self.response,
            nodes_executed: self.nodes_executed,
            model_used: self.model_used,
        }
    }
}

/// Final outcome of one traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub response: String,
    pub nodes_executed: Vec<String>,
    pub model_used: Option<String>,
}
