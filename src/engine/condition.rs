// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Predicates evaluated by conditional nodes.
//!
//! Comparisons are case-insensitive. `equals`, `startsWith` and `endsWith` also ignore
//! surrounding whitespace; `contains` matches anywhere. A predicate with an empty value never
//! matches, except `equals`, which then matches an empty field.

use regex::RegexBuilder;
use serde_json::Value;

use crate::config::consts::{AFFIRMATIVE_TOKENS, FIELD_MESSAGE, FIELD_RESPONSE, NEGATIVE_TOKENS};
use crate::config::Node;
use crate::state::ExecutionState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionKind {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    Regex,
    IsYes,
    IsNo,
    /// Unrecognised predicate name; always false
    Unknown(String),
}

impl ConditionKind {
    pub fn parse(name: &str) -> Self {
        match name {
            "contains" => ConditionKind::Contains,
            "equals" => ConditionKind::Equals,
            "startsWith" => ConditionKind::StartsWith,
            "endsWith" => ConditionKind::EndsWith,
            "regex" => ConditionKind::Regex,
            "isYes" => ConditionKind::IsYes,
            "isNo" => ConditionKind::IsNo,
            other => ConditionKind::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ConditionKind::Contains => "contains",
            ConditionKind::Equals => "equals",
            ConditionKind::StartsWith => "startsWith",
            ConditionKind::EndsWith => "endsWith",
            ConditionKind::Regex => "regex",
            ConditionKind::IsYes => "isYes",
            ConditionKind::IsNo => "isNo",
            ConditionKind::Unknown(name) => name,
        }
    }
}

/// The string a condition looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionField {
    Message,
    Response,
    /// Output variable written by an ai-call node; the response when no such variable exists
    Variable(String),
}

impl ConditionField {
    pub fn parse(name: &str) -> Self {
        match name {
            FIELD_MESSAGE => ConditionField::Message,
            FIELD_RESPONSE => ConditionField::Response,
            other => ConditionField::Variable(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ConditionField::Message => FIELD_MESSAGE,
            ConditionField::Response => FIELD_RESPONSE,
            ConditionField::Variable(name) => name,
        }
    }

    pub fn resolve<'a>(&self, state: &'a ExecutionState) -> &'a str {
        match self {
            ConditionField::Message => state.message(),
            ConditionField::Response => state.response.as_str(),
            ConditionField::Variable(name) => state
                .output_variables
                .get(name)
                .map(String::as_str)
                .unwrap_or(state.response.as_str()),
        }
    }
}

/// A conditional node's predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub kind: ConditionKind,
    pub field: ConditionField,
    pub value: String,
}

impl Condition {
    /// Read `conditionType` (default `contains`), `field` (default `response`) and
    /// `conditionValue`, falling back to `value`, from a node's options.
    pub fn from_node(node: &Node) -> Self {
        let kind = node
            .option_str("conditionType")
            .map(ConditionKind::parse)
            .unwrap_or(ConditionKind::Contains);
        let field = node
            .option_str("field")
            .map(ConditionField::parse)
            .unwrap_or(ConditionField::Response);
        let value = node
            .option("conditionValue")
            .or_else(|| node.option("value"))
            .map(option_text)
            .unwrap_or_default();

        Self { kind, field, value }
    }

    /// Evaluate against a resolved field.
    ///
    /// # Errors
    /// Returns the compile error of a malformed `regex` pattern; callers treat it as false.
    pub fn evaluate(&self, subject: &str) -> Result<bool, regex::Error> {
        let value = self.value.to_lowercase();
        let subject_lower = subject.to_lowercase();

        let result = match &self.kind {
            ConditionKind::Contains => !self.value.is_empty() && subject_lower.contains(&value),
            ConditionKind::Equals => subject_lower.trim() == value.trim(),
            ConditionKind::StartsWith => {
                !self.value.is_empty() && subject_lower.trim().starts_with(value.trim())
            }
            ConditionKind::EndsWith => {
                !self.value.is_empty() && subject_lower.trim().ends_with(value.trim())
            }
            ConditionKind::Regex => {
                !self.value.is_empty()
                    && RegexBuilder::new(&self.value)
                        .case_insensitive(true)
                        .build()?
                        .is_match(subject)
            }
            ConditionKind::IsYes => AFFIRMATIVE_TOKENS.contains(&subject_lower.trim()),
            ConditionKind::IsNo => NEGATIVE_TOKENS.contains(&subject_lower.trim()),
            ConditionKind::Unknown(_) => false,
        };
        Ok(result)
    }
}

fn option_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
