// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reference collaborators that run without credentials or network access.

pub mod demo_chat;
pub mod demo_sheets;
pub mod keyword_retriever;

pub use demo_chat::DemoChatModel;
pub use demo_sheets::DemoSheetReader;
pub use keyword_retriever::{KeywordRetriever, SourceDocument};
