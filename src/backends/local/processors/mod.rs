// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod ai_call;
pub mod conditional;
pub mod passthrough;
pub mod retrieval;
pub mod spreadsheet;

pub use ai_call::*;
pub use conditional::*;
pub use passthrough::*;
pub use retrieval::*;
pub use spreadsheet::*;
