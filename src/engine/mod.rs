// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod condition;
pub mod sequential;

pub use condition::{Condition, ConditionField, ConditionKind};
pub use sequential::SequentialExecutor;
