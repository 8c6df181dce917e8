// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // node processors + collaborators
pub mod compiler;   // graph -> plan
pub mod config;     // workflow model, settings, runtime
pub mod engine;     // plan executor
pub mod errors;     // error handling
pub mod observability;
pub mod state;      // per-turn execution state
pub mod traits;     // unified abstractions
