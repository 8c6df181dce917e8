// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod collaborators;
pub mod factory;
pub mod processors;

pub use collaborators::*;
pub use factory::{Collaborators, LocalProcessorFactory};
pub use processors::*;
