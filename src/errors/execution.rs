// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;
use thiserror::Error;

use super::GraphError;

/// Fatal errors raised by the plan executor.
///
/// Node-level failures are not represented here: the executor recovers them into a degraded
/// response and stops the traversal (see `ProcessorError`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The traversal visited more nodes than the plan can hold without revisiting one
    #[error("Cyclic workflow detected: visit budget of {budget} exceeded at node '{node_id}'")]
    CyclicGraph { node_id: String, budget: usize },

    /// A router or edge produced a target the plan does not contain
    #[error("Routing error: node '{from}' routed to '{target}' which is not part of the plan")]
    Routing { from: String, target: String },

    /// No processor is registered for a node's kind
    #[error("No processor registered for node '{node_id}' of type '{kind}'")]
    ProcessorNotRegistered { node_id: String, kind: String },
}

/// Failure of a single node behavior.
///
/// Recoverable situations (no documents, missing credentials) never produce one of these; the
/// processor writes an absence marker into the state instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessorError {
    /// The external collaborator returned an error
    #[error("{collaborator} failed: {message}")]
    Collaborator {
        collaborator: String,
        message: String,
    },

    /// The external call did not finish in time
    #[error("{collaborator} timed out after {timeout:?}")]
    Timeout {
        collaborator: String,
        timeout: Duration,
    },

    /// The collaborator answered with something unusable
    #[error("{collaborator} returned a malformed response: {message}")]
    MalformedResponse {
        collaborator: String,
        message: String,
    },

    /// The node's options cannot be interpreted
    #[error("Invalid option '{option}': {message}")]
    InvalidOption { option: String, message: String },
}

/// Anything that stops a request from producing a normal response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Error building workflow: {0}")]
    Build(#[from] GraphError),

    #[error("Error executing workflow: {0}")]
    Execution(#[from] ExecutionError),
}
