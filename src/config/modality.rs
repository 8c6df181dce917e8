// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::config::graph::{Graph, Modality, NodeKind};

/// Input/output modality of a workflow and the optional features it uses.
///
/// Derived from node kind membership only; connections are not looked at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalityReport {
    pub input_modality: Modality,
    pub output_modality: Modality,
    /// `"<input>-to-<output>"`, e.g. `"voice-to-text"`
    pub workflow_type: String,
    pub has_retrieval: bool,
    pub has_spreadsheet: bool,
    pub has_conditional: bool,
}

/// Classify a workflow. Voice wins when both modalities are present on the same side, and a
/// side with no endpoint node at all counts as text.
///
/// ```
/// use the_switchboard::config::{detect_modality, parse_workflow_json, Graph, Modality};
///
/// let cfg = parse_workflow_json(r#"{"nodes": [
///     {"id": "mic", "type": "voice-input"},
///     {"id": "screen", "type": "text-output"}
/// ]}"#).unwrap();
/// let report = detect_modality(&Graph::from_config(&cfg).unwrap());
///
/// assert_eq!(report.input_modality, Modality::Voice);
/// assert_eq!(report.workflow_type, "voice-to-text");
/// ```
pub fn detect_modality(graph: &Graph) -> ModalityReport {
    let side = |voice: NodeKind| {
        if graph.has_kind(|k| *k == voice) {
            Modality::Voice
        } else {
            Modality::Text
        }
    };

    let input_modality = side(NodeKind::Input(Modality::Voice));
    let output_modality = side(NodeKind::Output(Modality::Voice));

    ModalityReport {
        input_modality,
        output_modality,
        workflow_type: format!("{}-to-{}", input_modality, output_modality),
        has_retrieval: graph.has_kind(|k| *k == NodeKind::Retrieval),
        has_spreadsheet: graph.has_kind(|k| *k == NodeKind::Spreadsheet),
        has_conditional: graph.has_kind(|k| *k == NodeKind::Conditional),
    }
}
