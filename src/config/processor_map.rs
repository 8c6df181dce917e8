// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::graph::NodeKind;
use crate::traits::NodeProcessor;
use std::collections::HashMap;
use std::sync::Arc;

/// A type-safe registry mapping node kinds to their behaviors.
///
/// One processor instance serves every node of its kind; node-specific settings travel in
/// the `Node` handed to `process`. Processors are held in `Arc` so a single registry can back
/// any number of concurrent invocations.
///
/// # Examples
///
/// ```
/// use the_switchboard::backends::local::LocalProcessorFactory;
/// use the_switchboard::config::{EngineConfig, Modality, NodeKind};
///
/// let processors = LocalProcessorFactory::demo(&EngineConfig::default());
///
/// assert!(processors.contains_kind(NodeKind::AiCall));
/// assert!(processors.contains_kind(NodeKind::Input(Modality::Voice)));
/// ```
#[derive(Clone, Default)]
pub struct ProcessorMap(pub HashMap<NodeKind, Arc<dyn NodeProcessor>>);

impl ProcessorMap {
    /// Create a new empty processor map
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Register a processor for a node kind, replacing any previous one
    pub fn insert(&mut self, kind: NodeKind, processor: Arc<dyn NodeProcessor>) {
        self.0.insert(kind, processor);
    }

    /// Builder-style `insert`
    pub fn with(mut self, kind: NodeKind, processor: Arc<dyn NodeProcessor>) -> Self {
        self.insert(kind, processor);
        self
    }

    /// Get the processor for a node kind
    pub fn get(&self, kind: NodeKind) -> Option<&Arc<dyn NodeProcessor>> {
        self.0.get(&kind)
    }

    pub fn contains_kind(&self, kind: NodeKind) -> bool {
        self.0.contains_key(&kind)
    }

    /// Kinds with a registered processor
    pub fn kinds(&self) -> impl Iterator<Item = &NodeKind> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ProcessorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.0.keys().map(NodeKind::tag).collect();
        kinds.sort_unstable();
        f.debug_struct("ProcessorMap")
            .field("processor_count", &self.0.len())
            .field("kinds", &kinds)
            .finish()
    }
}

impl From<HashMap<NodeKind, Arc<dyn NodeProcessor>>> for ProcessorMap {
    fn from(map: HashMap<NodeKind, Arc<dyn NodeProcessor>>) -> Self {
        Self(map)
    }
}

impl From<ProcessorMap> for HashMap<NodeKind, Arc<dyn NodeProcessor>> {
    fn from(map: ProcessorMap) -> Self {
        map.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::RecordingProcessor;
    use crate::config::Modality;

    #[test]
    fn registers_and_replaces_by_kind() {
        let first: Arc<dyn NodeProcessor> = Arc::new(RecordingProcessor::new("first"));
        let second: Arc<dyn NodeProcessor> = Arc::new(RecordingProcessor::new("second"));

        let mut map = ProcessorMap::new().with(NodeKind::AiCall, first);
        assert_eq!(map.len(), 1);
        map.insert(NodeKind::AiCall, second);

        assert_eq!(map.len(), 1);
        assert!(map.contains_kind(NodeKind::AiCall));
        assert!(!map.contains_kind(NodeKind::Input(Modality::Text)));
        assert!(map.get(NodeKind::AiCall).is_some());
    }

    #[test]
    fn debug_lists_kind_tags() {
        let map = ProcessorMap::new()
            .with(NodeKind::Conditional, Arc::new(RecordingProcessor::new("c")))
            .with(NodeKind::AiCall, Arc::new(RecordingProcessor::new("a")));
        let rendered = format!("{:?}", map);
        assert!(rendered.contains("\"ai-model\", \"if-condition\""));
    }
}
