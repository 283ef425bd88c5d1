use crate::engine_trait::SpeechEngine;
use voxplug_core::{AudioChunk, EngineError, RecognitionResult};

/// Engine that hears only silence. Counts fed chunks; used when no real
/// model is available and as a stand-in in tests.
pub struct NullEngine {
    feed_count: usize,
}

impl NullEngine {
    pub fn new() -> Self {
        Self { feed_count: 0 }
    }

    pub fn feed_count(&self) -> usize {
        self.feed_count
    }
}

impl Default for NullEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechEngine for NullEngine {
    fn name(&self) -> &str {
        "null"
    }

    fn initialize(&mut self, _config: toml::Value) -> Result<(), EngineError> {
        Ok(())
    }

    fn accept(&mut self, chunk: &AudioChunk) -> Result<Option<RecognitionResult>, EngineError> {
        self.feed_count += 1;
        tracing::trace!(
            "NullEngine fed chunk #{}, {} samples",
            self.feed_count,
            chunk.samples.len(),
        );
        Ok(None)
    }

    fn reset(&mut self) {
        self.feed_count = 0;
    }
}
