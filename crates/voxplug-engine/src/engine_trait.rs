use voxplug_core::{AudioChunk, EngineError, RecognitionResult};

/// A speech-to-text engine fed one capture block at a time.
///
/// Implementations are registered via [`EngineRegistry`](crate::EngineRegistry)
/// and buffer audio internally; [`accept`](Self::accept) returns a result only
/// when an utterance boundary is reached. Partial hypotheses stay inside the
/// engine and are never surfaced.
pub trait SpeechEngine: Send {
    /// Returns the engine's plugin name (e.g. `"null"`, `"vosk"`).
    fn name(&self) -> &str;
    /// One-time initialisation with engine-specific TOML configuration.
    /// Loads the acoustic model; fails fast if it cannot be loaded.
    fn initialize(&mut self, config: toml::Value) -> Result<(), EngineError>;
    /// Feed one block of audio. Returns a finalized transcription when the
    /// engine decides an utterance is complete, `None` otherwise. Decoding
    /// is synchronous but fast relative to one block duration.
    fn accept(&mut self, chunk: &AudioChunk) -> Result<Option<RecognitionResult>, EngineError>;
    /// Discard any buffered audio and in-progress hypothesis.
    fn reset(&mut self);
}
