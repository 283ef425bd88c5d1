use crate::engine_trait::SpeechEngine;
use vosk::{CompleteResult, DecodingState, Model, Recognizer};
use voxplug_core::{AudioChunk, EngineError, RecognitionResult};

/// Offline recognition via the Vosk/Kaldi runtime. The model is loaded
/// once at initialisation; the recognizer buffers audio between calls and
/// finalizes on utterance boundaries it detects itself.
pub struct VoskEngine {
    model: Option<Model>,
    recognizer: Option<Recognizer>,
}

impl VoskEngine {
    pub fn new() -> Self {
        Self {
            model: None,
            recognizer: None,
        }
    }
}

impl Default for VoskEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechEngine for VoskEngine {
    fn name(&self) -> &str {
        "vosk"
    }

    fn initialize(&mut self, config: toml::Value) -> Result<(), EngineError> {
        let model_path = config
            .get("model_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                EngineError::InitializationFailed("missing 'model_path' in vosk config".to_string())
            })?;
        let sample_rate = config
            .get("sample_rate")
            .and_then(|v| v.as_integer())
            .unwrap_or(16000) as f32;

        let model = Model::new(model_path).ok_or_else(|| {
            EngineError::InitializationFailed(format!(
                "cannot load model from '{}'",
                model_path
            ))
        })?;
        let mut recognizer = Recognizer::new(&model, sample_rate).ok_or_else(|| {
            EngineError::InitializationFailed("failed to create recognizer".to_string())
        })?;
        recognizer.set_words(false);

        tracing::info!(model_path = %model_path, sample_rate, "vosk model loaded");

        self.model = Some(model);
        self.recognizer = Some(recognizer);
        Ok(())
    }

    fn accept(&mut self, chunk: &AudioChunk) -> Result<Option<RecognitionResult>, EngineError> {
        let recognizer = self.recognizer.as_mut().ok_or_else(|| {
            EngineError::ProcessingFailed("engine not initialized".to_string())
        })?;

        let state = recognizer
            .accept_waveform(&chunk.samples)
            .map_err(|e| EngineError::ProcessingFailed(e.to_string()))?;

        match state {
            DecodingState::Finalized => {
                let text = match recognizer.result() {
                    CompleteResult::Single(single) => single.text.to_string(),
                    CompleteResult::Multiple(multiple) => multiple
                        .alternatives
                        .first()
                        .map(|alt| alt.text.to_string())
                        .unwrap_or_default(),
                };
                Ok(Some(RecognitionResult {
                    text,
                    is_final: true,
                }))
            }
            DecodingState::Running => Ok(None),
            DecodingState::Failed => Err(EngineError::ProcessingFailed(
                "recognizer rejected waveform".to_string(),
            )),
        }
    }

    fn reset(&mut self) {
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vosk_engine_name() {
        let engine = VoskEngine::new();
        assert_eq!(engine.name(), "vosk");
    }

    #[test]
    fn test_vosk_engine_initialize_missing_model_path_fails() {
        let mut engine = VoskEngine::new();
        let result = engine.initialize(toml::Value::Table(Default::default()));
        match result {
            Err(EngineError::InitializationFailed(msg)) => {
                assert!(msg.contains("model_path"));
            }
            _ => panic!("expected InitializationFailed"),
        }
    }

    #[test]
    fn test_vosk_engine_initialize_bad_path_fails() {
        let mut engine = VoskEngine::new();
        let mut table = toml::map::Map::new();
        table.insert(
            "model_path".to_string(),
            toml::Value::String("/nonexistent/model".to_string()),
        );
        let result = engine.initialize(toml::Value::Table(table));
        match result {
            Err(EngineError::InitializationFailed(msg)) => {
                assert!(msg.contains("/nonexistent/model"));
            }
            _ => panic!("expected InitializationFailed"),
        }
    }

    #[test]
    fn test_vosk_engine_accept_before_initialize_fails() {
        let mut engine = VoskEngine::new();
        let chunk = AudioChunk {
            samples: vec![0; 8000],
            sample_rate: 16000,
            channels: 1,
        };
        match engine.accept(&chunk) {
            Err(EngineError::ProcessingFailed(msg)) => {
                assert!(msg.contains("not initialized"));
            }
            _ => panic!("expected ProcessingFailed"),
        }
    }
}
