pub mod command;
pub mod config;
pub mod error;
pub mod types;

pub use command::{match_command, KeywordTable, PlugCommand};
pub use config::AppConfig;
pub use error::{AudioError, ConfigError, DeviceError, EngineError};
pub use types::{AudioChunk, PlugAction, PlugState, RecognitionResult};
