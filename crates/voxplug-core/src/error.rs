use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("failed to enumerate devices: {0}")]
    DeviceEnumeration(String),

    #[error("failed to build stream: {0}")]
    StreamBuild(String),

    #[error("failed to start stream: {0}")]
    StreamStart(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine initialization failed: {0}")]
    InitializationFailed(String),

    #[error("decoding failed: {0}")]
    ProcessingFailed(String),

    #[error("engine not found: {0}")]
    EngineNotFound(String),
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to reach plug: {0}")]
    Unreachable(String),

    #[error("plug protocol error: {0}")]
    Protocol(String),

    #[error("plug refused command (err_code {0})")]
    Refused(i64),
}
