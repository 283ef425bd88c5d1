use std::fmt;

#[derive(Debug, Clone)]
pub struct AudioChunk {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug, Clone)]
pub struct RecognitionResult {
    pub text: String,
    pub is_final: bool,
}

/// Relay state as reported by the plug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlugState {
    pub is_on: bool,
    pub alias: Option<String>,
}

/// What a device operation actually did. `toggle` reports the direction
/// it took through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlugAction {
    PoweredOn,
    PoweredOff,
}

impl fmt::Display for PlugAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlugAction::PoweredOn => write!(f, "powered on"),
            PlugAction::PoweredOff => write!(f, "powered off"),
        }
    }
}
