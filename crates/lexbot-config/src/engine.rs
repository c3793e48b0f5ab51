//! Voice synthesis engine selection

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Speech synthesis engine used for a bot locale's voice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoiceEngine {
    /// Concatenative synthesis, available for every voice
    Standard,
    /// Neural synthesis, higher quality but limited to neural-capable voices
    Neural,
}

impl VoiceEngine {
    /// Every engine the voice platform accepts
    pub const ALL: [VoiceEngine; 2] = [VoiceEngine::Standard, VoiceEngine::Neural];

    /// Get the engine name as the platform spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Neural => "neural",
        }
    }

    /// Whether locales on this engine need the neural engine update step
    pub fn is_neural(&self) -> bool {
        matches!(self, Self::Neural)
    }
}

impl fmt::Display for VoiceEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoiceEngine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "neural" => Ok(Self::Neural),
            _ => Err(ConfigError::UnknownEngine(s.to_string())),
        }
    }
}
