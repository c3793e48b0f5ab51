//! Default values for every bot
//!
//! Individual bots override these through [`BotOverrides`](crate::BotOverrides);
//! anything a bot leaves unset falls back to [`LEX_DEFAULTS`].

use crate::engine::VoiceEngine;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Defaults applied to a bot definition before its own overrides
///
/// Deserialized records are range-checked, so a loaded table never holds a
/// zero TTL or a threshold outside 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLexDefaults")]
pub struct LexDefaults {
    /// Voice engine for locales that do not pick one
    pub engine: VoiceEngine,
    /// Session timeout in seconds
    pub idle_session_ttl_in_seconds: u32,
    /// Confidence threshold for natural language understanding (0.0-1.0)
    pub nlu_confidence_threshold: f64,
    /// Slot elicitation interrupt
    pub slot_allow_interrupt: bool,
    /// Slot elicitation retries
    pub slot_retries: u32,
}

/// The defaults shipped with every bot
pub const LEX_DEFAULTS: LexDefaults = LexDefaults {
    engine: VoiceEngine::Neural,
    idle_session_ttl_in_seconds: 300,
    nlu_confidence_threshold: 0.4,
    slot_allow_interrupt: true,
    slot_retries: 3,
};

/// Get the process-wide default table
pub fn lex_defaults() -> &'static LexDefaults {
    &LEX_DEFAULTS
}

impl Default for LexDefaults {
    fn default() -> Self {
        LEX_DEFAULTS
    }
}

/// Wire form of [`LexDefaults`] before range checks
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
struct RawLexDefaults {
    engine: VoiceEngine,
    idle_session_ttl_in_seconds: u32,
    nlu_confidence_threshold: f64,
    slot_allow_interrupt: bool,
    slot_retries: u32,
}

impl Default for RawLexDefaults {
    fn default() -> Self {
        Self {
            engine: LEX_DEFAULTS.engine,
            idle_session_ttl_in_seconds: LEX_DEFAULTS.idle_session_ttl_in_seconds,
            nlu_confidence_threshold: LEX_DEFAULTS.nlu_confidence_threshold,
            slot_allow_interrupt: LEX_DEFAULTS.slot_allow_interrupt,
            slot_retries: LEX_DEFAULTS.slot_retries,
        }
    }
}

impl TryFrom<RawLexDefaults> for LexDefaults {
    type Error = ConfigError;

    fn try_from(raw: RawLexDefaults) -> Result<Self, Self::Error> {
        let defaults = Self {
            engine: raw.engine,
            idle_session_ttl_in_seconds: raw.idle_session_ttl_in_seconds,
            nlu_confidence_threshold: raw.nlu_confidence_threshold,
            slot_allow_interrupt: raw.slot_allow_interrupt,
            slot_retries: raw.slot_retries,
        };
        defaults.validate()?;
        Ok(defaults)
    }
}

impl LexDefaults {
    /// Check the value ranges, naming the first field that is out of range
    pub fn validate(&self) -> ConfigResult<()> {
        check_idle_session_ttl("idleSessionTtlInSeconds", self.idle_session_ttl_in_seconds)?;
        check_confidence_threshold("nluConfidenceThreshold", self.nlu_confidence_threshold)?;
        Ok(())
    }
}

pub(crate) fn check_idle_session_ttl(field: &str, seconds: u32) -> ConfigResult<()> {
    if seconds == 0 {
        return Err(ConfigError::invalid(field, "must be greater than 0 seconds"));
    }
    Ok(())
}

pub(crate) fn check_confidence_threshold(field: &str, threshold: f64) -> ConfigResult<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::invalid(
            field,
            format!("{} is outside 0.0-1.0", threshold),
        ));
    }
    Ok(())
}
