//! Per-bot overrides and their resolution against the defaults
//!
//! Overrides exist at three levels: the bot, each of its locales, and each
//! slot within a locale. Resolution is a shallow, field-level merge. A field
//! set in the override wins; an unset field inherits from [`LexDefaults`].
//! Nested lists are taken as given and never merged element-by-element with
//! anything else.
//!
//! ```
//! use lexbot_config::{BotOverrides, LocaleOverrides, VoiceEngine, LEX_DEFAULTS};
//!
//! let overrides = BotOverrides {
//!     nlu_confidence_threshold: Some(0.75),
//!     locales: vec![LocaleOverrides::new("en_US", "Joanna")],
//!     ..Default::default()
//! };
//!
//! let settings = LEX_DEFAULTS.resolve(&overrides)?;
//! assert_eq!(settings.nlu_confidence_threshold, 0.75);
//! assert_eq!(settings.idle_session_ttl_in_seconds, 300);
//! assert_eq!(settings.locales[0].engine, VoiceEngine::Neural);
//! # Ok::<(), lexbot_config::ConfigError>(())
//! ```

use crate::defaults::{check_confidence_threshold, check_idle_session_ttl, LexDefaults};
use crate::engine::VoiceEngine;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Bot-level overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotOverrides {
    /// Session timeout in seconds
    pub idle_session_ttl_in_seconds: Option<u32>,
    /// Confidence threshold applied to every locale of the bot
    pub nlu_confidence_threshold: Option<f64>,
    /// Locales the bot is built for
    pub locales: Vec<LocaleOverrides>,
}

/// Locale-level overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleOverrides {
    /// Locale identifier, e.g. `en_US`
    pub locale_id: String,
    /// Voice used for spoken prompts
    pub voice_id: String,
    /// Voice engine for this locale
    #[serde(default)]
    pub engine: Option<VoiceEngine>,
    /// Slots elicited in this locale
    #[serde(default)]
    pub slots: Vec<SlotOverrides>,
}

impl LocaleOverrides {
    /// Create a locale with no overrides of its own
    pub fn new(locale_id: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            locale_id: locale_id.into(),
            voice_id: voice_id.into(),
            engine: None,
            slots: Vec::new(),
        }
    }
}

/// Slot-level elicitation overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotOverrides {
    /// Slot name
    pub name: String,
    /// Whether the caller may interrupt the elicitation prompt
    #[serde(default)]
    pub allow_interrupt: Option<bool>,
    /// Re-elicitation attempts before the slot is given up on
    #[serde(default)]
    pub max_retries: Option<u32>,
}

impl SlotOverrides {
    /// Create a slot that inherits all elicitation settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allow_interrupt: None,
            max_retries: None,
        }
    }
}

/// Fully resolved bot settings, ready for a bot builder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotSettings {
    /// Session timeout in seconds
    pub idle_session_ttl_in_seconds: u32,
    /// Confidence threshold applied to every locale
    pub nlu_confidence_threshold: f64,
    /// Resolved locales, in declaration order
    pub locales: Vec<LocaleSettings>,
}

/// Resolved locale settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleSettings {
    /// Locale identifier
    pub locale_id: String,
    /// Voice used for spoken prompts
    pub voice_id: String,
    /// Voice engine in effect
    pub engine: VoiceEngine,
    /// Resolved slots, in declaration order
    pub slots: Vec<SlotSettings>,
}

/// Resolved slot elicitation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSettings {
    /// Slot name
    pub name: String,
    /// Whether the caller may interrupt the elicitation prompt
    pub allow_interrupt: bool,
    /// Re-elicitation attempts
    pub max_retries: u32,
}

impl BotSettings {
    /// Locales running on the neural engine
    pub fn neural_locales(&self) -> impl Iterator<Item = &LocaleSettings> {
        self.locales.iter().filter(|locale| locale.engine.is_neural())
    }
}

impl LexDefaults {
    /// Merge bot overrides over these defaults
    ///
    /// Both the defaults and the merged result are range-checked. Locale ids
    /// must be non-empty and unique within the bot, and slot names unique
    /// within their locale.
    pub fn resolve(&self, overrides: &BotOverrides) -> ConfigResult<BotSettings> {
        self.validate()?;

        let idle_session_ttl_in_seconds = overrides
            .idle_session_ttl_in_seconds
            .unwrap_or(self.idle_session_ttl_in_seconds);
        check_idle_session_ttl("idle_session_ttl_in_seconds", idle_session_ttl_in_seconds)?;

        let nlu_confidence_threshold = overrides
            .nlu_confidence_threshold
            .unwrap_or(self.nlu_confidence_threshold);
        check_confidence_threshold("nlu_confidence_threshold", nlu_confidence_threshold)?;

        let mut seen = HashSet::new();
        let mut locales = Vec::with_capacity(overrides.locales.len());
        for locale in &overrides.locales {
            if locale.locale_id.trim().is_empty() {
                return Err(ConfigError::invalid("locale_id", "must not be empty"));
            }
            if !seen.insert(locale.locale_id.as_str()) {
                return Err(ConfigError::DuplicateLocale(locale.locale_id.clone()));
            }
            locales.push(self.resolve_locale(locale)?);
        }

        debug!(
            "Resolved bot settings: ttl={}s threshold={} locales={}",
            idle_session_ttl_in_seconds,
            nlu_confidence_threshold,
            locales.len()
        );

        Ok(BotSettings {
            idle_session_ttl_in_seconds,
            nlu_confidence_threshold,
            locales,
        })
    }

    fn resolve_locale(&self, locale: &LocaleOverrides) -> ConfigResult<LocaleSettings> {
        let engine = locale.engine.unwrap_or(self.engine);
        debug!("Locale {} uses {} engine", locale.locale_id, engine);

        let mut seen = HashSet::new();
        let mut slots = Vec::with_capacity(locale.slots.len());
        for slot in &locale.slots {
            if !seen.insert(slot.name.as_str()) {
                return Err(ConfigError::invalid(
                    "slots.name",
                    format!(
                        "'{}' is configured more than once in locale {}",
                        slot.name, locale.locale_id
                    ),
                ));
            }
            slots.push(self.resolve_slot(slot));
        }

        Ok(LocaleSettings {
            locale_id: locale.locale_id.clone(),
            voice_id: locale.voice_id.clone(),
            engine,
            slots,
        })
    }

    fn resolve_slot(&self, slot: &SlotOverrides) -> SlotSettings {
        SlotSettings {
            name: slot.name.clone(),
            allow_interrupt: slot.allow_interrupt.unwrap_or(self.slot_allow_interrupt),
            max_retries: slot.max_retries.unwrap_or(self.slot_retries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::LEX_DEFAULTS;

    fn locale_with_slots(id: &str, slots: Vec<SlotOverrides>) -> LocaleOverrides {
        LocaleOverrides {
            slots,
            ..LocaleOverrides::new(id, "Joanna")
        }
    }

    #[test]
    fn empty_overrides_inherit_everything() {
        let overrides = BotOverrides {
            locales: vec![locale_with_slots("en_US", vec![SlotOverrides::new("Pin")])],
            ..Default::default()
        };

        let settings = LEX_DEFAULTS.resolve(&overrides).unwrap();
        assert_eq!(settings.idle_session_ttl_in_seconds, 300);
        assert_eq!(settings.nlu_confidence_threshold, 0.4);

        let locale = &settings.locales[0];
        assert_eq!(locale.engine, VoiceEngine::Neural);
        assert_eq!(
            locale.slots[0],
            SlotSettings {
                name: "Pin".to_string(),
                allow_interrupt: true,
                max_retries: 3,
            }
        );
    }

    #[test]
    fn set_fields_replace_only_themselves() {
        let overrides = BotOverrides {
            nlu_confidence_threshold: Some(0.75),
            locales: vec![locale_with_slots(
                "en_US",
                vec![SlotOverrides {
                    max_retries: Some(1),
                    ..SlotOverrides::new("Pin")
                }],
            )],
            ..Default::default()
        };

        let settings = LEX_DEFAULTS.resolve(&overrides).unwrap();
        assert_eq!(settings.nlu_confidence_threshold, 0.75);
        assert_eq!(settings.idle_session_ttl_in_seconds, 300);

        let slot = &settings.locales[0].slots[0];
        assert_eq!(slot.max_retries, 1);
        assert!(slot.allow_interrupt);
    }

    #[test]
    fn zero_retries_is_allowed() {
        let overrides = BotOverrides {
            locales: vec![locale_with_slots(
                "en_US",
                vec![SlotOverrides {
                    max_retries: Some(0),
                    allow_interrupt: Some(false),
                    ..SlotOverrides::new("Confirm")
                }],
            )],
            ..Default::default()
        };

        let slot = &LEX_DEFAULTS.resolve(&overrides).unwrap().locales[0].slots[0];
        assert_eq!(slot.max_retries, 0);
        assert!(!slot.allow_interrupt);
    }

    #[test]
    fn out_of_range_threshold_names_the_field() {
        let overrides = BotOverrides {
            nlu_confidence_threshold: Some(1.5),
            ..Default::default()
        };

        let err = LEX_DEFAULTS.resolve(&overrides).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "nlu_confidence_threshold")
        );
    }

    #[test]
    fn zero_ttl_override_is_rejected() {
        let overrides = BotOverrides {
            idle_session_ttl_in_seconds: Some(0),
            ..Default::default()
        };

        let err = LEX_DEFAULTS.resolve(&overrides).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "idle_session_ttl_in_seconds")
        );
    }

    #[test]
    fn invalid_defaults_fail_before_merging() {
        let defaults = LexDefaults {
            nlu_confidence_threshold: 2.0,
            ..LEX_DEFAULTS
        };
        let overrides = BotOverrides {
            nlu_confidence_threshold: Some(0.5),
            ..Default::default()
        };

        assert!(defaults.resolve(&overrides).is_err());
    }

    #[test]
    fn duplicate_locale_is_rejected() {
        let overrides = BotOverrides {
            locales: vec![
                LocaleOverrides::new("en_US", "Joanna"),
                LocaleOverrides::new("en_US", "Matthew"),
            ],
            ..Default::default()
        };

        let err = LEX_DEFAULTS.resolve(&overrides).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLocale(id) if id == "en_US"));
    }

    #[test]
    fn duplicate_slot_in_locale_is_rejected() {
        let overrides = BotOverrides {
            locales: vec![locale_with_slots(
                "en_US",
                vec![SlotOverrides::new("Pin"), SlotOverrides::new("Pin")],
            )],
            ..Default::default()
        };

        let err = LEX_DEFAULTS.resolve(&overrides).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, ref value } if field == "slots.name" && value.contains("en_US"))
        );
    }

    #[test]
    fn same_slot_name_in_different_locales_is_allowed() {
        let overrides = BotOverrides {
            locales: vec![
                locale_with_slots("en_US", vec![SlotOverrides::new("Pin")]),
                locale_with_slots("es_US", vec![SlotOverrides::new("Pin")]),
            ],
            ..Default::default()
        };

        let settings = LEX_DEFAULTS.resolve(&overrides).unwrap();
        assert_eq!(settings.locales[1].slots[0].name, "Pin");
    }

    #[test]
    fn blank_locale_id_is_rejected() {
        let overrides = BotOverrides {
            locales: vec![LocaleOverrides::new("  ", "Joanna")],
            ..Default::default()
        };

        assert!(LEX_DEFAULTS.resolve(&overrides).is_err());
    }

    #[test]
    fn neural_locales_follow_resolved_engine() {
        let overrides = BotOverrides {
            locales: vec![
                LocaleOverrides::new("en_US", "Joanna"),
                LocaleOverrides {
                    engine: Some(VoiceEngine::Standard),
                    ..LocaleOverrides::new("es_US", "Lupe")
                },
                LocaleOverrides {
                    engine: Some(VoiceEngine::Neural),
                    ..LocaleOverrides::new("fr_CA", "Gabrielle")
                },
            ],
            ..Default::default()
        };

        let settings = LEX_DEFAULTS.resolve(&overrides).unwrap();
        let neural: Vec<&str> = settings
            .neural_locales()
            .map(|locale| locale.locale_id.as_str())
            .collect();
        assert_eq!(neural, vec!["en_US", "fr_CA"]);
    }

    #[test]
    fn standard_default_engine_leaves_no_neural_locales() {
        let defaults = LexDefaults {
            engine: VoiceEngine::Standard,
            ..LEX_DEFAULTS
        };
        let overrides = BotOverrides {
            locales: vec![LocaleOverrides::new("en_US", "Joanna")],
            ..Default::default()
        };

        let settings = defaults.resolve(&overrides).unwrap();
        assert_eq!(settings.neural_locales().count(), 0);
    }

    #[test]
    fn defaults_are_untouched_by_resolution() {
        let before = LEX_DEFAULTS;
        let overrides = BotOverrides {
            idle_session_ttl_in_seconds: Some(60),
            ..Default::default()
        };
        LEX_DEFAULTS.resolve(&overrides).unwrap();
        assert_eq!(LEX_DEFAULTS, before);
    }
}
