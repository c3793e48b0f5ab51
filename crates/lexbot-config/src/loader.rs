//! Loading bot overrides from disk
//!
//! The file extension picks the format: `.toml` always, `.yaml`/`.yml` when
//! the `yaml` feature is enabled.

use crate::error::{ConfigError, ConfigResult};
use crate::overrides::BotOverrides;
use std::path::Path;
use tracing::{debug, warn};

/// Loads [`BotOverrides`] from files or strings
pub struct OverridesLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    #[cfg(feature = "yaml")]
    Yaml,
}

impl OverridesLoader {
    /// Load overrides from a file
    ///
    /// ```rust,no_run
    /// use lexbot_config::{OverridesLoader, LEX_DEFAULTS};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let overrides = OverridesLoader::load_from_file("bots/pin_auth.toml").await?;
    /// let settings = LEX_DEFAULTS.resolve(&overrides)?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<BotOverrides> {
        let path = path.as_ref();
        let format = Self::detect_format(path)?;
        let content = tokio::fs::read_to_string(path).await?;
        debug!("Loading bot overrides from {}", path.display());
        Self::parse(&content, format)
    }

    /// Load overrides synchronously (for non-async contexts)
    pub fn load_from_file_sync(path: impl AsRef<Path>) -> ConfigResult<BotOverrides> {
        let path = path.as_ref();
        let format = Self::detect_format(path)?;
        let content = std::fs::read_to_string(path)?;
        debug!("Loading bot overrides from {}", path.display());
        Self::parse(&content, format)
    }

    /// Parse overrides from TOML text
    pub fn from_toml_str(content: &str) -> ConfigResult<BotOverrides> {
        Self::parse(content, Format::Toml)
    }

    /// Parse overrides from YAML text
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(content: &str) -> ConfigResult<BotOverrides> {
        Self::parse(content, Format::Yaml)
    }

    fn parse(content: &str, format: Format) -> ConfigResult<BotOverrides> {
        let overrides: BotOverrides = match format {
            Format::Toml => toml::from_str(content)?,
            #[cfg(feature = "yaml")]
            Format::Yaml => serde_yaml::from_str(content)?,
        };
        debug!("Parsed overrides for {} locale(s)", overrides.locales.len());
        Ok(overrides)
    }

    fn detect_format(path: &Path) -> ConfigResult<Format> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("toml") => Ok(Format::Toml),
            #[cfg(feature = "yaml")]
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => {
                warn!("No override parser for {}", path.display());
                Err(ConfigError::UnsupportedFormat(path.display().to_string()))
            }
        }
    }
}
