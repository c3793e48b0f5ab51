//! # Lexbot Configuration Library
//!
//! Default settings for conversational bot definitions, and the per-bot
//! overrides layered on top of them.
//!
//! ## Features
//!
//! - A compile-time default table ([`LEX_DEFAULTS`])
//! - Bot, locale, and slot overrides with shallow field-level merging
//! - Range validation that names the offending field
//! - Override files in TOML, or YAML with the `yaml` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lexbot_config::{OverridesLoader, LEX_DEFAULTS};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let overrides = OverridesLoader::load_from_file("bots/menu.toml").await?;
//!     let settings = LEX_DEFAULTS.resolve(&overrides)?;
//!     for locale in settings.neural_locales() {
//!         println!("{} needs the neural engine", locale.locale_id);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod defaults;
mod engine;
mod error;
mod loader;
mod overrides;

pub use defaults::*;
pub use engine::*;
pub use error::*;
pub use loader::*;
pub use overrides::*;
