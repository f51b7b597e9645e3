//! # docrelay Config
//!
//! Runtime configuration (`config/default.toml`) and the user's persisted
//! prompt/platform settings.

mod error;
mod loader;
mod schema;
mod settings;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use settings::{Settings, SettingsStore};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
