//! Core configuration types and traits
//!
//! This module contains the foundational types for settings resolution:
//! - `ConfigObject` / `Config` - Traits implemented by configuration classes
//! - `EnvSource` - Injectable environment access
//! - `EnvVariable` - Per-handle name of the settings environment variable

mod object;
mod types;

pub use object::{Config, ConfigObject, attr_value};

pub use types::{DefaultEnvSource, EnvSource, EnvVariable, SettingsEnv};
