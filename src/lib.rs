//! # quicksets - lazy, environment-selected settings classes
//!
//! A small settings library built around plain configuration structs.
//! An application declares one settings module per environment, each
//! holding configuration classes. At startup a single module is chosen,
//! either explicitly or through the `SETTINGS` environment variable, and
//! its configuration class is instantiated on first access.
//!
//! ## Features
//!
//! - **Lazy resolution**: constructing a [`Settings`] handle never fails and performs no work
//! - **Deterministic selection**: the last public class a module defines wins
//! - **Inheritance-friendly overrides**: base configurations are embedded and overridden field by field
//! - **Computed properties**: derived values are recomputed on every lookup
//! - **Derive macro**: `#[derive(DeriveConfig)]` generates the attribute table (requires `derive` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "derive")]
//! # {
//! use quicksets::{DeriveConfig, ModuleRegistry, Settings};
//! use serde_json::json;
//!
//! #[derive(DeriveConfig)]
//! struct DevelopConfig {
//!     postgresql_host: String,
//!     postgresql_database: String,
//! }
//!
//! impl Default for DevelopConfig {
//!     fn default() -> Self {
//!         Self {
//!             postgresql_host: "localhost".into(),
//!             postgresql_database: "db".into(),
//!         }
//!     }
//! }
//!
//! #[derive(DeriveConfig)]
//! struct TestingConfig {
//!     #[config(base)]
//!     develop: DevelopConfig,
//! }
//!
//! impl Default for TestingConfig {
//!     fn default() -> Self {
//!         let mut develop = DevelopConfig::default();
//!         develop.postgresql_database = "db_test".into();
//!         Self { develop }
//!     }
//! }
//!
//! let mut registry = ModuleRegistry::new();
//! registry.register("myapp.settings.develop", |m| {
//!     m.class::<DevelopConfig>();
//! });
//! registry.register("myapp.settings.testing", |m| {
//!     m.import::<DevelopConfig>("myapp.settings.develop")
//!         .class::<TestingConfig>();
//! });
//!
//! let settings: Settings = Settings::builder()
//!     .module("myapp.settings.testing")
//!     .importer(registry)
//!     .build();
//!
//! assert_eq!(settings.class_name()?, "TestingConfig");
//! assert_eq!(settings.get("POSTGRESQL_DATABASE")?, json!("db_test"));
//! assert_eq!(settings.get("POSTGRESQL_HOST")?, json!("localhost"));
//! # }
//! # Ok::<(), quicksets::Error>(())
//! ```
//!
//! ## Selecting the Settings Module
//!
//! Without an explicit module path, a handle reads the module path from an
//! environment variable the first time it is accessed:
//!
//! ```text
//! export SETTINGS="myapp.settings.product"
//! ```
//!
//! The variable name is part of the handle's type, so independent handles
//! can read different variables:
//!
//! ```rust
//! use quicksets::{Settings, settings_env};
//!
//! settings_env!(WorkerEnv = "WORKER_SETTINGS");
//!
//! let settings: Settings<WorkerEnv> = Settings::new();
//! assert_eq!(settings.env_variable(), "WORKER_SETTINGS");
//! ```
//!
//! ## Selection Rule
//!
//! Within a module, a class is a candidate when it is bound under a name not
//! starting with `_` and was declared by that module (classes brought in with
//! [`ModuleBuilder::import`] only serve as bases). Among candidates, the one
//! defined last wins.

// Allows the derive macro's `::quicksets` paths inside this crate's own tests
extern crate self as quicksets;

// Core modules
mod cache;
mod error;
mod global;
mod resolver;
mod selector;
mod settings;
mod sync;

// Grouped modules
pub mod config;
pub mod module;

// Re-exports from core
pub use error::{Error, Result};
pub use global::{install, registry, settings};
pub use resolver::ModuleResolver;
pub use selector::{ConfigSelector, candidates, select};
pub use settings::{Settings, SettingsBuilder};

// Re-exports from config
pub use config::{
    Config, ConfigObject, DefaultEnvSource, EnvSource, EnvVariable, SettingsEnv, attr_value,
};

// Re-exports from module
pub use module::{
    Binding, BoundValue, ConfigClass, ModuleBuilder, ModuleImporter, ModuleRegistry, Namespace,
};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}

// Derive macro re-export (requires `derive` feature)
/// Derive macro for auto-generating `ConfigObject` and `Config` implementations.
///
/// # Example
///
/// ```rust,ignore
/// use quicksets::DeriveConfig;
///
/// #[derive(Default, DeriveConfig)]
/// #[config(property(name = "POSTGRESQL_CONNECTION_OPTIONS", getter = "connection_options"))]
/// struct DevelopConfig {
///     postgresql_host: String,
///     postgresql_port: u16,
/// }
/// ```
#[cfg(feature = "derive")]
pub use quicksets_derive::Config as DeriveConfig;
