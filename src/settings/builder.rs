//! Builder for Settings
//!
//! This module contains [`SettingsBuilder`] which provides a fluent API
//! for creating a [`Settings`](super::Settings) handle.

use crate::config::{DefaultEnvSource, EnvSource, EnvVariable, SettingsEnv};
use crate::global::GlobalImporter;
use crate::module::ModuleImporter;
use std::marker::PhantomData;
use std::sync::Arc;

use super::Settings;

/// Builder for creating a [`Settings`] handle with a fluent API.
///
/// Building never performs I/O; every source is consulted lazily on first
/// access of the handle.
///
/// # Example
///
/// ```rust
/// use quicksets::{ModuleRegistry, Settings};
///
/// let registry = ModuleRegistry::new();
/// let settings: Settings = Settings::builder()
///     .module("myapp.settings.product")
///     .importer(registry)
///     .build();
///
/// assert!(!settings.is_loaded());
/// ```
pub struct SettingsBuilder<E: EnvVariable = SettingsEnv> {
    module: Option<String>,
    env: Arc<dyn EnvSource>,
    importer: Arc<dyn ModuleImporter>,
    _env: PhantomData<fn() -> E>,
}

impl<E: EnvVariable> SettingsBuilder<E> {
    /// Create a builder reading the process environment and the installed registry.
    pub fn new() -> Self {
        Self {
            module: None,
            env: Arc::new(DefaultEnvSource),
            importer: Arc::new(GlobalImporter),
            _env: PhantomData,
        }
    }

    /// Load this module instead of reading the environment variable.
    pub fn module(mut self, path: impl Into<String>) -> Self {
        self.module = Some(path.into());
        self
    }

    /// Read environment variables from `source`.
    pub fn env_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.env = Arc::new(source);
        self
    }

    /// Read environment variables from a shared source.
    pub fn shared_env_source(mut self, source: Arc<dyn EnvSource>) -> Self {
        self.env = source;
        self
    }

    /// Import settings modules with `importer`, usually a [`ModuleRegistry`](crate::ModuleRegistry).
    pub fn importer(mut self, importer: impl ModuleImporter + 'static) -> Self {
        self.importer = Arc::new(importer);
        self
    }

    /// Import settings modules with a shared importer.
    pub fn shared_importer(mut self, importer: Arc<dyn ModuleImporter>) -> Self {
        self.importer = importer;
        self
    }

    /// Build the [`Settings`] handle.
    pub fn build(self) -> Settings<E> {
        Settings::from_parts(self.module, self.env, self.importer)
    }
}

impl<E: EnvVariable> Default for SettingsBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
