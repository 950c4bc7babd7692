//! Settings module name resolution

use crate::config::EnvSource;
use crate::error::{Error, Result};
use log::debug;
use std::sync::Arc;

/// Decides which settings module a handle loads.
///
/// An explicit module path always wins and is returned verbatim. Otherwise
/// the path comes from the environment variable named by `env_variable`.
pub struct ModuleResolver {
    explicit: Option<String>,
    env_variable: &'static str,
    source: Arc<dyn EnvSource>,
}

impl ModuleResolver {
    pub fn new(
        explicit: Option<String>,
        env_variable: &'static str,
        source: Arc<dyn EnvSource>,
    ) -> Self {
        Self {
            explicit,
            env_variable,
            source,
        }
    }

    pub fn env_variable(&self) -> &'static str {
        self.env_variable
    }

    /// Explicit module path given at construction, if any
    pub fn explicit(&self) -> Option<&str> {
        self.explicit.as_deref()
    }

    /// Produce the settings module path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationSourceMissing`] when no explicit path was
    /// given and the variable is unset or empty.
    pub fn resolve(&self) -> Result<String> {
        if let Some(path) = &self.explicit {
            debug!("Using explicit settings module '{path}'");
            return Ok(path.clone());
        }

        match self.source.var(self.env_variable) {
            Ok(path) if !path.is_empty() => {
                debug!(
                    "Resolved settings module '{}' from ${}",
                    path, self.env_variable
                );
                Ok(path)
            }
            _ => Err(Error::ConfigurationSourceMissing {
                variable: self.env_variable.to_string(),
            }),
        }
    }
}
