//! Error types for quicksets library

use thiserror::Error;

/// Result type alias for quicksets operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for quicksets library
///
/// Every variant is raised lazily, on first access of a [`Settings`](crate::Settings)
/// handle. Constructing a handle never fails.
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Module Resolution Errors
    // -------------------------------------------------------------------------
    #[error(
        "ENV \"{variable}\" variable was not set. Please setup it like: \
         `export {variable}=\"myapp.settings.production\"` \
         or pass an explicit module path to Settings."
    )]
    ConfigurationSourceMissing { variable: String },

    #[error("Can not import settings module \"{module}\": {reason}")]
    ConfigModuleImport { module: String, reason: String },

    // -------------------------------------------------------------------------
    // Selection Errors
    // -------------------------------------------------------------------------
    #[error("Can not find any config class in module \"{0}\"")]
    NoConfigClassFound(String),

    #[error(
        "'{class}' redeclares attribute '{attribute}' of its base config. \
         Override the base field in `Default` instead."
    )]
    ShadowedAttribute {
        class: &'static str,
        attribute: &'static str,
    },

    // -------------------------------------------------------------------------
    // Attribute Errors
    // -------------------------------------------------------------------------
    #[error("'{class}' object has no attribute '{attribute}'")]
    AttributeNotFound {
        class: &'static str,
        attribute: String,
    },

    #[error("Type mismatch for {attribute}: {source}")]
    TypeMismatch {
        attribute: String,
        #[source]
        source: serde_json::Error,
    },

    // -------------------------------------------------------------------------
    // Handle Errors
    // -------------------------------------------------------------------------
    #[error("Recursive settings resolution while computing {0}")]
    RecursiveResolution(&'static str),

    #[error("A module registry has already been installed for this process")]
    RegistryAlreadyInstalled,
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NoConfigClassFound(_) | Error::AttributeNotFound { .. }
        )
    }

    /// Check if this error happened while locating or loading the config class
    #[must_use]
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Error::ConfigurationSourceMissing { .. }
                | Error::ConfigModuleImport { .. }
                | Error::NoConfigClassFound(_)
                | Error::ShadowedAttribute { .. }
                | Error::RecursiveResolution(_)
        )
    }

    pub(crate) fn import(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ConfigModuleImport {
            module: module.into(),
            reason: reason.into(),
        }
    }
}
