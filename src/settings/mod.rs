//! Lazy settings handle
//!
//! This module contains the [`Settings`] struct, the object an application
//! holds and reads its configuration from.

mod builder;

pub use builder::SettingsBuilder;

use crate::cache::LazySlot;
use crate::config::{ConfigObject, EnvSource, EnvVariable, SettingsEnv};
use crate::error::{Error, Result};
use crate::module::ModuleImporter;
use crate::resolver::ModuleResolver;
use crate::selector::ConfigSelector;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Lazily resolved settings handle.
///
/// Construction is free of I/O. The first attribute access resolves the
/// module path (explicit, or from the `E::NAME` environment variable),
/// imports that module, selects its configuration class and instantiates it.
/// The module path and the instance are each computed at most once per
/// handle; later accesses are served from the cache.
///
/// Attribute lookups are forwarded to the instance on every call, so
/// computed properties reflect the instance's current state.
///
/// # Example
///
/// ```rust
/// use quicksets::{Config, ConfigObject, ModuleRegistry, Settings, attr_value};
/// use serde_json::{Value, json};
/// use std::any::Any;
///
/// struct ProductConfig {
///     host: String,
/// }
///
/// impl Default for ProductConfig {
///     fn default() -> Self {
///         Self { host: "10.0.0.1".into() }
///     }
/// }
///
/// impl ConfigObject for ProductConfig {
///     fn class_name(&self) -> &'static str { Self::CLASS_NAME }
///     fn get_attr(&self, name: &str) -> Option<Value> {
///         match name {
///             "POSTGRESQL_HOST" => attr_value(&self.host),
///             _ => None,
///         }
///     }
///     fn attr_names(&self) -> Vec<&'static str> { vec!["POSTGRESQL_HOST"] }
///     fn as_any(&self) -> &dyn Any { self }
/// }
///
/// impl Config for ProductConfig {
///     const CLASS_NAME: &'static str = "ProductConfig";
/// }
///
/// let mut registry = ModuleRegistry::new();
/// registry.register("myapp.settings.product", |m| {
///     m.class::<ProductConfig>();
/// });
///
/// let settings: Settings = Settings::builder()
///     .module("myapp.settings.product")
///     .importer(registry)
///     .build();
///
/// assert_eq!(settings.get("POSTGRESQL_HOST")?, json!("10.0.0.1"));
/// assert_eq!(settings.class_name()?, "ProductConfig");
/// # Ok::<(), quicksets::Error>(())
/// ```
pub struct Settings<E: EnvVariable = SettingsEnv> {
    resolver: ModuleResolver,
    importer: Arc<dyn ModuleImporter>,

    /// Resolved settings module path
    module_name: LazySlot<String>,

    /// Instantiated configuration class
    instance: LazySlot<Box<dyn ConfigObject>>,

    _env: PhantomData<fn() -> E>,
}

impl<E: EnvVariable> Settings<E> {
    /// Handle reading the module path from the environment variable,
    /// importing from the installed registry.
    pub fn new() -> Self {
        SettingsBuilder::new().build()
    }

    /// Handle loading `module_path`, importing from the installed registry.
    ///
    /// The environment is never consulted.
    pub fn with_module(module_path: impl Into<String>) -> Self {
        SettingsBuilder::new().module(module_path).build()
    }

    /// Create a builder for a customized handle.
    pub fn builder() -> SettingsBuilder<E> {
        SettingsBuilder::new()
    }

    pub(crate) fn from_parts(
        explicit: Option<String>,
        env: Arc<dyn EnvSource>,
        importer: Arc<dyn ModuleImporter>,
    ) -> Self {
        Self {
            resolver: ModuleResolver::new(explicit, E::NAME, env),
            importer,
            module_name: LazySlot::new("the settings module name"),
            instance: LazySlot::new("the settings instance"),
            _env: PhantomData,
        }
    }

    /// Name of the environment variable this handle reads
    pub fn env_variable(&self) -> &'static str {
        E::NAME
    }

    /// Resolve (once) and return the settings module path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationSourceMissing`] if no explicit path was
    /// given and the environment variable is unset or empty.
    pub fn module_name(&self) -> Result<&str> {
        self.module_name
            .get_or_try_init(|| self.resolver.resolve())
            .map(String::as_str)
    }

    /// Resolve (once) and return the configuration instance.
    ///
    /// # Errors
    ///
    /// Any resolution error: missing source, import failure or a module
    /// without a configuration class.
    pub fn instance(&self) -> Result<&dyn ConfigObject> {
        self.instance
            .get_or_try_init(|| {
                let module_name = self.module_name()?;
                debug!("Resolving settings from module '{module_name}'");
                ConfigSelector::new(&*self.importer).load(module_name)
            })
            .map(|instance| &**instance)
    }

    /// Check whether the configuration instance has been created
    pub fn is_loaded(&self) -> bool {
        self.instance.is_set()
    }

    /// Name of the selected configuration class
    pub fn class_name(&self) -> Result<&'static str> {
        Ok(self.instance()?.class_name())
    }

    /// Look up an attribute on the configuration instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttributeNotFound`] if the instance has no such
    /// attribute, or any resolution error on first access.
    pub fn get(&self, name: &str) -> Result<Value> {
        let instance = self.instance()?;
        instance
            .get_attr(name)
            .ok_or_else(|| Error::AttributeNotFound {
                class: instance.class_name(),
                attribute: name.to_string(),
            })
    }

    /// Look up an attribute and deserialize it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value does not fit `T`, plus
    /// every error of [`Settings::get`].
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.get(name)?;
        serde_json::from_value(value).map_err(|source| Error::TypeMismatch {
            attribute: name.to_string(),
            source,
        })
    }

    /// Check whether the configuration instance has an attribute
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.instance()?.has_attr(name))
    }

    /// Attribute names of the configuration instance
    pub fn attr_names(&self) -> Result<Vec<&'static str>> {
        Ok(self.instance()?.attr_names())
    }

    /// Borrow the configuration instance as its concrete type.
    ///
    /// Returns `Ok(None)` when the selected class is not `T`.
    pub fn downcast<T: ConfigObject>(&self) -> Result<Option<&T>> {
        Ok(self.instance()?.as_any().downcast_ref::<T>())
    }
}

impl<E: EnvVariable> Default for Settings<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnvVariable> fmt::Debug for Settings<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("env_variable", &E::NAME)
            .field("explicit_module", &self.resolver.explicit())
            .field("module_name", &self.module_name.get())
            .field(
                "class",
                &self.instance.get().map(|instance| instance.class_name()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::config::attr_value;
    use crate::module::ModuleRegistry;
    use serde_json::json;
    use std::any::Any;
    use std::env::VarError;

    #[derive(Default)]
    struct LocalConfig {
        port: u16,
    }

    impl ConfigObject for LocalConfig {
        fn class_name(&self) -> &'static str {
            Self::CLASS_NAME
        }
        fn get_attr(&self, name: &str) -> Option<Value> {
            match name {
                "PORT" => attr_value(&self.port),
                "ADDRESS" => attr_value(&format!("localhost:{}", self.port)),
                _ => None,
            }
        }
        fn attr_names(&self) -> Vec<&'static str> {
            vec!["ADDRESS", "PORT"]
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl Config for LocalConfig {
        const CLASS_NAME: &'static str = "LocalConfig";
    }

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register("app.settings", |m| {
            m.class::<LocalConfig>();
        });
        registry
    }

    fn no_env(_: &str) -> std::result::Result<String, VarError> {
        Err(VarError::NotPresent)
    }

    #[test]
    fn test_construction_is_lazy() {
        let settings: Settings = Settings::builder()
            .env_source(no_env)
            .importer(registry())
            .build();

        assert!(!settings.is_loaded());
        assert!(format!("{settings:?}").contains("module_name: None"));
    }

    #[test]
    fn test_forwarding() {
        let settings: Settings = Settings::builder()
            .module("app.settings")
            .importer(registry())
            .build();

        assert_eq!(settings.get("PORT").unwrap(), json!(0));
        assert_eq!(settings.get("ADDRESS").unwrap(), json!("localhost:0"));
        assert_eq!(settings.get_as::<u16>("PORT").unwrap(), 0);
        assert!(settings.contains("PORT").unwrap());
        assert_eq!(settings.attr_names().unwrap(), vec!["ADDRESS", "PORT"]);
        assert!(settings.downcast::<LocalConfig>().unwrap().is_some());
        assert!(settings.is_loaded());
    }

    #[test]
    fn test_missing_attribute() {
        let settings: Settings = Settings::builder()
            .module("app.settings")
            .importer(registry())
            .build();

        let err = settings.get("UNKNOWN_ATTRIBUTE").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'LocalConfig' object has no attribute 'UNKNOWN_ATTRIBUTE'"
        );
    }

    #[test]
    fn test_type_mismatch() {
        let settings: Settings = Settings::builder()
            .module("app.settings")
            .importer(registry())
            .build();

        let err = settings.get_as::<bool>("PORT").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref attribute, .. } if attribute == "PORT"));
    }

    #[test]
    fn test_missing_source_surfaces_on_access() {
        let settings: Settings = Settings::builder()
            .env_source(no_env)
            .importer(registry())
            .build();

        assert!(matches!(
            settings.get("PORT"),
            Err(Error::ConfigurationSourceMissing { .. })
        ));
        assert!(!settings.is_loaded());
    }
}
