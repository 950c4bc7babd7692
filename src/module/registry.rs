//! Module registry
//!
//! Configuration classes register themselves into named modules up front.
//! Importing a module replays its definition, producing a [`Namespace`]
//! whose bindings keep the order in which the definition made them.

use super::{BoundValue, ConfigClass, Namespace};
use crate::config::{Config, attr_value};
use crate::error::{Error, Result};
use log::{debug, warn};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

static MODULE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("module path pattern is valid")
});

/// Resolves a dotted module path to its namespace.
pub trait ModuleImporter: Send + Sync {
    /// Import a module.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigModuleImport`] if the module does not exist or
    /// its definition fails.
    fn import_module(&self, path: &str) -> Result<Arc<Namespace>>;
}

impl<T: ModuleImporter + ?Sized> ModuleImporter for Arc<T> {
    fn import_module(&self, path: &str) -> Result<Arc<Namespace>> {
        (**self).import_module(path)
    }
}

type ModuleDefinition =
    Arc<dyn Fn(&mut ModuleBuilder) -> std::result::Result<(), String> + Send + Sync>;

/// Explicit, ordered registry of settings modules.
///
/// # Example
///
/// ```rust
/// use quicksets::{ModuleImporter, ModuleRegistry};
/// # use quicksets::{Config, ConfigObject};
/// # use std::any::Any;
/// # #[derive(Default)] struct DevelopConfig;
/// # impl ConfigObject for DevelopConfig {
/// #     fn class_name(&self) -> &'static str { "DevelopConfig" }
/// #     fn get_attr(&self, _: &str) -> Option<serde_json::Value> { None }
/// #     fn attr_names(&self) -> Vec<&'static str> { Vec::new() }
/// #     fn as_any(&self) -> &dyn Any { self }
/// # }
/// # impl Config for DevelopConfig { const CLASS_NAME: &'static str = "DevelopConfig"; }
///
/// let mut registry = ModuleRegistry::new();
/// registry.register("myapp.settings.develop", |m| {
///     m.value("DEBUG", true).class::<DevelopConfig>();
/// });
///
/// let namespace = registry.import_module("myapp.settings.develop")?;
/// assert_eq!(namespace.len(), 2);
/// # Ok::<(), quicksets::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, ModuleDefinition>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module definition, replacing any previous one for `path`
    pub fn register<F>(&mut self, path: impl Into<String>, define: F) -> &mut Self
    where
        F: Fn(&mut ModuleBuilder) + Send + Sync + 'static,
    {
        self.try_register(path, move |m| {
            define(m);
            Ok(())
        })
    }

    /// Register a module definition that can fail when imported
    pub fn try_register<F>(&mut self, path: impl Into<String>, define: F) -> &mut Self
    where
        F: Fn(&mut ModuleBuilder) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        self.modules.insert(path.into(), Arc::new(define));
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.modules.contains_key(path)
    }

    /// Registered module paths, sorted
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<_> = self.modules.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

impl ModuleImporter for ModuleRegistry {
    fn import_module(&self, path: &str) -> Result<Arc<Namespace>> {
        if !is_valid_module_path(path) {
            return Err(Error::import(path, "invalid module path"));
        }

        let define = self
            .modules
            .get(path)
            .ok_or_else(|| Error::import(path, "no such module"))?;

        let mut builder = ModuleBuilder::new(path);
        define(&mut builder).map_err(|reason| Error::import(path, reason))?;

        debug!(
            "Imported settings module '{}' ({} bindings)",
            path,
            builder.namespace.len()
        );
        Ok(Arc::new(builder.namespace))
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.paths())
            .finish()
    }
}

/// Check that `path` is a dotted sequence of identifiers
pub(crate) fn is_valid_module_path(path: &str) -> bool {
    MODULE_PATH.is_match(path)
}

/// Populates a module namespace, one binding at a time
pub struct ModuleBuilder {
    namespace: Namespace,
}

impl ModuleBuilder {
    fn new(path: &str) -> Self {
        Self {
            namespace: Namespace::new(path),
        }
    }

    /// Dotted path of the module being defined
    pub fn path(&self) -> &str {
        self.namespace.path()
    }

    /// Define `T` in this module under its class name
    pub fn class<T: Config>(&mut self) -> &mut Self {
        self.class_as::<T>(T::CLASS_NAME)
    }

    /// Define `T` in this module under another name
    pub fn class_as<T: Config>(&mut self, name: impl Into<String>) -> &mut Self {
        let class = ConfigClass::new::<T>(self.namespace.path());
        self.bind(name, BoundValue::Class(class))
    }

    /// Bind `T` as declared by another module, like `from module import T`
    pub fn import<T: Config>(&mut self, from_module: impl Into<String>) -> &mut Self {
        self.bind(T::CLASS_NAME, BoundValue::Class(ConfigClass::new::<T>(from_module)))
    }

    /// Bind a plain module-level value.
    ///
    /// A value that can not be serialized is bound as `null` and a warning
    /// is logged.
    pub fn value<V: Serialize>(&mut self, name: impl Into<String>, value: V) -> &mut Self {
        let name = name.into();
        let value = attr_value(&value).unwrap_or_else(|| {
            warn!(
                "Module '{}' binds '{}' to null: value is not serializable",
                self.namespace.path(),
                name
            );
            Value::Null
        });
        self.bind(name, BoundValue::Value(value))
    }

    /// Bind a module-level function
    pub fn function(&mut self, name: impl Into<String>) -> &mut Self {
        self.bind(name, BoundValue::Function)
    }

    pub fn bind(&mut self, name: impl Into<String>, value: BoundValue) -> &mut Self {
        self.namespace.bind(name, value);
        self
    }
}
