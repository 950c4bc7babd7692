//! Module namespaces
//!
//! A settings module is described by its dotted path and the ordered list of
//! names bound in it. Each bound class remembers the module that declared
//! it, which is how re-exported base classes are told apart from the
//! classes a module defines itself.

mod registry;

pub use registry::{ModuleBuilder, ModuleImporter, ModuleRegistry};

use crate::config::{Config, ConfigObject};
use serde_json::Value;
use std::fmt;

/// Descriptor of a configuration class bound in a module namespace
#[derive(Clone)]
pub struct ConfigClass {
    name: &'static str,
    module: String,
    construct: fn() -> Box<dyn ConfigObject>,
}

fn construct<T: Config>() -> Box<dyn ConfigObject> {
    Box::new(T::default())
}

impl ConfigClass {
    /// Describe `T` as declared in `module`
    pub fn new<T: Config>(module: impl Into<String>) -> Self {
        Self {
            name: T::CLASS_NAME,
            module: module.into(),
            construct: construct::<T>,
        }
    }

    /// Class name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Dotted path of the module that declared this class
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Construct the class with no arguments.
    ///
    /// A panicking constructor is not caught.
    pub fn instantiate(&self) -> Box<dyn ConfigObject> {
        (self.construct)()
    }
}

impl fmt::Debug for ConfigClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigClass")
            .field("name", &self.name)
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// Value bound to a name in a module namespace
#[derive(Debug, Clone)]
pub enum BoundValue {
    /// A configuration class
    Class(ConfigClass),
    /// Plain module-level data
    Value(Value),
    /// A callable that is not a class
    Function,
}

impl BoundValue {
    pub fn as_class(&self) -> Option<&ConfigClass> {
        match self {
            BoundValue::Class(class) => Some(class),
            _ => None,
        }
    }
}

/// A single `name = value` binding
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: String,
    pub value: BoundValue,
}

impl Binding {
    /// Names starting with an underscore are private to the module
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('_')
    }
}

/// Names bound in a module, in definition order
#[derive(Debug, Clone)]
pub struct Namespace {
    path: String,
    bindings: Vec<Binding>,
}

impl Namespace {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            bindings: Vec::new(),
        }
    }

    /// Dotted path of this module
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Bind a name.
    ///
    /// Rebinding an existing name replaces its value but keeps the position
    /// of the first binding.
    pub fn bind(&mut self, name: impl Into<String>, value: BoundValue) {
        let name = name.into();
        match self.bindings.iter_mut().find(|b| b.name == name) {
            Some(binding) => binding.value = value,
            None => self.bindings.push(Binding { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.value)
    }

    /// Iterate bindings in definition order
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
