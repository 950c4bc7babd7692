//! Configuration object traits
//!
//! A configuration class is any zero-argument constructible type whose
//! attributes can be looked up by name. Lookups go through [`ConfigObject`]
//! on every access, so computed properties always reflect current state.

use serde::Serialize;
use serde_json::Value;
use std::any::Any;

/// Attribute table of an instantiated configuration class.
///
/// Usually generated with `#[derive(DeriveConfig)]`; implement it by hand
/// when an attribute needs custom lookup logic.
///
/// # Example
///
/// ```rust
/// use quicksets::{Config, ConfigObject, attr_value};
/// use serde_json::Value;
/// use std::any::Any;
///
/// #[derive(Default)]
/// struct DefaultConfig {
///     host: String,
/// }
///
/// impl ConfigObject for DefaultConfig {
///     fn class_name(&self) -> &'static str {
///         Self::CLASS_NAME
///     }
///
///     fn get_attr(&self, name: &str) -> Option<Value> {
///         match name {
///             "HOST" => attr_value(&self.host),
///             _ => None,
///         }
///     }
///
///     fn attr_names(&self) -> Vec<&'static str> {
///         vec!["HOST"]
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// impl Config for DefaultConfig {
///     const CLASS_NAME: &'static str = "DefaultConfig";
/// }
/// ```
pub trait ConfigObject: Any + Send + Sync {
    /// Name of the configuration class this object was built from
    fn class_name(&self) -> &'static str;

    /// Look up an attribute, data field, constant or computed property
    fn get_attr(&self, name: &str) -> Option<Value>;

    /// Names of every public attribute, own attributes before inherited ones
    fn attr_names(&self) -> Vec<&'static str>;

    /// Access the concrete type for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Check whether an attribute exists
    fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Own attributes that redeclare an attribute of a base configuration.
    ///
    /// A redeclared attribute hides the base value from lookups while the
    /// base's computed properties keep reading the base field, so such
    /// classes are rejected when loaded.
    fn shadowed_attrs(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// A configuration class that can be registered in a module.
pub trait Config: ConfigObject + Default {
    /// Class name reported in errors and used as the default binding name
    const CLASS_NAME: &'static str;
}

/// Convert an attribute into its looked-up representation.
///
/// Returns `None` (attribute treated as absent) when the value cannot be
/// represented, e.g. a map with non-string keys.
pub fn attr_value<T: Serialize + ?Sized>(value: &T) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Attribute value could not be serialized: {e}");
            None
        }
    }
}
