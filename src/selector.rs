//! Configuration class selection
//!
//! Picks the one class a settings module contributes. Candidates are the
//! public classes the module declares itself; the last one defined wins.

use crate::config::ConfigObject;
use crate::error::{Error, Result};
use crate::module::{ConfigClass, ModuleImporter, Namespace};
use log::{debug, info};

/// Selects and instantiates the configuration class of a module
pub struct ConfigSelector<'a> {
    importer: &'a dyn ModuleImporter,
}

impl<'a> ConfigSelector<'a> {
    pub fn new(importer: &'a dyn ModuleImporter) -> Self {
        Self { importer }
    }

    /// Import `module_path`, select its configuration class and construct it.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigModuleImport`] if the module can not be imported
    /// - [`Error::NoConfigClassFound`] if it declares no public class
    /// - [`Error::ShadowedAttribute`] if the class redeclares a base attribute
    pub fn load(&self, module_path: &str) -> Result<Box<dyn ConfigObject>> {
        let namespace = self.importer.import_module(module_path)?;
        let class = select(&namespace, module_path)?;

        let instance = class.instantiate();
        if let Some(&attribute) = instance.shadowed_attrs().first() {
            return Err(Error::ShadowedAttribute {
                class: instance.class_name(),
                attribute,
            });
        }
        info!(
            "Loaded config class '{}' from module '{}'",
            class.name(),
            module_path
        );
        Ok(instance)
    }
}

/// Public classes declared by `module_path`, in definition order
pub fn candidates<'n>(
    namespace: &'n Namespace,
    module_path: &'n str,
) -> impl Iterator<Item = &'n ConfigClass> + 'n {
    namespace
        .iter()
        .filter(|binding| !binding.is_hidden())
        .filter_map(|binding| binding.value.as_class())
        .filter(move |class| class.module() == module_path)
}

/// Pick the most recently defined candidate.
///
/// # Errors
///
/// Returns [`Error::NoConfigClassFound`] when there is no candidate.
pub fn select<'n>(namespace: &'n Namespace, module_path: &'n str) -> Result<&'n ConfigClass> {
    let mut count = 0;
    let winner = candidates(namespace, module_path).inspect(|_| count += 1).last();
    debug!("Module '{module_path}' has {count} config class candidate(s)");

    winner.ok_or_else(|| Error::NoConfigClassFound(module_path.to_string()))
}
