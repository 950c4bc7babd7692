//! Process-wide registry and default settings handle
//!
//! Applications install their module registry once at startup. Handles
//! created with [`Settings::new`] or [`Settings::with_module`] import from
//! it, and [`settings`] returns a shared handle driven by `SETTINGS`.

use crate::error::{Error, Result};
use crate::module::{ModuleImporter, ModuleRegistry, Namespace};
use crate::settings::Settings;
use std::sync::{Arc, OnceLock};

static REGISTRY: OnceLock<ModuleRegistry> = OnceLock::new();
static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Install the process-wide module registry.
///
/// # Errors
///
/// Returns [`Error::RegistryAlreadyInstalled`] if a registry was installed before.
pub fn install(registry: ModuleRegistry) -> Result<()> {
    REGISTRY
        .set(registry)
        .map_err(|_| Error::RegistryAlreadyInstalled)?;
    log::debug!("Installed process-wide settings module registry");
    Ok(())
}

/// The installed registry, if any
pub fn registry() -> Option<&'static ModuleRegistry> {
    REGISTRY.get()
}

/// Shared settings handle reading the `SETTINGS` environment variable.
///
/// Nothing is resolved until the first attribute access.
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(Settings::new)
}

/// Imports from the installed registry
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GlobalImporter;

impl ModuleImporter for GlobalImporter {
    fn import_module(&self, path: &str) -> Result<Arc<Namespace>> {
        match REGISTRY.get() {
            Some(registry) => registry.import_module(path),
            None => Err(Error::import(path, "no module registry installed")),
        }
    }
}
