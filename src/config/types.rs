//! Environment access for module resolution

use std::env::VarError;

/// Source of environment variables
///
/// The process environment is read through this trait so handles can be
/// pointed at a fixed environment in tests.
pub trait EnvSource: Send + Sync {
    /// Read a variable, like [`std::env::var`]
    fn var(&self, key: &str) -> Result<String, VarError>;
}

/// Reads the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvSource;

impl EnvSource for DefaultEnvSource {
    fn var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Result<String, VarError> + Send + Sync,
{
    fn var(&self, key: &str) -> Result<String, VarError> {
        self(key)
    }
}

/// Name of the environment variable holding the settings module path.
///
/// Each [`Settings`](crate::Settings) handle type carries one, so an
/// application can keep several independent handles apart.
pub trait EnvVariable {
    /// Variable name, e.g. `SETTINGS`
    const NAME: &'static str;
}

/// The default `SETTINGS` variable
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsEnv;

impl EnvVariable for SettingsEnv {
    const NAME: &'static str = "SETTINGS";
}

/// Declare a marker type naming a custom settings environment variable.
///
/// # Example
///
/// ```rust
/// use quicksets::{EnvVariable, Settings, settings_env};
///
/// settings_env!(MySettingsEnv = "MY_SETTINGS");
///
/// let settings: Settings<MySettingsEnv> = Settings::new();
/// assert_eq!(settings.env_variable(), "MY_SETTINGS");
/// assert_eq!(MySettingsEnv::NAME, "MY_SETTINGS");
/// ```
#[macro_export]
macro_rules! settings_env {
    ($(#[$meta:meta])* $vis:vis $name:ident = $var:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::EnvVariable for $name {
            const NAME: &'static str = $var;
        }
    };
}
