//! Common test utilities for quicksets integration tests
//!
//! Provides the fixture settings modules and counting test doubles.

#![allow(dead_code)]

use quicksets::{
    DeriveConfig, EnvSource, ModuleImporter, ModuleRegistry, Namespace, Result, Settings,
};
use serde::Serialize;
use std::env::VarError;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// Database Settings Classes
// =============================================================================

/// Connection options assembled from the individual `POSTGRESQL_*` fields
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConnectionOptions {
    pub user: String,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub minsize: u32,
    pub maxsize: u32,
    pub pool_recycle: bool,
}

#[derive(Debug, DeriveConfig)]
#[config(property(
    name = "POSTGRESQL_CONNECTION_OPTIONS",
    getter = "postgresql_connection_options"
))]
#[config(constants(SERVICE_NAME))]
pub struct DefaultConfig {
    pub postgresql_host: String,
    pub postgresql_port: u16,
    pub postgresql_username: String,
    pub postgresql_password: Option<String>,
    pub postgresql_database: String,
    pub postgresql_pool_min_size: u32,
    pub postgresql_pool_max_size: u32,
    pub postgresql_pool_recycle: bool,
}

impl DefaultConfig {
    pub const SERVICE_NAME: &'static str = "myapp";

    pub fn postgresql_connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            user: self.postgresql_username.clone(),
            password: self.postgresql_password.clone(),
            host: self.postgresql_host.clone(),
            port: self.postgresql_port,
            database: self.postgresql_database.clone(),
            minsize: self.postgresql_pool_min_size,
            maxsize: self.postgresql_pool_max_size,
            pool_recycle: self.postgresql_pool_recycle,
        }
    }
}

impl Default for DefaultConfig {
    fn default() -> Self {
        Self {
            postgresql_host: "localhost".to_string(),
            postgresql_port: 5432,
            postgresql_username: "postgres".to_string(),
            postgresql_password: None,
            postgresql_database: "postgres".to_string(),
            postgresql_pool_min_size: 4,
            postgresql_pool_max_size: 32,
            postgresql_pool_recycle: true,
        }
    }
}

#[derive(Debug, DeriveConfig)]
pub struct DevelopConfig {
    #[config(base)]
    pub base: DefaultConfig,
}

impl Default for DevelopConfig {
    fn default() -> Self {
        let mut base = DefaultConfig::default();
        base.postgresql_database = "db".to_string();
        Self { base }
    }
}

#[derive(Debug, DeriveConfig)]
pub struct TestingConfig {
    #[config(base)]
    pub base: DevelopConfig,
}

impl Default for TestingConfig {
    fn default() -> Self {
        let mut base = DevelopConfig::default();
        base.base.postgresql_database = "db_test".to_string();
        Self { base }
    }
}

#[derive(Debug, DeriveConfig)]
pub struct ProductConfig {
    #[config(base)]
    pub base: DevelopConfig,
}

impl Default for ProductConfig {
    fn default() -> Self {
        let mut base = DevelopConfig::default();
        base.base.postgresql_host = "10.0.0.1".to_string();
        base.base.postgresql_database = "db_prod".to_string();
        base.base.postgresql_username = "prod_user".to_string();
        base.base.postgresql_password = Some("?????????".to_string());
        Self { base }
    }
}

// =============================================================================
// Selection Fixtures
// =============================================================================

#[derive(Debug, Default, DeriveConfig)]
pub struct ConfigA {
    pub name: String,
}

#[derive(Debug, Default, DeriveConfig)]
pub struct ConfigB {
    pub name: String,
}

#[derive(Debug, Default, DeriveConfig)]
pub struct ConfigC {
    pub name: String,
}

#[derive(Debug, Default, DeriveConfig)]
pub struct ConfigD {
    pub name: String,
}

/// Registry holding every fixture module
pub fn fixture_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();

    registry.register("tests.settings.default", |m| {
        m.class::<DefaultConfig>();
    });
    registry.register("tests.settings.develop", |m| {
        m.import::<DefaultConfig>("tests.settings.default")
            .class::<DevelopConfig>();
    });
    registry.register("tests.settings.testing", |m| {
        m.import::<DevelopConfig>("tests.settings.develop")
            .class::<TestingConfig>();
    });
    registry.register("tests.settings.product", |m| {
        m.import::<DevelopConfig>("tests.settings.develop")
            .class::<ProductConfig>();
    });

    registry.register("tests.settings.two_alphabetic_configs", |m| {
        m.class::<ConfigA>().class::<ConfigB>();
    });
    // Last defined sorts first
    registry.register("tests.settings.two_not_alphabetic_configs", |m| {
        m.class::<ConfigC>().class::<ConfigB>();
    });
    registry.register("tests.settings.two_hidden_configs", |m| {
        m.class::<ConfigC>()
            .class_as::<ConfigA>("_ConfigA")
            .class_as::<ConfigB>("_ConfigB");
    });
    registry.register("tests.settings.not_class_public_objects", |m| {
        m.class::<ConfigD>()
            .value("CONFIG_NAME", "not a class")
            .value("CONFIG_OPTIONS", serde_json::json!({"debug": true}))
            .function("make_config");
    });
    registry.register("tests.settings.two_not_public_configs", |m| {
        m.import::<ConfigA>("tests.settings.two_alphabetic_configs")
            .class::<ConfigC>()
            .import::<ConfigB>("tests.settings.two_alphabetic_configs");
    });
    registry.register("tests.settings.no_class_empty_config", |m| {
        m.value("DEBUG", true)
            .import::<DefaultConfig>("tests.settings.default");
    });
    registry.try_register("tests.settings.broken", |_| {
        Err("settings module raised during import".to_string())
    });

    registry
}

/// Handle loading `module` from the fixture registry
pub fn settings_for(module: &str) -> Settings {
    Settings::builder()
        .module(module)
        .importer(fixture_registry())
        .shared_env_source(StaticEnv::unset())
        .build()
}

// =============================================================================
// Test Doubles
// =============================================================================

/// Environment with a single fixed value, counting every read
pub struct StaticEnv {
    value: Option<String>,
    reads: AtomicUsize,
    keys: std::sync::Mutex<Vec<String>>,
}

impl StaticEnv {
    pub fn with(value: &str) -> Arc<Self> {
        Arc::new(Self {
            value: Some(value.to_string()),
            reads: AtomicUsize::new(0),
            keys: std::sync::Mutex::new(Vec::new()),
        })
    }

    pub fn unset() -> Arc<Self> {
        Arc::new(Self {
            value: None,
            reads: AtomicUsize::new(0),
            keys: std::sync::Mutex::new(Vec::new()),
        })
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Variable names read so far
    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

impl EnvSource for StaticEnv {
    fn var(&self, key: &str) -> std::result::Result<String, VarError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.keys.lock().unwrap().push(key.to_string());
        self.value.clone().ok_or(VarError::NotPresent)
    }
}

/// Importer counting every import
pub struct CountingImporter {
    inner: ModuleRegistry,
    imports: AtomicUsize,
}

impl CountingImporter {
    pub fn new(inner: ModuleRegistry) -> Arc<Self> {
        Arc::new(Self {
            inner,
            imports: AtomicUsize::new(0),
        })
    }

    pub fn imports(&self) -> usize {
        self.imports.load(Ordering::SeqCst)
    }
}

impl ModuleImporter for CountingImporter {
    fn import_module(&self, path: &str) -> Result<Arc<Namespace>> {
        self.imports.fetch_add(1, Ordering::SeqCst);
        self.inner.import_module(path)
    }
}

/// Initialize test logging once
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
