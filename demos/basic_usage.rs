//! Basic usage of quicksets
//!
//! Run with `SETTINGS=myapp.settings.product cargo run --example basic_usage`
//! (falls back to the develop settings when `SETTINGS` is unset).

use quicksets::{DeriveConfig, ModuleRegistry, Settings};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ConnectionOptions {
    user: String,
    password: Option<String>,
    host: String,
    port: u16,
    database: String,
}

#[derive(DeriveConfig)]
#[config(property(name = "POSTGRESQL_CONNECTION_OPTIONS", getter = "connection_options"))]
struct DevelopConfig {
    postgresql_host: String,
    postgresql_port: u16,
    postgresql_username: String,
    postgresql_password: Option<String>,
    postgresql_database: String,
}

impl DevelopConfig {
    fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            user: self.postgresql_username.clone(),
            password: self.postgresql_password.clone(),
            host: self.postgresql_host.clone(),
            port: self.postgresql_port,
            database: self.postgresql_database.clone(),
        }
    }
}

impl Default for DevelopConfig {
    fn default() -> Self {
        Self {
            postgresql_host: "localhost".into(),
            postgresql_port: 5432,
            postgresql_username: "postgres".into(),
            postgresql_password: None,
            postgresql_database: "db".into(),
        }
    }
}

#[derive(DeriveConfig)]
struct ProductConfig {
    #[config(base)]
    develop: DevelopConfig,
}

impl Default for ProductConfig {
    fn default() -> Self {
        let mut develop = DevelopConfig::default();
        develop.postgresql_host = "10.0.0.1".into();
        develop.postgresql_database = "db_prod".into();
        develop.postgresql_username = "prod_user".into();
        develop.postgresql_password = Some("?????????".into());
        Self { develop }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut registry = ModuleRegistry::new();
    registry.register("myapp.settings.develop", |m| {
        m.class::<DevelopConfig>();
    });
    registry.register("myapp.settings.product", |m| {
        m.import::<DevelopConfig>("myapp.settings.develop")
            .class::<ProductConfig>();
    });
    quicksets::install(registry)?;

    let settings: Settings = if std::env::var_os("SETTINGS").is_some() {
        Settings::new()
    } else {
        Settings::with_module("myapp.settings.develop")
    };

    println!("Module:  {}", settings.module_name()?);
    println!("Class:   {}", settings.class_name()?);
    println!(
        "Options: {}",
        serde_json::to_string_pretty(&settings.get("POSTGRESQL_CONNECTION_OPTIONS")?)?
    );

    Ok(())
}
