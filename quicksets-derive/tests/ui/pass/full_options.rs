use quicksets::{Config, ConfigObject, DeriveConfig};
use serde::Serialize;

#[derive(Serialize)]
struct Endpoint {
    host: String,
    port: u16,
}

#[derive(Default, DeriveConfig)]
struct BaseConfig {
    host: String,
}

#[derive(Default, DeriveConfig)]
#[config(class_name = "ServerSettings", constants(VERSION))]
#[config(property(name = "ENDPOINT", getter = "endpoint"))]
struct ServerConfig {
    #[config(base)]
    base: BaseConfig,
    #[config(rename = "LISTEN_PORT")]
    port: u16,
    #[config(skip)]
    cache: Vec<u8>,
}

impl ServerConfig {
    const VERSION: u32 = 2;

    fn endpoint(&self) -> Endpoint {
        Endpoint {
            host: self.base.host.clone(),
            port: self.port,
        }
    }
}

fn main() {
    let config = ServerConfig::default();
    assert_eq!(ServerConfig::CLASS_NAME, "ServerSettings");
    assert!(config.has_attr("ENDPOINT"));
    assert!(config.has_attr("VERSION"));
    assert!(config.has_attr("HOST"));
    assert!(!config.has_attr("CACHE"));
    assert!(config.cache.is_empty());
}
