use quicksets::DeriveConfig;

#[derive(Default, DeriveConfig)]
#[config(property(name = "ADDRESS"))]
struct ServerConfig {
    port: u16,
}

fn main() {}
