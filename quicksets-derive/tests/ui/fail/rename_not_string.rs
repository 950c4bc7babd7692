use quicksets::DeriveConfig;

#[derive(Default, DeriveConfig)]
struct ServerConfig {
    #[config(rename = 5)]
    port: u16,
}

fn main() {}
