use quicksets::DeriveConfig;

#[derive(Default, DeriveConfig)]
#[config(frozen)]
struct ServerConfig {
    port: u16,
}

fn main() {}
