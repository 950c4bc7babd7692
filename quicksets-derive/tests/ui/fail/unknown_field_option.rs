use quicksets::DeriveConfig;

#[derive(Default, DeriveConfig)]
struct ServerConfig {
    #[config(flatten)]
    port: u16,
}

fn main() {}
