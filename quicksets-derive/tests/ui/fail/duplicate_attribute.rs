use quicksets::DeriveConfig;

#[derive(Default, DeriveConfig)]
struct ServerConfig {
    port: u16,
    #[config(rename = "PORT")]
    listen_port: u16,
}

fn main() {}
