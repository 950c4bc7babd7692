use quicksets::DeriveConfig;

#[derive(DeriveConfig)]
struct Port(u16);

fn main() {}
