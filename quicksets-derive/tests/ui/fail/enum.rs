use quicksets::DeriveConfig;

#[derive(DeriveConfig)]
enum Mode { Develop, Product }

fn main() {}
