//! Example demonstrating flag maps and base64 encoded values

use envtag::EnvTag;
use std::collections::HashMap;

#[derive(Debug, Default, Clone, EnvTag)]
struct Config {
    pub app_name: String,

    // Signed offset and machine word sized worker count
    #[env("CLOCK_SKEW,int64")]
    pub clock_skew: i64,

    #[env("WORKERS,int")]
    pub workers: isize,

    // Flags in `name:bool;name:bool` form
    #[env("FEATURES")]
    pub features: HashMap<String, bool>,

    // Base64 encoded key material
    #[env("SIGNING_KEY,b64")]
    pub signing_key: Vec<u8>,
}

fn main() -> anyhow::Result<()> {
    let pairs = [
        "APP_NAME=my-application",
        "CLOCK_SKEW=-250",
        "WORKERS=4",
        "FEATURES=metrics:true;tracing:false;beta:1",
        "SIGNING_KEY=MTIzCg==",
    ];

    let config = Config::from_pairs(pairs)?;

    println!("Configuration loaded:");
    println!("  App Name: {}", config.app_name);
    println!("  Clock Skew: {}", config.clock_skew);
    println!("  Workers: {}", config.workers);
    println!("  Features: {:?}", config.features);
    println!("  Signing Key: {} bytes", config.signing_key.len());

    // A malformed flag map leaves the previous configuration intact
    let mut current = config.clone();
    let result = envtag::decode_atomic(
        [
            "APP_NAME=renamed",
            "CLOCK_SKEW=0",
            "WORKERS=1",
            "FEATURES=metrics",
            "SIGNING_KEY=",
        ],
        &mut current,
    );
    if let Err(e) = result {
        println!("Rejected update: {}", e);
    }
    println!("  App Name after rejected update: {}", current.app_name);

    Ok(())
}
