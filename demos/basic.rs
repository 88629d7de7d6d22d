//! Basic usage example

use envtag::EnvTag;

#[derive(Debug, Default, EnvTag)]
struct Config {
    // Required field: loaded from DATABASE_URL environment variable
    pub database_url: String,

    // Numeric type with a type hint
    #[env("MAX_CONNECTIONS,uint64")]
    pub max_connections: u64,

    // Boolean type
    #[env("DEBUG_MODE")]
    pub debug_mode: bool,
}

fn main() -> anyhow::Result<()> {
    // Decode an explicit KEY=VALUE list
    let config = Config::from_pairs([
        "DATABASE_URL=postgres://localhost/mydb",
        "MAX_CONNECTIONS=10",
        "DEBUG_MODE=false",
    ])?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);

    // Or read the same fields from the process environment
    std::env::set_var("DATABASE_URL", "postgres://localhost/envdb");
    std::env::set_var("MAX_CONNECTIONS", "20");
    std::env::set_var("DEBUG_MODE", "TRUE");

    let config = Config::from_env()?;
    println!("From environment: {:?}", config);

    Ok(())
}
