//! Palindrome Server binary
//!
//! Loads configuration (the `PORT` environment variable selects the bind
//! port) and runs the HTTP server until a termination signal.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env, if any
    dotenvy::dotenv().ok();

    // Load configuration; a missing or invalid PORT is fatal
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
