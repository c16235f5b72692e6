//! Server command implementation

use anyhow::Result;
use purse_core::SuggestionEngine;
use purse_server::{CorsConfig, ServerConfig};

/// Build the server configuration from command-line and environment settings
pub fn server_config(currency: &str, allowed_origins: &str) -> ServerConfig {
    ServerConfig {
        cors: CorsConfig {
            allowed_origins: purse_server::parse_origins(allowed_origins),
            ..Default::default()
        },
        engine: SuggestionEngine::new(currency),
    }
}

pub async fn cmd_serve(host: &str, port: u16, currency: &str, allowed_origins: &str) -> Result<()> {
    let config = server_config(currency, allowed_origins);

    println!("🚀 Starting Purse suggestion server...");
    println!("   Listening: http://{}:{}", host, port);
    println!("   Endpoint: POST /api/suggestions");
    println!("   Currency: {}", config.engine.currency_symbol());
    if config.cors.allowed_origins.is_empty() {
        println!("   🌐 CORS: any origin");
    } else {
        println!(
            "   🌐 CORS: {} (PURSE_ALLOWED_ORIGINS)",
            config.cors.allowed_origins.join(", ")
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    purse_server::serve_with_config(host, port, config).await?;

    Ok(())
}
