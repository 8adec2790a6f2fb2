//! ProTrade Web Server
//!
//! The HTTP entry point for the mock trading platform demo.

use clap::Parser;
use protrade_web::server::ProTradeServerBuilder;
use protrade_web::{init_logging, WebConfig};

/// ProTrade web server - mock trading platform demo
#[derive(Parser)]
#[command(name = "protrade-web")]
#[command(about = "Web interface for the ProTrade demo platform")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Platform configuration file (TOML)
    #[arg(long)]
    config: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    std::env::set_var(
        "RUST_LOG",
        format!("protrade_web={},tower_http=debug", args.log_level),
    );
    init_logging();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Create web configuration, overriding env values with CLI arguments
    let mut config = WebConfig::from_env();
    config.host = args.host;
    config.port = args.port;
    if args.config.is_some() {
        config.config_file = args.config;
    }

    println!("Starting ProTrade web server");
    println!("Server: http://{}:{}", config.host, config.port);
    if let Some(config_file) = &config.config_file {
        println!("Platform config: {}", config_file);
    }

    let mut builder = ProTradeServerBuilder::new()
        .host(config.host.clone())
        .port(config.port);
    if let Some(config_file) = config.config_file.clone() {
        builder = builder.config_file(config_file);
    }

    let server = match builder.build() {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        eprintln!("Server failed to start: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["protrade-web"]);
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 8080);
        assert!(args.config.is_none());

        let args = Args::parse_from(["protrade-web", "--host", "0.0.0.0", "--port", "3000"]);
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 3000);
    }
}
