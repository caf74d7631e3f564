//! Server configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{Result, ServerError};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default GraphQL endpoint path.
pub const DEFAULT_ENDPOINT: &str = "/graphql";

#[derive(Debug, Parser)]
#[command(name = "livepost-server")]
#[command(about = "GraphQL post board with real-time subscriptions")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, env = "LIVEPOST_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Path serving GraphQL queries, mutations and subscriptions
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Directory holding the client bundle
    #[arg(long, default_value = "client")]
    pub client_dir: PathBuf,

    /// Events buffered per subscriber before new ones are skipped
    #[arg(long, default_value_t = livepost_core::DEFAULT_LISTENER_CAPACITY)]
    pub subscriber_buffer: usize,

    /// Start with an empty post list
    #[arg(long, default_value_t = false)]
    pub no_seed: bool,

    /// Don't serve GraphiQL on plain GET requests to the endpoint
    #[arg(long, default_value_t = false)]
    pub no_playground: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub endpoint: String,
    pub client_dir: PathBuf,
    pub subscriber_buffer: usize,
    pub seed: bool,
    pub playground: bool,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            endpoint: args.endpoint,
            client_dir: args.client_dir,
            subscriber_buffer: args.subscriber_buffer,
            seed: !args.no_seed,
            playground: !args.no_playground,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client_dir: PathBuf::from("client"),
            subscriber_buffer: livepost_core::DEFAULT_LISTENER_CAPACITY,
            seed: true,
            playground: true,
        }
    }
}

impl ServerConfig {
    /// Reject settings the router cannot honor.
    pub fn validate(&self) -> Result<()> {
        if !self.endpoint.starts_with('/') {
            return Err(ServerError::Config(format!(
                "endpoint must start with '/': {}",
                self.endpoint
            )));
        }
        if self.endpoint == "/" || self.endpoint == "/health" {
            return Err(ServerError::Config(format!(
                "endpoint {} collides with a built-in route",
                self.endpoint
            )));
        }
        if self.subscriber_buffer == 0 {
            return Err(ServerError::Config(
                "subscriber buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn http_url(&self) -> String {
        format!("http://{}:{}{}", self.display_host(), self.port, self.endpoint)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}:{}{}", self.display_host(), self.port, self.endpoint)
    }

    fn display_host(&self) -> &str {
        match self.host.as_str() {
            "0.0.0.0" | "::" => "localhost",
            host => host,
        }
    }
}
