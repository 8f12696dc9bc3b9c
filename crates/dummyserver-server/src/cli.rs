//! Command-line interface: `serve` and `openapi`.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use dummyserver_core::error::Result;

use crate::config::{self, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "dummyserver", version, about = "Counter demo HTTP service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server.
    Serve(ServeArgs),
    /// Print the OpenAPI document to stdout.
    Openapi,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// YAML config file. Built-in defaults are used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to (overrides server.listen).
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to bind to (overrides server.listen).
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Load the config file (if any) and apply host/port overrides.
    pub fn resolve(&self) -> Result<ServerConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_file(path)?,
            None => ServerConfig::default(),
        };

        if self.host.is_some() || self.port.is_some() {
            let current = cfg.listen_addr()?;
            let addr = SocketAddr::new(
                self.host.unwrap_or(current.ip()),
                self.port.unwrap_or(current.port()),
            );
            cfg.server.listen = addr.to_string();
        }

        cfg.validate()?;
        Ok(cfg)
    }
}
