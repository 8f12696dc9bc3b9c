//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use dummyserver_core::error::{CounterError, Result};

pub use schema::{CounterSection, LogFormat, LoggingSection, ServerConfig, ServerSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ServerConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        CounterError::Internal(format!("read config failed ({}): {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| CounterError::Validation(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
