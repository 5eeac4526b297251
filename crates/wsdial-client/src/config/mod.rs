//! Client config loader (strict parsing).

pub mod schema;

use std::fs;

use wsdial_core::error::{Result, WsDialError};

pub use schema::{BackoffKind, ClientConfig, ClientSection, OpsSection, RetrySection};

/// Config path used when neither the CLI nor `WSDIAL_CONFIG` names one.
pub const DEFAULT_CONFIG_PATH: &str = "wsdial.yaml";

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| WsDialError::InvalidConfig(format!("read {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = serde_yaml::from_str(s)
        .map_err(|e| WsDialError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
