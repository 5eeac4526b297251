use std::net::SocketAddr;

use serde::Deserialize;
use wsdial_core::error::{Result, WsDialError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub client: ClientSection,

    /// Companion HTTP server. Omitted means no ops server is started.
    #[serde(default)]
    pub ops: Option<OpsSection>,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(WsDialError::UnsupportedVersion);
        }

        self.client.validate()?;
        if let Some(ops) = &self.ops {
            ops.validate()?;
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default)]
    pub retry: RetrySection,

    #[serde(default = "default_subscriber_buffer")]
    pub subscriber_buffer: usize,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            url: default_url(),
            retry: RetrySection::default(),
            subscriber_buffer: default_subscriber_buffer(),
        }
    }
}

impl ClientSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Err(WsDialError::InvalidConfig(
                "client.url must start with ws:// or wss://".into(),
            ));
        }
        if !(1..=65536).contains(&self.subscriber_buffer) {
            return Err(WsDialError::InvalidConfig(
                "client.subscriber_buffer must be between 1 and 65536".into(),
            ));
        }
        self.retry.validate()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffKind {
    #[default]
    Fixed,
    Exponential,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default)]
    pub backoff: BackoffKind,

    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,

    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_ms: default_interval_ms(),
            backoff: BackoffKind::default(),
            max_interval_ms: default_max_interval_ms(),
            jitter: false,
        }
    }
}

impl RetrySection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.max_attempts) {
            return Err(WsDialError::InvalidConfig(
                "client.retry.max_attempts must be between 1 and 100".into(),
            ));
        }
        if self.interval_ms > 600_000 {
            return Err(WsDialError::InvalidConfig(
                "client.retry.interval_ms must be at most 600000".into(),
            ));
        }
        if self.backoff == BackoffKind::Exponential && self.max_interval_ms < self.interval_ms {
            return Err(WsDialError::InvalidConfig(
                "client.retry.max_interval_ms must not be less than interval_ms".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpsSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl OpsSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| {
                WsDialError::InvalidConfig(format!("ops.listen is not a socket address: {e}"))
            })
    }
}

fn default_url() -> String {
    "ws://localhost:8080/talk-to-server".into()
}
fn default_subscriber_buffer() -> usize {
    256
}
fn default_max_attempts() -> u32 {
    6
}
fn default_interval_ms() -> u64 {
    4000
}
fn default_max_interval_ms() -> u64 {
    60000
}
fn default_listen() -> String {
    "127.0.0.1:9090".into()
}
