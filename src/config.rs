//! Server configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::model_loader::default_model_path;

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port
pub const DEFAULT_PORT: u16 = 8501;

/// Settings for `serve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Model artifact location
    pub model_path: PathBuf,
}

impl ServerConfig {
    /// Build a config, resolving the default model path when none is given
    ///
    /// # Errors
    ///
    /// Returns an error if no path is given and the binary location is
    /// unknown.
    pub fn new(host: impl Into<String>, port: u16, model_path: Option<PathBuf>) -> Result<Self> {
        let model_path = match model_path {
            Some(p) => p,
            None => default_model_path()?,
        };
        Ok(Self {
            host: host.into(),
            port,
            model_path,
        })
    }

    /// Socket address to listen on
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if host and port do not form an address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid address {}:{}: {e}", self.host, self.port)))
    }
}
