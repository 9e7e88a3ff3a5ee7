use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

use super::{parse_var, render::RenderConfig};

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

pub const ADDRESS_VAR: &str = "MANDELWEB_ADDRESS";
pub const PORT_VAR: &str = "MANDELWEB_PORT";
pub const MAX_CONCURRENT_RENDERS_VAR: &str = "MANDELWEB_MAX_CONCURRENT_RENDERS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub render: RenderConfig,
    /// Upper bound on renders running at the same time, unbounded if `None`.
    pub max_concurrent_renders: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            render: RenderConfig::default(),
            max_concurrent_renders: None,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by any `MANDELWEB_*` variable present in the environment.
    pub fn from_env() -> RenderResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> RenderResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            render: RenderConfig::from_lookup(&lookup)?,
            ..Self::default()
        };

        if let Some(address) = lookup(ADDRESS_VAR) {
            config.address = address;
        }
        if let Some(port) = parse_var(&lookup, PORT_VAR)? {
            config.port = port;
        }

        if let Some(limit) = parse_var::<usize, _>(&lookup, MAX_CONCURRENT_RENDERS_VAR)? {
            config.max_concurrent_renders = Some(limit);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RenderResult<()> {
        self.render.validate()?;
        if self.max_concurrent_renders == Some(0) {
            return Err(RenderError::InvalidConfiguration(
                "max concurrent renders must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
