//! Server Configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Listener and static asset settings
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,

    /// Compiled front end served for every non-API path
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    /// Read `BIND_ADDR` and `STATIC_DIR`
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("invalid BIND_ADDR: {addr}"))?;
        }
        if let Ok(dir) = std::env::var("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}
