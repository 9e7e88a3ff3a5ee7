use clap::Parser;
use shared::{config::server::ServerConfig, error::RenderResult};

use super::apply_render_overrides;

/// 🖥️ Server Command
///
/// This command is used to configure and 🚀 start the rendering server.
/// Flags take precedence over `MANDELWEB_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "server", about = "🚀 Start and configure the server.", long_about = None)]
pub struct ServerCommand {
    /// 📌 Server IP address
    ///
    /// Specify the IP address 🌐 where the server will listen for incoming connections.
    /// Default is 127.0.0.1 if not specified.
    #[arg(short, long, value_name = "ADDRESS")]
    pub address: Option<String>,

    /// 🚪 Server port
    ///
    /// Define the port number 🎛️ on which the server will listen.
    /// Default is 8080 if not specified.
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// 📏 Image width
    ///
    /// Width in pixels of every rendered image 📐. Default is 512.
    #[arg(long, value_name = "WIDTH")]
    pub width: Option<u32>,

    /// 📐 Image height
    ///
    /// Height in pixels of every rendered image 🧱. Default is 512.
    #[arg(long, value_name = "HEIGHT")]
    pub height: Option<u32>,

    /// 👷 Workers per render
    ///
    /// Number of threads each render is split across.
    /// Defaults to the number of available processing units.
    #[arg(short, long, value_name = "WORKERS", allow_negative_numbers = true)]
    pub workers: Option<i64>,

    /// 🚦 Concurrent renders
    ///
    /// Maximum number of renders running at the same time. Unbounded if not set.
    #[arg(long, value_name = "COUNT")]
    pub max_concurrent_renders: Option<usize>,
}

impl ServerCommand {
    pub fn into_config(self, mut config: ServerConfig) -> RenderResult<ServerConfig> {
        if let Some(address) = self.address {
            config.address = address;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(limit) = self.max_concurrent_renders {
            config.max_concurrent_renders = Some(limit);
        }
        apply_render_overrides(&mut config.render, self.width, self.height, self.workers)?;

        config.validate()?;
        Ok(config)
    }
}
