use clap::Subcommand;
use shared::{
    config::{render::RenderConfig, workers::WorkerCount},
    error::RenderResult,
};

use self::{render::RenderCommand, server::ServerCommand};

pub mod render;
pub mod server;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 🚀 Start Server
    ///
    /// Serve freshly rendered Mandelbrot PNGs over HTTP at /mandelbrot.
    Server(ServerCommand),

    /// 🖼️ Render Once
    ///
    /// Render a single image with the worker pool and write it as a PNG file.
    Render(RenderCommand),
}

/// Applies the size and worker flags shared by every subcommand.
fn apply_render_overrides(
    config: &mut RenderConfig,
    width: Option<u32>,
    height: Option<u32>,
    workers: Option<i64>,
) -> RenderResult<()> {
    if let Some(width) = width {
        config.resolution.width = width;
    }
    if let Some(height) = height {
        config.resolution.height = height;
    }
    if let Some(workers) = workers {
        config.workers = WorkerCount::try_from(workers)?;
    }
    Ok(())
}
