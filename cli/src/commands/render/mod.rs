use std::{fs, path::PathBuf, time::Instant};

use clap::Parser;
use log::info;
use shared::{
    config::render::RenderConfig,
    error::{RenderError, RenderResult},
};

use super::apply_render_overrides;

/// 🖼️ Render Command
///
/// Renders one image and saves it, without starting the server.
#[derive(Parser, Debug)]
pub struct RenderCommand {
    /// 💾 Output file
    #[arg(short, long, value_name = "FILE", default_value = "mandelbrot.png")]
    pub output: PathBuf,

    #[arg(long, value_name = "WIDTH")]
    pub width: Option<u32>,

    #[arg(long, value_name = "HEIGHT")]
    pub height: Option<u32>,

    #[arg(short, long, value_name = "WORKERS", allow_negative_numbers = true)]
    pub workers: Option<i64>,
}

impl RenderCommand {
    pub fn render_config(&self, mut config: RenderConfig) -> RenderResult<RenderConfig> {
        apply_render_overrides(&mut config, self.width, self.height, self.workers)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders in memory first; the output file is only created once the PNG exists.
    pub fn run(&self, base: RenderConfig) -> RenderResult<()> {
        let config = self.render_config(base)?;
        let start = Instant::now();

        let png = server::render::render_png(&config)?;
        fs::write(&self.output, &png).map_err(|e| RenderError::WriteFailure {
            path: self.output.display().to_string(),
            message: e.to_string(),
        })?;

        info!(
            "Wrote {} image to {} in {:?}",
            config.resolution,
            self.output.display(),
            start.elapsed()
        );
        Ok(())
    }
}
