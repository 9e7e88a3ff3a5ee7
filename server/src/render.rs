use std::io::Write;

use image::{codecs::png::PngEncoder, GenericImageView, ImageEncoder};
use log::debug;
use shared::{config::render::RenderConfig, error::RenderResult, models::raster::RasterImage};
use worker::RenderJob;

/// Allocates a raster for `config` and fills it on `config.workers` threads.
pub fn render_raster(config: &RenderConfig) -> RenderResult<RasterImage> {
    config.validate()?;
    let mut image = RasterImage::new(config.resolution)?;
    RenderJob::new(&mut image, config.workers.get())?
        .with_grid_size(config.grid_size)?
        .run()?;
    Ok(image)
}

/// Writes `image` to `writer` as a PNG, reading it through its
/// `GenericImageView` in the raster's own color model.
pub fn encode_png<W: Write>(image: &RasterImage, writer: W) -> RenderResult<()> {
    let (width, height) = GenericImageView::dimensions(image);
    PngEncoder::new(writer).write_image(
        &image.to_bytes(),
        width,
        height,
        image.color_model().color_type(),
    )?;
    Ok(())
}

pub fn render_png_to<W: Write>(config: &RenderConfig, writer: W) -> RenderResult<()> {
    let image = render_raster(config)?;
    encode_png(&image, writer)
}

/// Renders from scratch and returns the PNG bytes. Nothing is cached.
pub fn render_png(config: &RenderConfig) -> RenderResult<Vec<u8>> {
    let mut png = Vec::new();
    render_png_to(config, &mut png)?;
    debug!(
        "Rendered {} image with {} workers into {} bytes",
        config.resolution,
        config.workers,
        png.len()
    );
    Ok(png)
}
