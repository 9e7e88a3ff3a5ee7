use std::{collections::HashSet, sync::Mutex};

use shared::{
    error::RenderError,
    models::{
        fractal::mandelbrot::{compute_color, DEFAULT_GRID_SIZE},
        raster::RasterImage,
        resolution::Resolution,
    },
};
use worker::{fill_image, fill_image_observed};

fn render(resolution: Resolution, workers: usize) -> RasterImage {
    let mut image = RasterImage::new(resolution).unwrap();
    fill_image(&mut image, workers).unwrap();
    image
}

#[test]
fn worker_count_does_not_change_the_image() {
    let resolution = Resolution::new(96, 64);
    let reference = render(resolution, 1);

    for workers in [2, 3, 4, 8, 13] {
        let image = render(resolution, workers);
        assert_eq!(image, reference, "{workers} workers produced a different image");
        assert_eq!(image.to_bytes(), reference.to_bytes());
    }
}

#[test]
fn every_row_is_delivered_to_exactly_one_worker() {
    let height = 120;
    let mut image = RasterImage::new(Resolution::new(16, height)).unwrap();
    let deliveries = Mutex::new(Vec::new());

    fill_image_observed(&mut image, 6, |worker, row| {
        deliveries.lock().unwrap().push((worker, row));
    })
    .unwrap();

    let deliveries = deliveries.into_inner().unwrap();
    assert_eq!(deliveries.len(), height as usize);

    let rows: HashSet<usize> = deliveries.iter().map(|&(_, row)| row).collect();
    assert_eq!(rows, (0..height as usize).collect::<HashSet<_>>());
    assert!(deliveries.iter().all(|&(worker, _)| worker < 6));
}

#[test]
fn negative_and_zero_counts_fail_before_any_write() {
    let mut image = RasterImage::new(Resolution::square(4)).unwrap();
    let untouched = image.clone();
    let calls = Mutex::new(0);

    let err = fill_image_observed(&mut image, 0, |_, _| *calls.lock().unwrap() += 1).unwrap_err();

    assert!(matches!(err, RenderError::InvalidConfiguration(_)));
    assert_eq!(*calls.lock().unwrap(), 0);
    assert_eq!(image, untouched);

    assert!(matches!(
        shared::config::workers::WorkerCount::try_from(-1),
        Err(RenderError::InvalidConfiguration(_))
    ));
}

#[test]
fn single_pixel_image_completes() {
    let image = render(Resolution::square(1), 4);
    assert_eq!(image.at(0, 0), compute_color(0, 0, DEFAULT_GRID_SIZE));
}

#[test]
fn full_size_render_matches_kernel_everywhere() {
    let image = render(Resolution::square(512), 4);

    for y in (0..512).step_by(31) {
        for x in (0..512).step_by(29) {
            assert_eq!(image.at(x, y), compute_color(x, y, DEFAULT_GRID_SIZE));
        }
    }
    assert_eq!(image.at(511, 511), compute_color(511, 511, DEFAULT_GRID_SIZE));
}
