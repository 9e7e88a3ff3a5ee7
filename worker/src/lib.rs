use std::{
    sync::{mpsc, Mutex},
    thread,
};

use log::{debug, error};
use shared::{
    error::{RenderError, RenderResult},
    models::{
        color::Color,
        fractal::mandelbrot::{Mandelbrot, DEFAULT_GRID_SIZE},
        raster::RasterImage,
    },
};

/// One row of the raster waiting in the queue for a worker.
struct WorkUnit<'a> {
    y: usize,
    pixels: &'a mut [Color],
}

/// A raster bound to the number of threads that will fill it.
pub struct RenderJob<'a> {
    image: &'a mut RasterImage,
    workers: usize,
    grid_size: u32,
    fractal: Mandelbrot,
}

impl<'a> RenderJob<'a> {
    /// Fails with `InvalidConfiguration` when `workers` is zero. The image
    /// is not touched in that case.
    pub fn new(image: &'a mut RasterImage, workers: usize) -> RenderResult<Self> {
        if workers == 0 {
            return Err(RenderError::InvalidConfiguration(
                "worker count must be at least 1, got 0".to_string(),
            ));
        }
        Ok(Self {
            image,
            workers,
            grid_size: DEFAULT_GRID_SIZE,
            fractal: Mandelbrot::default(),
        })
    }

    pub fn with_grid_size(mut self, grid_size: u32) -> RenderResult<Self> {
        if grid_size == 0 {
            return Err(RenderError::InvalidConfiguration(
                "grid size must be positive".to_string(),
            ));
        }
        self.grid_size = grid_size;
        Ok(self)
    }

    pub fn with_fractal(mut self, fractal: Mandelbrot) -> Self {
        self.fractal = fractal;
        self
    }

    pub fn run(self) -> RenderResult<()> {
        self.run_observed(|_, _| {})
    }

    /// Fills every pixel and blocks until all workers are done.
    ///
    /// `observer(worker, row)` is called once for every row, from the worker
    /// that took it off the queue.
    pub fn run_observed<F>(self, observer: F) -> RenderResult<()>
    where
        F: Fn(usize, usize) + Sync,
    {
        let RenderJob {
            image,
            workers,
            grid_size,
            fractal,
        } = self;
        let height = image.height();

        let (tx, rx) = mpsc::channel();
        for (y, pixels) in image.rows_mut() {
            tx.send(WorkUnit { y, pixels })
                .map_err(|_| RenderError::Scheduling("row queue closed early".to_string()))?;
        }
        // No more rows: workers stop once the queue is drained.
        drop(tx);

        let queue = Mutex::new(rx);
        let fractal = &fractal;
        let observer = &observer;

        debug!("Filling {} rows with {} workers", height, workers);

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            let mut spawn_error = None;

            for worker in 0..workers {
                let queue = &queue;
                let spawned = thread::Builder::new()
                    .name(format!("render-worker-{worker}"))
                    .spawn_scoped(scope, move || {
                        let mut rows = 0usize;
                        loop {
                            let next = match queue.lock() {
                                Ok(rx) => rx.recv(),
                                Err(_) => break,
                            };
                            let Ok(WorkUnit { y, pixels }) = next else {
                                break;
                            };

                            for (x, pixel) in pixels.iter_mut().enumerate() {
                                *pixel = fractal.color_at(x as u32, y as u32, grid_size);
                            }
                            observer(worker, y);
                            rows += 1;
                        }
                        debug!("Worker {} filled {} rows", worker, rows);
                    });

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        error!("Failed to spawn render worker {}: {}", worker, e);
                        spawn_error = Some(RenderError::Scheduling(e.to_string()));
                        break;
                    }
                }
            }

            let mut panicked = false;
            for handle in handles {
                if handle.join().is_err() {
                    panicked = true;
                }
            }

            match (panicked, spawn_error) {
                (true, _) => Err(RenderError::WorkerPanicked),
                (false, Some(e)) => Err(e),
                (false, None) => Ok(()),
            }
        })
    }
}

/// Fills `image` using `workers` threads with the default fractal parameters.
pub fn fill_image(image: &mut RasterImage, workers: usize) -> RenderResult<()> {
    RenderJob::new(image, workers)?.run()
}

/// Same as [`fill_image`], reporting each `(worker, row)` hand-off to `observer`.
pub fn fill_image_observed<F>(
    image: &mut RasterImage,
    workers: usize,
    observer: F,
) -> RenderResult<()>
where
    F: Fn(usize, usize) + Sync,
{
    RenderJob::new(image, workers)?.run_observed(observer)
}
