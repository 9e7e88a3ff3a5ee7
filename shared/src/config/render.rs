use serde::{Deserialize, Serialize};

use crate::{
    error::{RenderError, RenderResult},
    models::{fractal::mandelbrot::DEFAULT_GRID_SIZE, resolution::Resolution},
};

use super::{parse_var, workers::WorkerCount};

pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;

pub const WIDTH_VAR: &str = "MANDELWEB_WIDTH";
pub const HEIGHT_VAR: &str = "MANDELWEB_HEIGHT";
pub const WORKERS_VAR: &str = "MANDELWEB_WORKERS";

/// What a single render produces and how many threads it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub resolution: Resolution,
    pub grid_size: u32,
    pub workers: WorkerCount,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            grid_size: DEFAULT_GRID_SIZE,
            workers: WorkerCount::available(),
        }
    }
}

impl RenderConfig {
    pub fn new(resolution: Resolution, workers: WorkerCount) -> Self {
        Self {
            resolution,
            workers,
            ..Self::default()
        }
    }

    /// Defaults overridden by the size and worker variables only, so a
    /// broken server setting never gets in the way of a one-off render.
    pub fn from_env() -> RenderResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> RenderResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let width = parse_var(&lookup, WIDTH_VAR)?.unwrap_or(config.resolution.width);
        let height = parse_var(&lookup, HEIGHT_VAR)?.unwrap_or(config.resolution.height);
        config.resolution = Resolution::new(width, height);

        if let Some(workers) = parse_var::<i64, _>(&lookup, WORKERS_VAR)? {
            config.workers = WorkerCount::try_from(workers)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RenderResult<()> {
        self.resolution.validate()?;
        if self.grid_size == 0 {
            return Err(RenderError::InvalidConfiguration(
                "grid size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::server::PORT_VAR;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn reads_size_and_workers() {
        let config =
            RenderConfig::from_lookup(lookup(&[(WIDTH_VAR, "40"), (WORKERS_VAR, "2")])).unwrap();
        assert_eq!(config.resolution, Resolution::new(40, DEFAULT_HEIGHT));
        assert_eq!(config.workers.get(), 2);
        assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
    }

    #[test]
    fn ignores_server_only_variables() {
        let config = RenderConfig::from_lookup(lookup(&[(PORT_VAR, "not-a-port")])).unwrap();
        assert_eq!(config.resolution, Resolution::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    #[test]
    fn rejects_empty_images_and_negative_workers() {
        for vars in [[(HEIGHT_VAR, "0")], [(WORKERS_VAR, "-1")]] {
            let err = RenderConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(matches!(err, RenderError::InvalidConfiguration(_)));
        }
    }
}
