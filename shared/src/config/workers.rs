use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Number of threads a single render is split across. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct WorkerCount(NonZeroUsize);

impl WorkerCount {
    pub fn new(count: usize) -> RenderResult<Self> {
        NonZeroUsize::new(count)
            .map(Self)
            .ok_or_else(|| invalid_count(count as i64))
    }

    /// One worker per processing unit reported by the OS, or one if unknown.
    pub fn available() -> Self {
        Self(std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for WorkerCount {
    fn default() -> Self {
        Self::available()
    }
}

impl TryFrom<i64> for WorkerCount {
    type Error = RenderError;

    fn try_from(value: i64) -> RenderResult<Self> {
        if value <= 0 {
            return Err(invalid_count(value));
        }
        let count = usize::try_from(value).map_err(|_| invalid_count(value))?;
        Self::new(count)
    }
}

impl From<WorkerCount> for i64 {
    fn from(count: WorkerCount) -> Self {
        count.get() as i64
    }
}

impl std::fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

fn invalid_count(value: i64) -> RenderError {
    RenderError::InvalidConfiguration(format!(
        "worker count must be at least 1, got {value}"
    ))
}
