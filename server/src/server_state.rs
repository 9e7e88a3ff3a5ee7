use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::config::server::ServerConfig;
use tokio::sync::Semaphore;

#[derive(Debug)]
pub struct ServerState {
    pub config: ServerConfig,
    pub render_permits: Option<Arc<Semaphore>>,
    renders_completed: AtomicU64,
    renders_failed: AtomicU64,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        let render_permits = config
            .max_concurrent_renders
            .map(|limit| Arc::new(Semaphore::new(limit)));
        ServerState {
            config,
            render_permits,
            renders_completed: AtomicU64::new(0),
            renders_failed: AtomicU64::new(0),
        }
    }

    pub fn record_completed(&self) {
        self.renders_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.renders_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn renders_completed(&self) -> u64 {
        self.renders_completed.load(Ordering::Relaxed)
    }

    pub fn renders_failed(&self) -> u64 {
        self.renders_failed.load(Ordering::Relaxed)
    }
}
