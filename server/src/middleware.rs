//! Request timing around any actix-web service.
//!
//! [`RequestLogger`] measures how long the wrapped service takes and hands a
//! [`RequestRecord`] to its [`RequestLogSink`] once per request, whether the
//! service produced a response or an error. The response passes through
//! unchanged.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    time::{Duration, Instant},
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures_util::future::LocalBoxFuture;
use log::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub remote_addr: Option<String>,
    pub path: String,
    pub elapsed: Duration,
}

/// Receives one [`RequestRecord`] per handled request.
pub trait RequestLogSink: Send + Sync + 'static {
    fn record(&self, record: RequestRecord);
}

/// Writes each record as an `info` line through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl RequestLogSink for LogSink {
    fn record(&self, record: RequestRecord) {
        info!(
            "{} {} {:?}",
            record.remote_addr.as_deref().unwrap_or("-"),
            record.path,
            record.elapsed
        );
    }
}

pub struct RequestLogger<K = LogSink> {
    sink: Arc<K>,
}

impl Default for RequestLogger<LogSink> {
    fn default() -> Self {
        Self::with_sink(Arc::new(LogSink))
    }
}

impl<K: RequestLogSink> RequestLogger<K> {
    pub fn with_sink(sink: Arc<K>) -> Self {
        Self { sink }
    }
}

impl<S, B, K> Transform<S, ServiceRequest> for RequestLogger<K>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    K: RequestLogSink,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestLoggerMiddleware<S, K>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware {
            service: Rc::new(service),
            sink: Arc::clone(&self.sink),
        }))
    }
}

pub struct RequestLoggerMiddleware<S, K> {
    service: Rc<S>,
    sink: Arc<K>,
}

impl<S, B, K> Service<ServiceRequest> for RequestLoggerMiddleware<S, K>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    K: RequestLogSink,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let remote_addr = req.peer_addr().map(|addr| addr.to_string());
        let path = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.path().to_string());
        let sink = Arc::clone(&self.sink);
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let result = service.call(req).await;
            sink.record(RequestRecord {
                remote_addr,
                path,
                elapsed: start.elapsed(),
            });
            result
        })
    }
}
