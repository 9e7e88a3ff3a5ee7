use actix_web::{get, http::StatusCode, web, HttpResponse, Responder, ResponseError};
use log::{debug, error};
use serde::Serialize;
use shared::error::RenderError;

use crate::{render::render_png, server_state::ServerState};

/// HTTP face of [`RenderError`]. Every render failure is a server-side one.
#[derive(Debug)]
pub struct ApiError(pub RenderError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        ApiError(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub width: u32,
    pub height: u32,
    pub workers: usize,
    pub renders_completed: u64,
    pub renders_failed: u64,
}

#[get("/")]
async fn status(state: web::Data<ServerState>) -> impl Responder {
    let render = &state.config.render;
    web::Json(StatusResponse {
        width: render.resolution.width,
        height: render.resolution.height,
        workers: render.workers.get(),
        renders_completed: state.renders_completed(),
        renders_failed: state.renders_failed(),
    })
}

#[get("/mandelbrot")]
async fn mandelbrot(state: web::Data<ServerState>) -> Result<HttpResponse, ApiError> {
    // Held until the response is built.
    let _permit = match &state.render_permits {
        Some(permits) => Some(
            permits
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| RenderError::Scheduling(e.to_string()))?,
        ),
        None => None,
    };

    let config = state.config.render;
    let rendered = match web::block(move || render_png(&config)).await {
        Ok(rendered) => rendered,
        Err(e) => Err(RenderError::Scheduling(e.to_string())),
    };

    match rendered {
        Ok(png) => {
            state.record_completed();
            debug!("Serving {} byte PNG", png.len());
            Ok(HttpResponse::Ok().content_type("image/png").body(png))
        }
        Err(e) => {
            state.record_failed();
            error!("Render failed: {}", e);
            Err(e.into())
        }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(status).service(mandelbrot);
}
