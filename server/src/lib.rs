pub mod handlers;
pub mod middleware;
pub mod render;
pub mod server_state;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::{error, info};
use shared::config::server::ServerConfig;

use self::{middleware::RequestLogger, server_state::ServerState};

pub async fn run_server(config: ServerConfig) {
    match run(config).await {
        Ok(()) => info!("Server shutdown gracefully"),
        Err(e) => error!("Server error: {}", e),
    }
}

async fn run(config: ServerConfig) -> std::io::Result<()> {
    let bind_address = config.bind_address();
    info!(
        "🌀 Rendering {} images with {} workers at http://{}/mandelbrot",
        config.render.resolution, config.render.workers, bind_address
    );
    if let Some(limit) = config.max_concurrent_renders {
        info!("At most {} renders run at once", limit);
    }

    let state = web::Data::new(ServerState::new(config));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(RequestLogger::default())
            .configure(handlers::routes)
    })
    .disable_signals()
    .bind(bind_address)?
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received ctrl+c, stopping");
                server_handle.stop(true).await;
            }
            Err(e) => error!("Failed to listen for ctrl+c signal: {}", e),
        }
    });

    match server_task.await {
        Ok(result) => result,
        Err(e) => Err(std::io::Error::new(std::io::ErrorKind::Other, e)),
    }
}
