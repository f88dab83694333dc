pub mod handlers;
mod types;

pub use types::{DiagnoseRequest, ErrorResponse};

use crate::{
    Result,
    config::{Config, ServerConfig},
    diagnosis::DiagnosisService,
};
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub const DIAGNOSE_PATH: &str = "/api/diagnose";

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route(
            DIAGNOSE_PATH,
            post(handlers::diagnose).fallback(handlers::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

pub async fn run(config: Config) -> Result<()> {
    let app_state = AppState {
        service: Arc::new(DiagnosisService::from_config(&config)),
    };

    let app = router(app_state, &config.server);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
