use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, Notify};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::feed::{run_refresh_loop, HttpFixSource};
use crate::sim::{MarkerPosition, Simulator, TickSet};

use super::api::state as state_handlers;
use super::api::status as status_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub simulator: Arc<Mutex<Simulator>>,
    pub ticks: watch::Receiver<TickSet>,
    pub markers: watch::Receiver<Arc<Vec<MarkerPosition>>>,
    pub refresh: Arc<Notify>,
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let simulator = Simulator::new(config.engine.simulator_config());
    let ticks = simulator.subscribe_ticks();
    let markers = simulator.subscribe_markers();
    let simulator = Arc::new(Mutex::new(simulator));
    let refresh = Arc::new(Notify::new());

    let source = HttpFixSource::new(config.feed.url.clone(), config.feed.timeout)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    tokio::spawn(run_refresh_loop(
        source,
        simulator.clone(),
        config.feed.refresh,
        refresh.clone(),
    ));

    let state = AppState {
        simulator,
        ticks,
        markers,
        refresh,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/satellites", get(state_handlers::list_satellites))
        .route("/api/satellites/{id}", get(state_handlers::get_satellite))
        .route("/api/markers", get(state_handlers::list_markers))
        .route("/api/status", get(status_handlers::get_status))
        .route("/api/refresh", post(status_handlers::trigger_refresh))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
