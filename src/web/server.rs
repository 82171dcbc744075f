use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ephemeris::{MemoryStore, VectorStore};
use crate::geocode::{Geocoder, NominatimClient};
use crate::ingest;

use super::api::epochs as epoch_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VectorStore>,
    pub geocoder: Arc<Geocoder>,
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let store: Arc<dyn VectorStore> =
        Arc::new(MemoryStore::open(config.ephemeris.snapshot_path.clone()));

    // Populate on startup only when the store has nothing to serve. The
    // API comes up either way.
    let empty = store.count().map(|count| count == 0).unwrap_or(true);
    if empty {
        if let Err(e) = ingest::populate(store.as_ref(), &config.ephemeris.source_url).await {
            log::warn!("startup ingestion failed, serving an empty store: {}", e);
        }
    }

    let geocoder = match &config.geocoder {
        Some(settings) => match NominatimClient::new(
            settings.endpoint.as_deref(),
            &settings.user_agent,
            settings.timeout,
        ) {
            Ok(client) => Geocoder::Nominatim(client),
            Err(e) => {
                log::error!("geocoder unavailable: {}", e);
                Geocoder::Disabled
            }
        },
        None => Geocoder::Disabled,
    };

    let state = AppState {
        store,
        geocoder: Arc::new(geocoder),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Ephemeris API endpoints
        .route("/epochs", get(epoch_handlers::list_epochs))
        .route("/epochs/range", get(epoch_handlers::list_range))
        .route("/epochs/{epoch}", get(epoch_handlers::epoch_detail))
        .route("/epochs/{epoch}/speed", get(epoch_handlers::epoch_speed))
        .route(
            "/epochs/{epoch}/location",
            get(epoch_handlers::epoch_location),
        )
        // Status endpoints
        .route("/now", get(epoch_handlers::now))
        .route("/debug", get(epoch_handlers::debug_info))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
