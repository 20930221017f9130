use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::*,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::adapters::app_state::AppState;
use crate::adapters::resolve_identifier;
use crate::domain::errors::AppError;
use crate::domain::models::{Geolocation, GeolocationRequest, ManyGeolocations};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig<'a> {
    pub port: &'a str,
}

pub struct HttpServer {
    router: Router,
    listener: net::TcpListener,
}

impl HttpServer {
    pub async fn new(config: HttpServerConfig<'_>, state: AppState) -> anyhow::Result<Self> {
        let router = router(state);

        let addr = SocketAddr::from((
            [0, 0, 0, 0, 0, 0, 0, 0],
            config.port.parse::<u16>().unwrap_or(3000),
        ));

        let listener = net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to listen on port {}", config.port))?;

        Ok(Self { router, listener })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.listener.local_addr().context("listener has no local address")?;
        tracing::info!("listening on {}", addr);
        axum::serve(self.listener, self.router)
            .await
            .context("received error from running server")?;
        Ok(())
    }
}

fn router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request<_>| {
            let uri = request.uri().to_string();
            tracing::info_span!("http_request", method = ?request.method(), uri)
        });

    Router::new()
        .route("/", get(welcome))
        .route("/geolocations", post(create_geolocation).get(list_geolocations))
        .route(
            "/geolocations/{geo_identifier}",
            get(get_geolocation).delete(delete_geolocation),
        )
        .with_state(state)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
}

async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Geolocation API!" }))
}

async fn create_geolocation(
    State(state): State<AppState>,
    Json(request): Json<GeolocationRequest>,
) -> Result<(StatusCode, Json<Geolocation>), AppError> {
    let ip = resolve_identifier::resolve(&request.geo_identifier).await?;
    let record = state.geo_client.fetch(&ip).await?;
    let created = state.store.create(record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_geolocations(
    State(state): State<AppState>,
) -> Result<Json<ManyGeolocations>, AppError> {
    let geolocations = state.store.list_all().await?;
    Ok(Json(ManyGeolocations { geolocations }))
}

async fn get_geolocation(
    State(state): State<AppState>,
    Path(geo_identifier): Path<String>,
) -> Result<Json<Geolocation>, AppError> {
    let ip = resolve_identifier::resolve(&geo_identifier).await?;
    let geolocation = state.store.get_by_ip(&ip).await?;
    Ok(Json(geolocation))
}

async fn delete_geolocation(
    State(state): State<AppState>,
    Path(geo_identifier): Path<String>,
) -> Result<StatusCode, AppError> {
    let ip = resolve_identifier::resolve(&geo_identifier).await?;
    // Idempotent at this level: a no-op delete is still a 204.
    let removed = state.store.delete(&ip).await?;
    if !removed {
        tracing::debug!("no record stored for IP {}", ip);
    }
    Ok(StatusCode::NO_CONTENT)
}
