use std::{net::SocketAddr, path::Path as FsPath, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use shared::{
    domain::{find_rover, RoverOption},
    error::{ApiError, ApiException, ErrorCode},
    protocol::{ManifestEnvelope, Photo},
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod upstream;

use config::{load_settings, DATE_FORMAT};
use upstream::{NasaClient, UpstreamError};

#[derive(Clone)]
struct AppState {
    upstream: NasaClient,
    manifest_max_date: NaiveDate,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings()?;
    let upstream = NasaClient::new(&settings.upstream_url, settings.api_key.clone())?;
    let state = AppState {
        upstream,
        manifest_max_date: settings.manifest_max_date,
    };
    let app = build_router(Arc::new(state), &settings.static_dir);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, static_dir = %settings.static_dir.display(), "rover proxy listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Static files win; a path with no file under `static_dir` reaches the rover routes.
fn build_router(state: Arc<AppState>, static_dir: &FsPath) -> Router {
    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/:name", get(rover_manifest))
        .route("/rover-images/:name/:date", get(rover_images))
        .with_state(state);

    Router::new()
        .fallback_service(ServeDir::new(static_dir).fallback(api))
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn rover_manifest(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<ManifestEnvelope> {
    let rover = parse_rover(&name).map_err(reject)?;
    let envelope = state
        .upstream
        .manifest(&rover.slug(), state.manifest_max_date)
        .await
        .map_err(|e| bad_gateway(rover, e))?;
    Ok(Json(envelope))
}

async fn rover_images(
    State(state): State<Arc<AppState>>,
    Path((name, date)): Path<(String, String)>,
) -> ApiResult<Vec<Photo>> {
    let rover = parse_rover(&name).map_err(reject)?;
    let date = parse_date(&date).map_err(reject)?;
    let photos = state
        .upstream
        .photos(&rover.slug(), date)
        .await
        .map_err(|e| bad_gateway(rover, e))?;
    Ok(Json(photos))
}

fn parse_rover(name: &str) -> Result<&'static RoverOption, ApiException> {
    find_rover(name)
        .ok_or_else(|| ApiException::new(ErrorCode::NotFound, format!("unknown rover '{name}'")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiException> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        ApiException::new(
            ErrorCode::Validation,
            format!("date '{raw}' must be formatted as YYYY-MM-DD"),
        )
    })
}

fn reject(exception: ApiException) -> (StatusCode, Json<ApiError>) {
    let status = match exception.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::BadGateway => StatusCode::BAD_GATEWAY,
    };
    (status, Json(exception.into()))
}

fn bad_gateway(rover: &RoverOption, err: UpstreamError) -> (StatusCode, Json<ApiError>) {
    error!(rover = rover.name, error = %err, "upstream request failed");
    reject(ApiException::new(ErrorCode::BadGateway, err.to_string()))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
