//! HTTP routes.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use currencyapi_common::{
    ConversionRequest, ConversionResult, CurrencyId, CurrencyLabel, CurrencyRequest,
};

use crate::error::ApiResult;
use crate::state::AppState;

async fn list_currencies(State(state): State<AppState>) -> ApiResult<Json<Vec<CurrencyLabel>>> {
    let labels = state.registry.list().await?;
    Ok(Json(labels))
}

async fn create_currency(
    State(state): State<AppState>,
    payload: Result<Json<CurrencyRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CurrencyId>)> {
    let Json(request) = payload?;
    let id = state.registry.create(request).await?;
    Ok((StatusCode::CREATED, Json(id)))
}

async fn delete_currency(
    State(state): State<AppState>,
    id: Result<Path<CurrencyId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.registry.delete(id).await?;
    Ok(StatusCode::OK)
}

async fn convert(
    State(state): State<AppState>,
    query: Result<Query<ConversionRequest>, QueryRejection>,
) -> ApiResult<Json<ConversionResult>> {
    let Query(request) = query?;
    let result = state.engine.convert_static(&request).await?;
    Ok(Json(result))
}

async fn convert_live(
    State(state): State<AppState>,
    query: Result<Query<ConversionRequest>, QueryRejection>,
) -> ApiResult<Json<ConversionResult>> {
    let Query(request) = query?;
    let result = state.engine.convert_live(&request).await?;
    Ok(Json(result))
}

async fn health() -> &'static str {
    "OK"
}

pub fn currency_router() -> Router<AppState> {
    Router::new()
        .route("/currency", get(list_currencies).post(create_currency))
        .route("/currency/convert", get(convert))
        .route("/currency/convert/live", get(convert_live))
        .route("/currency/{id}", delete(delete_currency))
}

/// Full application router with request tracing.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(currency_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
