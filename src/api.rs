use crate::airtable::{RecordSet, TableClient, TableError};
use crate::config::Config;
use crate::resolver::SessionResolver;
use crate::views;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub table: TableClient,
    pub resolver: SessionResolver,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let table = TableClient::new(&config.airtable);
        let resolver = SessionResolver::new(table.clone(), config.fields.person_assigned.clone());
        AppState {
            config: Arc::new(config),
            table,
            resolver,
        }
    }
}

/// Everything a handler can fail with. Translation to a response happens
/// here and nowhere else.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("no person ID provided")]
    MissingPersonId,

    #[error(transparent)]
    Table(#[from] TableError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingPersonId => (
                StatusCode::BAD_REQUEST,
                Html(views::error_page(
                    "No person ID provided. Please use a valid link with an ID parameter. \
                     Example: /?id=rec9hpttgeJK6o0PY",
                )),
            )
                .into_response(),
            ApiError::Table(err) => {
                tracing::error!(error = %err, "table request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Deserialize)]
struct LookupParams {
    id: Option<String>,
}

async fn index(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Html<String>, ApiError> {
    let person_id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingPersonId)?;

    Ok(Html(views::lookup_page(&person_id, &state.config.fields)))
}

async fn admin(State(state): State<AppState>) -> Html<String> {
    Html(views::admin_page(&state.config.fields))
}

async fn health() -> &'static str {
    "ok\n"
}

/// Single-record probe against the table, passed through verbatim so the
/// actual field names can be inspected.
async fn table_info(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.table.probe_record().await?))
}

async fn sessions(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> Result<Json<RecordSet>, ApiError> {
    Ok(Json(state.resolver.sessions_for(&person_id).await?))
}

/// Forwards the browser's batch update to the table unmodified.
async fn confirm(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    state.table.patch_records(&body).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Confirmations updated successfully"
    })))
}

async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(views::error_page("Page not found")))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/admin", get(admin))
        .route("/health", get(health))
        .route("/api/table-info", get(table_info))
        .route("/api/sessions/{person_id}", get(sessions))
        .route("/api/sessions/confirm", post(confirm))
        .fallback(not_found)
        .with_state(state)
}
