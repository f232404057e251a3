// crates/sitecms-api/src/endpoints.rs

use {
    crate::{
        rest::AppState,
        types::{ApiError, ApiResponse, HealthResponse, SaveResponse, StatusResponse},
    },
    axum::{
        extract::{
            rejection::{JsonRejection, QueryRejection},
            Query, State,
        },
        response::Html,
        Json,
    },
    serde::{Deserialize, Serialize},
    serde_json::Value,
    sitecms_render::{Document, RenderOutcome, Renderer, StoreSource},
    std::{collections::HashMap, sync::Arc},
    tracing::{error, info, warn},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileQuery {
    pub file: Option<String>,
}

/// The requested document name, if it is on the allow-list. A query that does
/// not name exactly one file is rejected like any other unknown name.
fn allowed_file(
    state: &AppState,
    query: Result<Query<FileQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let file = match query {
        Ok(Query(query)) => query.file,
        Err(rejection) => {
            warn!("Rejected unreadable file query: {}", rejection.body_text());
            return Err(ApiError::AccessDenied(rejection.body_text()));
        }
    };

    match file {
        Some(name) if state.store.is_allowed(&name) => Ok(name),
        other => {
            warn!(file = ?other, "Rejected request for a file outside the allow-list");
            Err(ApiError::AccessDenied(other.unwrap_or_default()))
        }
    }
}

/// `GET /api/get?file=<name>`
pub async fn get_file(
    State(state): State<AppState>,
    query: Result<Query<FileQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let name = allowed_file(&state, query)?;

    let document = state.store.get(&name).await.map_err(|e| {
        error!(file = %name, "{}", e);
        ApiError::from(e)
    })?;

    Ok(Json(document))
}

/// `POST /api/save?file=<name>` with the new document as JSON body.
///
/// The allow-list is checked before the body is looked at.
pub async fn save_file(
    State(state): State<AppState>,
    query: Result<Query<FileQuery>, QueryRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let name = allowed_file(&state, query)?;

    let Json(document) = body.map_err(|rejection| {
        warn!(file = %name, "Rejected save body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    let report = state.store.save(&name, &document).await.map_err(|e| {
        error!(file = %name, "{}", e);
        ApiError::from(e)
    })?;

    info!(
        file = %name,
        backup = report.backup.is_completed(),
        mirrored = report.mirror.is_completed(),
        "File saved"
    );

    Ok(Json(SaveResponse::deployed()))
}

/// Server-side render of the public page from the current documents.
pub async fn preview(State(state): State<AppState>) -> Html<String> {
    let source = Arc::new(StoreSource::new(state.store.clone()));
    let renderer = Renderer::new(source, state.renderer.clone());

    let page = renderer.render(Document::new(state.service_name.as_str())).await;
    if page.outcome == RenderOutcome::Failed {
        warn!("Preview rendered the error state");
    }

    Html(page.to_html())
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.health.check_all().await)
}

pub async fn status_handler(State(state): State<AppState>) -> Json<ApiResponse<StatusResponse>> {
    let mut additional = HashMap::new();
    additional.insert("admin_path".to_string(), Value::from(state.admin_path.clone()));

    let status = StatusResponse {
        name: state.service_name.clone(),
        version: state.version.clone(),
        uptime: state.start_time.elapsed().as_secs(),
        timestamp: sitecms_common::utils::rfc3339_now(),
        additional,
    };

    Json(ApiResponse::success(status))
}
