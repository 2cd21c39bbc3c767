use crate::error::{AppError, Result};
use crate::model::CreateLinkRequest;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shortlink_core::Link;

pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Json<Link>> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let link = state.shortener().create_link(&request.long).await?;
    Ok(Json(link))
}

pub async fn list_links_handler(State(state): State<AppState>) -> Result<Json<Vec<Link>>> {
    let links = state.shortener().get_all_links().await?;
    Ok(Json(links))
}

pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Link>> {
    state
        .shortener()
        .get_link(&id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state.shortener().delete_link(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
