use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};
use tracing::{debug, info};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Movie, MoviePayload, search_title},
};

pub fn router(state: Arc<AppState>) -> Router {
    let base = state.config.base_path.clone();

    Router::new()
        .route(&base, get(list).post(create))
        .route(&format!("{base}/search"), get(search))
        .route(&format!("{base}/{{id}}"), get(get_by_id).put(update).delete(delete))
        .with_state(state)
}

pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Movie>> {
    Json(state.store.list_all().await)
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = id?;
    let Some(movie) = state.store.get(id).await else {
        debug!(id, "get rejected: not found");
        return Err(AppError::NotFound(id));
    };
    Ok(Json(movie))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MoviePayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let Json(mut payload) = payload.inspect_err(|e| debug!(error = %e, "bad create body"))?;
    let title = payload.take_title().inspect_err(|e| debug!(error = %e, "create rejected"))?;

    let mut table = state.store.write().await;
    if table.title_taken(&title, None) {
        debug!(title = %title, "create rejected: duplicate title");
        return Err(AppError::Conflict(format!("a movie titled {title:?} already exists")));
    }

    let id = table.next_id();
    let movie = Movie::new(id, title, payload);
    table.put(id, movie.clone());
    drop(table);

    info!(id, title = %movie.title, "movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<MoviePayload>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = id?;

    let mut table = state.store.write().await;
    if !table.contains(id) {
        debug!(id, "update rejected: not found");
        return Err(AppError::NotFound(id));
    }

    let Json(mut payload) = payload.inspect_err(|e| debug!(id, error = %e, "bad update body"))?;
    let title = payload.take_title().inspect_err(|e| debug!(id, error = %e, "update rejected"))?;

    if table.title_taken(&title, Some(id)) {
        debug!(id, title = %title, "update rejected: duplicate title");
        return Err(AppError::Conflict(format!("another movie is titled {title:?}")));
    }

    let movie = table.get_mut(id).ok_or(AppError::NotFound(id))?;
    movie.apply(title, payload);
    let updated = movie.clone();
    drop(table);

    info!(id, title = %updated.title, "movie updated");
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    match state.store.delete(id).await {
        Some(_) => {
            info!(id, "movie deleted");
            Ok(StatusCode::NO_CONTENT)
        },
        None => {
            debug!(id, "delete rejected: not found");
            Err(AppError::NotFound(id))
        },
    }
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<Vec<Movie>>> {
    let Query(params) = query.inspect_err(|e| debug!(error = %e, "bad search query"))?;
    let Some(title) = search_title(&params) else {
        debug!("search rejected: missing title");
        return Err(AppError::Validation("query parameter `title` is required".to_string()));
    };
    Ok(Json(state.store.search(title).await))
}
