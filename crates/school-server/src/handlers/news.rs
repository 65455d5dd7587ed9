use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use school_shared::api::{CreateNewsRequest, UpdateNewsRequest};
use school_shared::NewsArticle;
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::Json;
use crate::routes::AppState;
use crate::store::NewNewsArticle;

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("News title is required".to_string()));
    }
    Ok(title.to_string())
}

/// GET /news and GET /admin/news
pub async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<NewsArticle>>, AppError> {
    let articles = state.store.list_news(None).await?;

    Ok(Json(articles))
}

/// GET /news/:id
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsArticle>, AppError> {
    let article = state.store.get_news(id).await?;

    Ok(Json(article))
}

/// POST /admin/news
pub async fn create_news(
    State(state): State<AppState>,
    Json(req): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<NewsArticle>), AppError> {
    let title = required_title(&req.title)?;

    let article = state
        .store
        .create_news(NewNewsArticle {
            title,
            image: non_empty(req.image),
            content: req.content,
        })
        .await?;

    tracing::info!(id = %article.id, "News article created");
    Ok((StatusCode::CREATED, Json(article)))
}

/// PUT /admin/news/:id
pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNewsRequest>,
) -> Result<Json<NewsArticle>, AppError> {
    let title = required_title(&req.title)?;
    let existing = state.store.get_news(id).await?;

    let article = state
        .store
        .update_news(&NewsArticle {
            title,
            image: non_empty(req.image),
            content: req.content,
            ..existing
        })
        .await?;

    Ok(Json(article))
}

/// DELETE /admin/news/:id
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete_news(id).await?;
    tracing::info!(id = %id, "News article deleted");

    Ok(StatusCode::NO_CONTENT)
}
