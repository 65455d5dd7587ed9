use axum::{
    extract::{Path, State},
    Json,
};
use school_shared::api::{HomeResponse, MenuPageResponse};
use school_shared::MenuEntry;

use crate::error::AppError;
use crate::menu::MenuService;
use crate::routes::AppState;

/// News shown alongside the menu on the home page.
pub const LATEST_NEWS_LIMIT: i64 = 5;

/// GET /
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>, AppError> {
    let menu = MenuService::new(state.store.as_ref()).menu_structure().await?;
    let latest_news = state.store.list_news(Some(LATEST_NEWS_LIMIT)).await?;

    Ok(Json(HomeResponse { menu, latest_news }))
}

/// GET /menu
pub async fn menu(State(state): State<AppState>) -> Result<Json<Vec<MenuEntry>>, AppError> {
    let menu = MenuService::new(state.store.as_ref()).menu_structure().await?;

    Ok(Json(menu))
}

/// GET /page/:slug
pub async fn page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<MenuPageResponse>, AppError> {
    let page = MenuService::new(state.store.as_ref()).page(&slug).await?;

    Ok(Json(page))
}
