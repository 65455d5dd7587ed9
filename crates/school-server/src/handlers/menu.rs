use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use school_shared::api::{CreateMenuItemRequest, UpdateMenuItemRequest};
use school_shared::{MenuItem, MenuNode};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::extract::Json;
use crate::menu::MenuService;
use crate::routes::AppState;

/// GET /admin/menu
pub async fn list_menu(State(state): State<AppState>) -> Result<Json<Vec<MenuNode>>, AppError> {
    let tree = MenuService::new(state.store.as_ref()).menu_tree().await?;

    Ok(Json(tree))
}

/// POST /admin/menu
pub async fn create_menu_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItem>), AppError> {
    let item = MenuService::new(state.store.as_ref()).create(req).await?;
    tracing::debug!(by = %user.username, slug = %item.slug, "Menu item created via admin");

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /admin/menu/:id
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MenuItem>, AppError> {
    let item = MenuService::new(state.store.as_ref()).get(id).await?;

    Ok(Json(item))
}

/// PUT /admin/menu/:id
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMenuItemRequest>,
) -> Result<Json<MenuItem>, AppError> {
    let item = MenuService::new(state.store.as_ref()).update(id, req).await?;

    Ok(Json(item))
}

/// DELETE /admin/menu/:id
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    MenuService::new(state.store.as_ref()).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
