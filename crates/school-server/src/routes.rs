use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::auth::{auth_middleware, require_admin};
use crate::handlers::{
    auth as auth_handlers, menu as menu_handlers, news as news_handlers, pages as page_handlers,
    upload as upload_handlers, users as user_handlers,
};
use crate::store::Store;
use crate::uploads::{BlobStore, UPLOADS_URL};
use crate::Config;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub blobs: Arc<dyn BlobStore>,
    pub config: Config,
}

pub fn create_router(state: AppState) -> Router {
    // Public site
    let public_routes = Router::new()
        .route("/", get(page_handlers::home))
        .route("/menu", get(page_handlers::menu))
        .route("/page/:slug", get(page_handlers::page))
        .route("/news", get(news_handlers::list_news))
        .route("/news/:id", get(news_handlers::get_news))
        .nest_service(UPLOADS_URL, ServeDir::new(&state.config.upload_dir));

    // Protected auth routes (need auth)
    let protected_auth_routes = Router::new()
        .route("/me", get(auth_handlers::me))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let auth_routes = Router::new()
        .route("/login", post(auth_handlers::login))
        .route("/logout", post(auth_handlers::logout))
        .merge(protected_auth_routes);

    // Admin routes: layers run bottom-up, so auth resolves the user before the admin check
    let admin_routes = Router::new()
        .route(
            "/menu",
            get(menu_handlers::list_menu).post(menu_handlers::create_menu_item),
        )
        .route(
            "/menu/:id",
            get(menu_handlers::get_menu_item)
                .put(menu_handlers::update_menu_item)
                .delete(menu_handlers::delete_menu_item),
        )
        .route(
            "/news",
            get(news_handlers::list_news).post(news_handlers::create_news),
        )
        .route(
            "/news/:id",
            put(news_handlers::update_news).delete(news_handlers::delete_news),
        )
        .route(
            "/users",
            get(user_handlers::list_users).post(user_handlers::create_user),
        )
        .route("/users/:id", delete(user_handlers::delete_user))
        .route(
            "/upload-image",
            post(upload_handlers::upload_image)
                .layer(DefaultBodyLimit::max(state.config.max_upload_bytes)),
        )
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .nest("/auth", auth_routes)
        .nest("/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
