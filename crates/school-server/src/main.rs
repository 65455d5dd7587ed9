use std::net::SocketAddr;
use std::sync::Arc;

use school_server::{
    bootstrap::bootstrap,
    create_router, db,
    store::PgStore,
    uploads::{LocalBlobStore, UPLOADS_URL},
    AppState, Config,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "school_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let store = Arc::new(PgStore::new(pool));
    if config.seed_on_start {
        bootstrap(store.as_ref()).await?;
    }

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let blobs = Arc::new(LocalBlobStore::new(&config.upload_dir, UPLOADS_URL));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = create_router(AppState {
        store,
        blobs,
        config,
    });

    tracing::info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
