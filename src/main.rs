use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vocab_tracker::{config, db, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vocab_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config().map_err(anyhow::Error::msg)?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    // Create data directory if not exists / 创建数据目录
    let data_dir = app_config.data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        tracing::info!("Created data directory: {:?}", data_dir);
    }

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| app_config.database_url());

    let pool = db::connect(&database_url, app_config.database.max_connections).await?;
    db::run_migrations(&pool).await?;

    let state = Arc::new(AppState::new(pool));
    let app = router(state);

    let bind_addr = app_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
