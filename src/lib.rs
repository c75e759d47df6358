pub mod api;
pub mod config;
pub mod db;
pub mod directory;
pub mod format;
pub mod models;
pub mod validation;

use tracing_subscriber::EnvFilter;

/// Initialize tracing, open the store and serve the clinic API until
/// ctrl-c arrives.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Clinica starting v{}", config::APP_VERSION);

    let settings = config::Settings::from_env()?;
    if let Some(parent) = settings.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = db::Store::open(&settings.db_path)?;

    let ctx = api::ApiContext::new(store);
    let mut server = api::start_server(settings.addr, ctx).await?;
    tracing::info!(
        addr = %server.local_addr(),
        db = %settings.db_path.display(),
        "clinic service ready"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("ctrl-c received, shutting down");
    server.shutdown();
    Ok(())
}
