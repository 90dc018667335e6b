use std::path::Path;

use anyhow::Context;
use taskboard::{
    app_state::AppState, data_access::data_context::DataContext, map_routes, settings::Settings,
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing("taskboard=info,tower_http=info");

    let settings = Settings::load().context("failed to load settings")?;

    // ── Open the store ─────────────────────────────────────────
    let data_context = DataContext::new(&settings.database_path)
        .with_context(|| format!("failed to open database {}", settings.database_path))?;

    let imported = data_context
        .import_legacy_file(&settings.legacy_data_file)
        .context("failed to import legacy task file")?;
    if imported > 0 {
        tracing::info!(imported, path = %settings.legacy_data_file, "imported legacy tasks");
    }

    let task_count = data_context.list_tasks().context("failed to read tasks")?.len();
    tracing::info!(tasks = task_count, database = %settings.database_path, "store ready");

    // ── Router ─────────────────────────────────────────────────
    let app = map_routes(AppState::shared(data_context), Path::new(&settings.static_dir));

    // ── Start ──────────────────────────────────────────────────
    let addr = settings.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
