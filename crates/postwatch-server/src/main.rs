mod api;
mod middleware;
mod scheduler;

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    scheduler::CycleTask,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = postwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting postwatch server");

    let creators = postwatch_core::load_creators(&config.creators_path)?.creators;
    let creator_count = creators.len();
    let task = CycleTask::new(postwatch_tracker::build_runner(&config, creators)?);

    let initial = task.clone();
    tokio::spawn(async move {
        initial.run_if_idle().await;
    });

    let _scheduler = scheduler::build_scheduler(
        task.clone(),
        Duration::from_secs(config.poll_interval_secs),
    )
    .await?;

    let app = build_app(AppState {
        creators: creator_count,
        last_cycle: task.last_cycle(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
