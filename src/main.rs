use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use soap_backend::config::{AppState, Config};
use soap_backend::{logger, server};

mod cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let overrides = cli.overrides();
    let cfg = match cli.config.as_deref() {
        Some(path) => Config::load_from(path, &overrides),
        None => Config::load(&overrides),
    }
    .with_context(|| format!("failed to load configuration from '{}'", cli.config_path()))?;

    logger::init(&cfg.logging).context("failed to initialize logging")?;

    let state = AppState::new(cfg).context("invalid fixture configuration")?;

    if cli.check {
        logger::log_route_table(&state.routes);
        state.routes.check()?;
        tracing::info!("All {} fixture file(s) present", state.routes.len());
        return Ok(());
    }

    // Build the Tokio runtime, sizing the worker pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = state.config.server.workers {
        runtime_builder.worker_threads(workers);
        tracing::debug!("Using {workers} worker threads");
    } else {
        tracing::debug!("Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(state))
}

async fn async_main(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.get_socket_addr()?;
    let listener = server::bind(addr)?;
    let shutdown = server::ShutdownSignal::register()?;

    logger::log_server_start(&addr, &state.config);
    logger::log_route_table(&state.routes);
    if let Err(e) = state.routes.check() {
        tracing::warn!("{e}; requests to those routes will answer 500");
    }

    // Returns once in-flight connections have drained
    server::start_server_loop(listener, Arc::new(state), shutdown.recv()).await;
    Ok(())
}
