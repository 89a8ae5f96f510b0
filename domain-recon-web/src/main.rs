//! domain-recon-web — browser front-end for domain recon lookups.
//!
//! Serves the lookup form, the JSON API and downloads of the exported
//! report files. Configuration comes from `domain-recon-web.toml` plus
//! `DOMAIN_RECON_WEB_*` environment overrides.

mod config;
mod error;
mod handlers;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use config::WebConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = WebConfig::load()?;

    // The appender guard must stay alive for the process lifetime,
    // otherwise buffered log lines are lost.
    let _log_guard = init_tracing(&config);

    let addr = format!("{}:{}", config.bind_host, config.bind_port);
    tracing::info!("Starting domain-recon web server on {addr}");
    tracing::info!("Export directory: {}", config.output_dir.display());

    let workers = num_cpus::get();
    let bind = (config.bind_host.clone(), config.bind_port);
    let data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(handlers::index)
            .service(handlers::lookup)
            .service(handlers::download)
            .service(handlers::health)
    })
    .workers(workers)
    .bind(bind)
    .with_context(|| format!("Failed to bind {addr}"))?
    .run()
    .await
    .context("HTTP server terminated abnormally")
}

fn init_tracing(config: &WebConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if let Some(log_dir) = &config.log_dir {
        let appender = tracing_appender::rolling::daily(log_dir, "domain-recon-web.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        None
    }
}
