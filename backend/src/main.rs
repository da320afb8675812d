//! Backend entry-point: loads settings, wires adapters and serves the API.

mod server;

use std::io;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ortho_config::OrthoConfig as _;
use server::{
    BuildMode, ServerConfig, ServerSettings, build_http_state, create_server, drain,
    load_token_secret, shutdown_signal,
};
use taskboard::inbound::http::health::HealthState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))?;
    let secret = load_token_secret(&settings, BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    let http_state = web::Data::new(build_http_state(&settings, &secret).await?);
    drop(secret);

    let config = ServerConfig {
        bind_addr: settings.bind_addr(),
        http_state,
        #[cfg(feature = "metrics")]
        metrics: make_metrics()?,
    };

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if let Err(err) = shutdown_signal().await {
            warn!(error = %err, "signal listener unavailable; graceful shutdown disabled");
            return;
        }
        info!("shutdown requested; draining");
        drain(health_state, handle).await;
    });
    info!(bind_addr = %settings.bind_addr(), "server listening");
    server.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("taskboard")
        .endpoint("/metrics")
        .build()
        .map_err(|err| io::Error::other(format!("failed to configure metrics: {err}")))
}
