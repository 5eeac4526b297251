//! wsdial client binary.
//!
//! - Load config (first argument, else `WSDIAL_CONFIG`, else `wsdial.yaml`)
//! - Optional ops server: /healthz, /readyz, /metrics
//! - Initial dial: a failure here exits immediately, no retry
//! - Read loop on its own task until Ctrl-C or redial exhaustion

use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use wsdial_client::{app_state, config, router};
use wsdial_client::conn::{Dialer, RetryBudget};
use wsdial_client::obs::ClientMetrics;
use wsdial_client::pipeline::Pipeline;
use wsdial_client::transport::WsTransport;

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WSDIAL_CONFIG").ok())
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%path, error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    let metrics = Arc::new(ClientMetrics::default());
    let shutdown = CancellationToken::new();

    if let Some(ops) = &cfg.ops {
        let listen = match ops.listen_addr() {
            Ok(addr) => addr,
            Err(e) => {
                tracing::error!(error = %e, "invalid ops listen address");
                return ExitCode::FAILURE;
            }
        };
        let listener = match tokio::net::TcpListener::bind(listen).await {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(%listen, error = %e, "failed to bind ops server");
                return ExitCode::FAILURE;
            }
        };
        let app = router::build_router(app_state::ClientState::new(Arc::clone(&metrics)));
        let stop = shutdown.clone();
        tracing::info!(%listen, "ops server starting");
        tokio::spawn(async move {
            let serve = axum::serve(listener, app)
                .with_graceful_shutdown(async move { stop.cancelled().await });
            if let Err(e) = serve.await {
                tracing::error!(error = %e, "ops server failed");
            }
        });
    }

    let url = cfg.client.url.clone();
    let budget = RetryBudget::from(&cfg.client.retry);
    let mut dialer = Dialer::new(WsTransport::new(), budget, Arc::clone(&metrics));

    tracing::info!(%url, max_attempts = budget.max_attempts, "wsdial client starting");
    if let Err(e) = dialer.dial_conn(&url).await {
        tracing::error!(%url, error = %e, "unable to dial first time");
        shutdown.cancel();
        return ExitCode::FAILURE;
    }

    let (tx, mut rx) = mpsc::channel(cfg.client.subscriber_buffer);
    let mut pipeline = Pipeline::new(Arc::clone(&metrics)).with_subscriber(tx);

    // Payloads are already logged by the pipeline; the consumer just drains them.
    let consumer = tokio::spawn(async move {
        let mut n: u64 = 0;
        while rx.recv().await.is_some() {
            n += 1;
        }
        n
    });

    let stop = shutdown.clone();
    let reader = tokio::spawn(async move { dialer.read(&mut pipeline, &stop).await });

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("ctrl-c received, shutting down");
                    shutdown.cancel();
                }
                Err(e) => tracing::warn!(error = %e, "ctrl-c handler unavailable"),
            }
        }
    });

    let code = match reader.await {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            tracing::error!(error = %e, class = e.class().as_str(), "read loop ended");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "read loop task panicked");
            ExitCode::FAILURE
        }
    };
    shutdown.cancel();

    if let Ok(n) = consumer.await {
        tracing::info!(payloads = n, "payload consumer drained");
    }
    code
}
