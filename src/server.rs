//! Reusable landed-cost API server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! rate sheet loading, metrics, REST API and graceful shutdown.

use std::net::SocketAddr;
use std::sync::OnceLock;

use chrono::Utc;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::domain::RateSheet;
use crate::infrastructure::{demo_rate_sheet, load_rate_sheet};
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// The global metrics recorder can only be installed once per process.
static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the landed-cost API server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Install the Prometheus recorder and mount `/metrics` (default: true).
    pub enable_metrics: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            enable_metrics: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running landed-cost API server.
///
/// # Examples
///
/// ```rust,no_run
/// use landed_cost::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is listening on.
    pub local_addr: SocketAddr,

    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the API server with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder (if enabled)
    /// 2. Load the rate sheet (configured file, or the built-in demo sheet)
    /// 3. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting landed-cost API...");

        // ── Prometheus metrics recorder ────────────────────────
        let prometheus_handle = if opts.enable_metrics {
            Some(prometheus_handle()?)
        } else {
            None
        };

        // ── Rate sheet ─────────────────────────────────────────
        let rate_sheet = rate_sheet_from_config(&app_cfg);
        let stale_after_days = app_cfg.tariffs.stale_after_days;
        if rate_sheet.needs_update(Utc::now(), stale_after_days) {
            warn!(
                "Rate sheet last updated {} is older than {} days; rates may be out of date",
                rate_sheet.last_updated, stale_after_days
            );
        }

        let state = AppState::from_rate_sheet(rate_sheet, stale_after_days);

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(state, prometheus_handle);

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(
            listener,
            api_router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            local_addr,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop, bounded by the configured shutdown timeout.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");

        let api_task = self.api_task;
        let finished = self
            .shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;

        if !finished {
            warn!("Open connections were dropped at shutdown");
        }
        info!("Landed-cost API shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down landed-cost API...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Load the rate sheet named by `tariffs.rates_file`.
///
/// Falls back to the built-in demo sheet when no file is configured or the
/// file cannot be read.
pub fn rate_sheet_from_config(config: &AppConfig) -> RateSheet {
    match &config.tariffs.rates_file {
        Some(path) => match load_rate_sheet(path) {
            Ok(sheet) => sheet,
            Err(e) => {
                error!(
                    "Failed to load rate sheet from {}: {}",
                    path.display(),
                    e
                );
                warn!("Using built-in demo rate sheet.");
                demo_rate_sheet()
            }
        },
        None => {
            info!("No rates file configured, using built-in demo rate sheet");
            demo_rate_sheet()
        }
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
