//! mailbox server
//!
//! - `GET /` : session-gated mail page data (JSON)
//! - Config from `MAILBOX_CONFIG` (default `mailbox.yaml`), backend url/key
//!   overridable via `PUBLIC_SUPABASE_URL` / `PUBLIC_SUPABASE_ANON_KEY`
//! - Graceful shutdown: readiness flips to draining, in-flight requests finish

use tracing_subscriber::{fmt, EnvFilter};

use mailbox_core::error::{MailboxError, Result};
use mailbox_server::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("MAILBOX_CONFIG").unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.into());
    let cfg = config::load_with_env(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "mailbox-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MailboxError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| MailboxError::Internal(format!("server failed: {e}")))?;

    tracing::info!("mailbox-server stopped");
    Ok(())
}

async fn shutdown_signal(state: app_state::AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    state.metrics().set_draining();
    tracing::info!("shutdown requested, draining");
}
