//! dummyserver binary: `serve` runs the counter service, `openapi` dumps the
//! API description.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use dummyserver_core::error::{CounterError, Result};
use dummyserver_server::{
    app_state::AppState,
    cli::{Cli, Command, ServeArgs},
    obs, openapi, router,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let res = match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Openapi => print_openapi(),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dummyserver: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_openapi() -> Result<()> {
    let doc = serde_json::to_string_pretty(&openapi::document())
        .map_err(|e| CounterError::Internal(format!("openapi render failed: {e}")))?;
    println!("{doc}");
    Ok(())
}

async fn serve(args: ServeArgs) -> Result<()> {
    let cfg = args.resolve()?;
    let _log_guard = obs::init_logging(&cfg.logging)?;

    let listen = cfg.listen_addr()?;
    tracing::info!(%listen, "starting dummyserver");

    let state = AppState::start(&cfg, Arc::new(obs::TracingSink))?;
    let app = router::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| CounterError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| CounterError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
    state.begin_shutdown();
}
