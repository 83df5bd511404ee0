//! Fairmatch HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use fairmatch::config::Config;
use fairmatch::evaluation::bootstrap;
use fairmatch::gateway::{AppState, cors_layer, create_router_with_state};
use fairmatch::shortlist::{InMemoryShortlistStore, ShortlistStore};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
███████╗ █████╗ ██╗██████╗ ███╗   ███╗ █████╗ ████████╗ ██████╗██╗  ██╗
██╔════╝██╔══██╗██║██╔══██╗████╗ ████║██╔══██╗╚══██╔══╝██╔════╝██║  ██║
█████╗  ███████║██║██████╔╝██╔████╔██║███████║   ██║   ██║     ███████║
██╔══╝  ██╔══██║██║██╔══██╗██║╚██╔╝██║██╔══██║   ██║   ██║     ██╔══██║
██║     ██║  ██║██║██║  ██║██║ ╚═╝ ██║██║  ██║   ██║   ╚██████╗██║  ██║
╚═╝     ╚═╝  ╚═╝╚═╝╚═╝  ╚═╝╚═╝     ╚═╝╚═╝  ╚═╝   ╚═╝    ╚═════╝╚═╝  ╚═╝

        MATCH. MEASURE. SHORTLIST.
                                                               AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        data_path = %config.data_path.display(),
        "Fairmatch starting"
    );

    // Blocking model load; the runtime has no other work yet.
    let startup_config = config.clone();
    let evaluator = tokio::task::spawn_blocking(move || bootstrap(&startup_config)).await?;
    if !evaluator.is_ready() {
        tracing::warn!(
            failures = evaluator.failures().len(),
            "Serving in not-ready mode; /match will answer 503"
        );
    }

    let shortlist: Option<Arc<dyn ShortlistStore>> = if config.shortlist_enabled {
        Some(Arc::new(InMemoryShortlistStore::new()))
    } else {
        tracing::info!("Shortlist endpoints disabled");
        None
    };

    let state = AppState::new(evaluator, shortlist);
    let app = create_router_with_state(state).layer(cors_layer(&config.cors_origins));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Fairmatch shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("FAIRMATCH_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
