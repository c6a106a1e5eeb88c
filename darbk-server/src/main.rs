use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use darbk_server::config::AppConfig;
use darbk_server::network::SharedNetwork;
use darbk_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("darbk_server=info")),
        )
        .init();

    let config = AppConfig::from_env();
    info!(stations = %config.stations, lines = %config.lines, "Starting");

    let loader = config.loader().expect("Failed to create feed client");
    let state = AppState::new(SharedNetwork::new(), loader, config.tracker.clone());

    // Fail fast if the station feed is unavailable
    let network = state.reload().await.expect("Failed to load station feed");
    info!(
        stations = network.catalog().len(),
        lines = network.lines().len(),
        "Loaded network"
    );

    // Spawn background task to reload the network
    if let Some(every) = config.refresh_interval {
        let refresh = state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                if let Err(e) = refresh.reload().await {
                    warn!(error = %e, "Failed to refresh network, keeping previous snapshot");
                }
            }
        });
    }

    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };
    info!(addr = %config.bind, "Darbk metro router listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
    }
}
