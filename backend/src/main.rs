use std::net::SocketAddr;

use backend::{AppState, config::Config, create_router};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Bike trip planner backend")]
struct Args {
    /// Port to listen on (overrides PLANNER_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Start with an empty trip store instead of the demo trips
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.no_seed {
        config.seed_demo_trips = false;
    }

    let state = AppState::from_config(&config)?;
    match &config.directions_url {
        Some(url) => tracing::info!("forwarding directions requests to {url}"),
        None => tracing::warn!("DIRECTIONS_URL not set, route editing will be unavailable"),
    }
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("starting backend on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
