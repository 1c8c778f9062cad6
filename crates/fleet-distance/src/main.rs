//! fleet-distance - Distance lookup service
//!
//! Usage:
//!   fleet-distance [--port <port>]

use std::net::SocketAddr;

use clap::Parser;
use fleet_distance::{create_router, DistanceTable};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fleet-distance")]
#[command(about = "Distance lookup service between Ecuadorian cities")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3003)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleet_distance=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let table = DistanceTable::default();
    tracing::info!(pairs = table.len(), "Loaded distance table");

    let app = create_router(table);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("Listening on http://{}", addr);
    tracing::info!(
        "Try: http://localhost:{}/distance?origin=Machala&destination=Guayaquil",
        args.port
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
