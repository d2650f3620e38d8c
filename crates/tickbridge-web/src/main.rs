use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tickbridge_core::{ReqwestHttpClient, YahooSource};
use tickbridge_web::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "tickbridge", about = "Market-data proxy over Yahoo Finance", version)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind.
    #[arg(long, default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickbridge_web=info,tower_http=info".into()),
        )
        .init();

    let transport = Arc::new(ReqwestHttpClient::new());
    let state = AppState::new(Arc::new(YahooSource::new(transport)));

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .expect("invalid host:port configuration");

    tracing::info!(
        "tickbridge v{} listening on {addr}",
        env!("CARGO_PKG_VERSION")
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, tickbridge_web::router(state))
        .await
        .expect("server error");
}
