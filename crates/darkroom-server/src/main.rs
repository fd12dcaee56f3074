//! Process bootstrap: argument parsing, log setup, bind and serve.

use std::sync::Arc;

use clap::Parser;
use darkroom_store::ImageStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "darkroom-server", version, about)]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("darkroom_server=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let app = darkroom_server::router(Arc::new(ImageStore::new()));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "darkroom listening");
    axum::serve(listener, app).await?;
    Ok(())
}
