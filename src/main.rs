use geopeek::server::{self, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("geopeek=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    server::run(ServerConfig::from_env()).await
}
