use std::sync::Arc;
use std::time::Duration;

use broadside::{init_logging, Server, ServerConfig, SessionStore};
use clap::Parser;

/// LAN-reachable session server for the 5x5 battleship mobile client.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind; the default keeps the server reachable from the LAN.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// TCP port to listen on.
    #[arg(long, default_value_t = 5000)]
    port: u16,
    /// Evict sessions idle for this many seconds (0 keeps them forever).
    #[arg(long, default_value_t = 0)]
    session_ttl_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = ServerConfig::new(cli.host, cli.port);
    if cli.session_ttl_secs > 0 {
        config.session_ttl = Some(Duration::from_secs(cli.session_ttl_secs));
    }

    let store = Arc::new(SessionStore::new());
    Server::new(config).run(store).await
}
