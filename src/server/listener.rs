use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::handler::Handler;
use crate::http::connection::Connection;

/// Binds the listen address and serves connections forever.
///
/// Each accepted socket gets its own task running one [`Connection`]
/// exchange; connections never share state beyond the root handler. The
/// route table behind `root` must be fully built before this is called.
pub async fn run(cfg: &Config, root: Arc<dyn Handler>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let root = Arc::clone(&root);
        let limits = cfg.limits.clone();
        tokio::spawn(async move {
            let conn = Connection::new(socket, root, limits);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
