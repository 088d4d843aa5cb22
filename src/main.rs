mod config;
mod handler;
mod http;
mod server;

use std::sync::Arc;

use config::Config;
use handler::router::Router;
use handler::static_files::StaticFiles;
use handler::{FnHandler, Handler};
use http::request::Request;
use http::response::{Response, ResponseBuilder};
use http::status::Status;

async fn handle_root(_request: Request) -> anyhow::Result<Response> {
    let html = "\
<html>
  <head><title>Shoal</title></head>
  <body>
    <h1>Welcome!</h1>
    <p>This is the root page.</p>
    <p><a href=\"/hello\">Say Hello</a></p>
    <p><a href=\"/api/info\">View API Info</a></p>
  </body>
</html>
";
    Ok(ResponseBuilder::new(Status::Ok)
        .header("Content-Type", "text/html")
        .body(html.into())
        .build())
}

async fn handle_hello(_request: Request) -> anyhow::Result<Response> {
    Ok(ResponseBuilder::new(Status::Ok)
        .header("Content-Type", "text/plain")
        .body(b"Hello from shoal!".to_vec())
        .build())
}

async fn handle_api_info(_request: Request) -> anyhow::Result<Response> {
    Ok(ResponseBuilder::new(Status::Ok)
        .header("Content-Type", "application/json")
        .body(br#"{"service":"api","version":"1.0"}"#.to_vec())
        .build())
}

fn build_router(cfg: &Config) -> Router {
    let mut api = Router::new();
    api.get("/info", Arc::new(FnHandler::new(handle_api_info)));

    let mut root = Router::new();
    root.get("/", Arc::new(FnHandler::new(handle_root)));
    root.get("/hello", Arc::new(FnHandler::new(handle_hello)));
    root.get("/api", Arc::new(api));

    if let Some(static_cfg) = &cfg.static_files {
        root.get(
            static_cfg.mount.clone(),
            Arc::new(StaticFiles::new(static_cfg.root.clone())),
        );
    }

    root
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let root: Arc<dyn Handler> = Arc::new(build_router(&cfg));

    tokio::select! {
        res = server::listener::run(&cfg, root) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
