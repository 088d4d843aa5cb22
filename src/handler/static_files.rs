//! Static file serving.

use std::path::{Component, Path, PathBuf};

use crate::handler::{BoxFuture, Handler};
use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder};
use crate::http::status::Status;

/// Serves files from a root directory.
///
/// The request path is resolved strictly underneath the root: only normal
/// path components are accepted, so `..` (or anything else that could climb
/// out of the root) is rejected with 403 before the filesystem is touched.
/// Missing files and directories yield 404.
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a request path to a file path under the root, or `None` if the
    /// path tries to escape.
    fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = request_path.trim_start_matches('/');
        let mut full = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => full.push(part),
                Component::CurDir => {}
                // ParentDir, RootDir, Prefix: all escape attempts
                _ => return None,
            }
        }
        Some(full)
    }
}

impl Handler for StaticFiles {
    fn handle(&self, request: Request) -> BoxFuture<'_, anyhow::Result<Response>> {
        Box::pin(async move {
            let Some(path) = self.resolve(&request.path) else {
                tracing::warn!(path = %request.path, "Refused path outside static root");
                return Ok(Response::error_page(Status::Forbidden));
            };

            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let content_type = mime::guess_type(&request.path);
                    Ok(ResponseBuilder::new(Status::Ok)
                        .header("Content-Type", content_type)
                        .body(bytes)
                        .build())
                }
                Err(e)
                    if e.kind() == std::io::ErrorKind::NotFound
                        || e.kind() == std::io::ErrorKind::IsADirectory =>
                {
                    Ok(Response::not_found(&request.path))
                }
                Err(e) => Err(e.into()),
            }
        })
    }
}
