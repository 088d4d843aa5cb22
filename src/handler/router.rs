//! Longest-prefix request routing.

use std::collections::HashMap;
use std::sync::Arc;

use crate::handler::{BoxFuture, Handler};
use crate::http::method::Method;
use crate::http::request::Request;
use crate::http::response::Response;

/// Routes requests to handlers by method and path prefix.
///
/// An exact path match always wins. Otherwise the longest registered prefix
/// wins, but only where the prefix ends on a path segment boundary: `/api`
/// matches `/api/v1` and not `/apiv1`. The matched prefix is stripped before
/// the request is forwarded, so a handler mounted at `/api` sees `/v1` — and
/// because a `Router` is itself a [`Handler`], routers nest to any depth with
/// each level stripping its own prefix.
///
/// Routes are registered during application setup, before the listener starts
/// accepting; after that the table is only read. Registering routes while
/// serving is not supported.
pub struct Router {
    routes: HashMap<Method, HashMap<String, Arc<dyn Handler>>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registers `handler` under `path` for every method in `methods`.
    ///
    /// Re-registering a (method, path) pair silently overwrites the previous
    /// handler.
    pub fn add_route(
        &mut self,
        path: impl Into<String>,
        handler: Arc<dyn Handler>,
        methods: &[Method],
    ) {
        let path = path.into();
        for method in methods {
            self.routes
                .entry(*method)
                .or_default()
                .insert(path.clone(), Arc::clone(&handler));
        }
    }

    /// Registers a GET-only route, the common case.
    pub fn get(&mut self, path: impl Into<String>, handler: Arc<dyn Handler>) {
        self.add_route(path, handler, &[Method::GET]);
    }

    /// Finds the best handler for (method, path).
    ///
    /// Returns the matched prefix alongside the handler so the caller can
    /// strip it.
    fn resolve(&self, method: Method, path: &str) -> Option<(&str, &Arc<dyn Handler>)> {
        let table = self.routes.get(&method)?;

        // Exact matches beat any prefix match, regardless of length.
        if let Some((registered, handler)) = table.get_key_value(path) {
            return Some((registered.as_str(), handler));
        }

        let mut best: Option<(&str, &Arc<dyn Handler>)> = None;
        for (registered, handler) in table {
            let boundary_ok = registered == "/"
                || (path.starts_with(registered.as_str())
                    && path.as_bytes().get(registered.len()) == Some(&b'/'));
            if !boundary_ok {
                continue;
            }
            if best.is_none_or(|(current, _)| registered.len() > current.len()) {
                best = Some((registered.as_str(), handler));
            }
        }
        best
    }

    /// Rebuilds the request with the matched prefix removed.
    ///
    /// The remainder always gets a single leading "/" (an exact match
    /// forwards "/"). The new request owns its own headers and body, so a
    /// downstream handler's view never aliases the original.
    fn strip_prefix(request: Request, prefix: &str) -> Request {
        let remainder = &request.path[prefix.len()..];
        let path = if remainder.starts_with('/') {
            remainder.to_string()
        } else {
            format!("/{remainder}")
        };
        Request { path, ..request }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for Router {
    fn handle(&self, request: Request) -> BoxFuture<'_, anyhow::Result<Response>> {
        Box::pin(async move {
            match self.resolve(request.method, &request.path) {
                Some((prefix, handler)) => {
                    tracing::debug!(
                        method = %request.method,
                        path = %request.path,
                        prefix = %prefix,
                        "Routing request"
                    );
                    let handler = Arc::clone(handler);
                    let forwarded = Self::strip_prefix(request, prefix);
                    handler.handle(forwarded).await
                }
                None => {
                    tracing::debug!(
                        method = %request.method,
                        path = %request.path,
                        "No route found"
                    );
                    Ok(Response::not_found(&request.path))
                }
            }
        })
    }
}
