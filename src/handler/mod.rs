//! Request handler capability and its building blocks.
//!
//! Everything that can answer a request implements [`Handler`]: plain async
//! functions wrapped in [`FnHandler`], the [`router::Router`] itself (which
//! makes routers nestable), and the [`static_files::StaticFiles`] handler.
//! The connection layer only ever sees `Arc<dyn Handler>`.

pub mod router;
pub mod static_files;

use std::future::Future;
use std::pin::Pin;

use crate::http::request::Request;
use crate::http::response::Response;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The single-operation contract all request processors implement.
///
/// An `Err` return is treated by the connection layer as an internal failure
/// and surfaced to the peer as a 500; handlers signal client-facing outcomes
/// (404, 400, ...) through the response status instead.
pub trait Handler: Send + Sync {
    fn handle(&self, request: Request) -> BoxFuture<'_, anyhow::Result<Response>>;
}

/// Wraps an async function or closure as a [`Handler`].
///
/// # Example
///
/// ```
/// use shoal::handler::FnHandler;
/// use shoal::http::request::Request;
/// use shoal::http::response::Response;
///
/// let handler = FnHandler::new(|_req: Request| async { Ok(Response::ok("hello")) });
/// ```
pub struct FnHandler<F> {
    callback: F,
}

impl<F, Fut> FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
{
    fn handle(&self, request: Request) -> BoxFuture<'_, anyhow::Result<Response>> {
        Box::pin((self.callback)(request))
    }
}
