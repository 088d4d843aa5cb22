use std::sync::Arc;

use shoal::handler::router::Router;
use shoal::handler::{FnHandler, Handler};
use shoal::http::method::Method;
use shoal::http::request::{Request, RequestBuilder};
use shoal::http::response::Response;
use shoal::http::status::Status;

/// Handler that answers with its own name and the path it was forwarded.
fn named(name: &'static str) -> Arc<dyn Handler> {
    Arc::new(FnHandler::new(move |req: Request| async move {
        Ok(Response::ok(format!("{name}:{}", req.path)))
    }))
}

fn get_request(path: &str) -> Request {
    RequestBuilder::new()
        .method(Method::GET)
        .path(path)
        .build()
        .unwrap()
}

async fn dispatch(router: &Router, path: &str) -> (Status, String) {
    let response = router.handle(get_request(path)).await.unwrap();
    (response.status, String::from_utf8(response.body).unwrap())
}

#[tokio::test]
async fn test_longest_prefix_wins() {
    let mut router = Router::new();
    router.get("/", named("root"));
    router.get("/api", named("api"));
    router.get("/api/v1", named("v1"));

    let (status, body) = dispatch(&router, "/api/v1/status").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body, "v1:/status");
}

#[tokio::test]
async fn test_exact_match_beats_any_prefix() {
    let mut router = Router::new();
    router.get("/", named("root"));
    router.get("/api", named("api"));

    let (status, body) = dispatch(&router, "/api").await;
    assert_eq!(status, Status::Ok);
    // Exact match forwards "/"
    assert_eq!(body, "api:/");
}

#[tokio::test]
async fn test_prefix_must_end_on_segment_boundary() {
    let mut router = Router::new();
    router.get("/api", named("api"));

    let (status, body) = dispatch(&router, "/apiv1").await;
    assert_eq!(status, Status::NotFound);
    assert_eq!(body, "404 Not Found: /apiv1");
}

#[tokio::test]
async fn test_root_route_matches_everything() {
    let mut router = Router::new();
    router.get("/", named("root"));

    let (status, body) = dispatch(&router, "/anything/else").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body, "root:/anything/else");
}

#[tokio::test]
async fn test_empty_table_is_404() {
    let router = Router::new();

    for path in ["/", "/api", "/deep/nested/path"] {
        let (status, _) = dispatch(&router, path).await;
        assert_eq!(status, Status::NotFound);
    }
}

#[tokio::test]
async fn test_404_names_path_and_closes_connection() {
    let router = Router::new();

    let response = router.handle(get_request("/missing")).await.unwrap();
    assert_eq!(response.status, Status::NotFound);
    assert_eq!(response.header("connection"), Some("close"));
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.body, b"404 Not Found: /missing".to_vec());
}

#[tokio::test]
async fn test_methods_are_isolated() {
    let mut router = Router::new();
    router.add_route("/submit", named("submit"), &[Method::POST]);

    let (status, _) = dispatch(&router, "/submit").await;
    assert_eq!(status, Status::NotFound);

    let request = RequestBuilder::new()
        .method(Method::POST)
        .path("/submit")
        .build()
        .unwrap();
    let response = router.handle(request).await.unwrap();
    assert_eq!(response.status, Status::Ok);
}

#[tokio::test]
async fn test_route_registered_for_multiple_methods() {
    let mut router = Router::new();
    router.add_route("/things", named("things"), &[Method::GET, Method::DELETE]);

    for method in [Method::GET, Method::DELETE] {
        let request = RequestBuilder::new()
            .method(method)
            .path("/things")
            .build()
            .unwrap();
        let response = router.handle(request).await.unwrap();
        assert_eq!(response.status, Status::Ok);
    }
}

#[tokio::test]
async fn test_reregistration_overwrites() {
    let mut router = Router::new();
    router.get("/x", named("old"));
    router.get("/x", named("new"));

    let (_, body) = dispatch(&router, "/x").await;
    assert_eq!(body, "new:/");
}

#[tokio::test]
async fn test_nested_routers_strip_their_own_prefixes() {
    let mut inner = Router::new();
    inner.get("/info", named("info"));

    let mut api = Router::new();
    api.get("/v1", Arc::new(inner));

    let mut root = Router::new();
    root.get("/api", Arc::new(api));

    let (status, body) = dispatch(&root, "/api/v1/info").await;
    assert_eq!(status, Status::Ok);
    // Each level stripped its own prefix; the leaf saw "/" remaining.
    assert_eq!(body, "info:/");

    // A miss below a mounted router reports the path relative to that router.
    let (status, body) = dispatch(&root, "/api/v1/nope").await;
    assert_eq!(status, Status::NotFound);
    assert_eq!(body, "404 Not Found: /nope");
}

#[tokio::test]
async fn test_forwarded_request_keeps_other_fields() {
    let mut router = Router::new();
    router.add_route(
        "/echo",
        Arc::new(FnHandler::new(|req: Request| async move {
            assert_eq!(req.header("x-trace"), Some("abc"));
            assert_eq!(req.version, "1.1");
            Ok(Response::ok(req.body))
        })),
        &[Method::POST],
    );

    let request = RequestBuilder::new()
        .method(Method::POST)
        .path("/echo/back")
        .header("X-Trace", "abc")
        .body(b"payload".to_vec())
        .build()
        .unwrap();

    let response = router.handle(request).await.unwrap();
    assert_eq!(response.body, b"payload".to_vec());
}

#[tokio::test]
async fn test_handler_error_propagates_to_caller() {
    let mut router = Router::new();
    router.get(
        "/boom",
        Arc::new(FnHandler::new(|_req: Request| async {
            Err(anyhow::anyhow!("handler exploded"))
        })),
    );

    // The router forwards downstream results untouched, including errors;
    // turning them into 500s is the connection layer's job.
    assert!(router.handle(get_request("/boom")).await.is_err());
}
