use std::path::PathBuf;

use shoal::handler::Handler;
use shoal::handler::static_files::StaticFiles;
use shoal::http::method::Method;
use shoal::http::request::{Request, RequestBuilder};
use shoal::http::status::Status;

/// Creates a unique temp directory with one known file in it.
fn setup_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("shoal-static-{name}-{}", std::process::id()));
    std::fs::create_dir_all(root.join("sub")).unwrap();
    std::fs::write(root.join("hello.txt"), b"hello file").unwrap();
    std::fs::write(root.join("sub/page.html"), b"<html></html>").unwrap();
    root
}

fn get_request(path: &str) -> Request {
    RequestBuilder::new()
        .method(Method::GET)
        .path(path)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_serves_file_with_mime_type() {
    let root = setup_root("serve");
    let handler = StaticFiles::new(&root);

    let response = handler.handle(get_request("/hello.txt")).await.unwrap();
    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.body, b"hello file".to_vec());

    let response = handler.handle(get_request("/sub/page.html")).await.unwrap();
    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.header("content-type"), Some("text/html"));

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let root = setup_root("missing");
    let handler = StaticFiles::new(&root);

    let response = handler.handle(get_request("/nope.txt")).await.unwrap();
    assert_eq!(response.status, Status::NotFound);

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_refuses_paths_outside_root() {
    let root = setup_root("escape");
    let handler = StaticFiles::new(&root);

    for path in [
        "/../hello.txt",
        "/sub/../../hello.txt",
        "/../../etc/passwd",
    ] {
        let response = handler.handle(get_request(path)).await.unwrap();
        assert_eq!(response.status, Status::Forbidden, "path {path:?}");
    }

    std::fs::remove_dir_all(&root).unwrap();
}
