use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{Method, Request, Response, StatusCode};

use cors_devserver::config::{AppState, Config, ConfigOverrides};
use cors_devserver::handler::handle_request;
use cors_devserver::http::ResponseBody;

fn state(root: &Path) -> Arc<AppState> {
    let mut cfg = Config::load_from("does-not-exist", &ConfigOverrides::default()).unwrap();
    cfg.logging.access_log = false;
    Arc::new(AppState::new(cfg, root.to_path_buf()).unwrap())
}

fn peer() -> SocketAddr {
    "127.0.0.1:50000".parse().unwrap()
}

async fn send(state: &Arc<AppState>, method: Method, uri: &str) -> Response<ResponseBody> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Empty::<Bytes>::new())
        .unwrap();
    handle_request(req, Arc::clone(state), peer()).await.unwrap()
}

async fn body(resp: Response<ResponseBody>) -> Bytes {
    resp.into_body().collect().await.unwrap().to_bytes()
}

fn has_cors(resp: &Response<ResponseBody>) -> bool {
    let h = resp.headers();
    h.get("access-control-allow-origin").is_some_and(|v| v == "*")
        && h.get("access-control-allow-methods").is_some_and(|v| v == "GET, POST, OPTIONS")
        && h.get("access-control-allow-headers").is_some_and(|v| v == "Content-Type")
}

#[tokio::test]
async fn test_cors_on_every_branch() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("style.css"), "body{}").unwrap();
    let state = state(dir.path());

    let cases = [
        (Method::GET, "/style.css", StatusCode::OK),
        (Method::GET, "/missing.js", StatusCode::NOT_FOUND),
        (Method::GET, "/api/music-proxy?types=search", StatusCode::OK),
        (Method::GET, "/api/music-proxy?types=bogus", StatusCode::BAD_REQUEST),
        (Method::GET, "/api/music-proxy?target=ftp%3A%2F%2Fx", StatusCode::BAD_REQUEST),
        (Method::OPTIONS, "/api/music-proxy", StatusCode::OK),
        (Method::DELETE, "/style.css", StatusCode::METHOD_NOT_ALLOWED),
    ];
    for (method, uri, status) in cases {
        let resp = send(&state, method.clone(), uri).await;
        assert_eq!(resp.status(), status, "{method} {uri}");
        assert!(has_cors(&resp), "{method} {uri}");
    }
}

#[tokio::test]
async fn test_preflight_body_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(dir.path());

    let resp = send(&state, Method::OPTIONS, "/anything/at/all").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body(resp).await.is_empty());
}

#[tokio::test]
async fn test_prefix_routes_to_mock_api() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(dir.path());

    let resp = send(&state, Method::GET, "/api/music-proxy/extra?types=lyric").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await, Bytes::from_static(br#"{"lyric":""}"#));
}

#[tokio::test]
async fn test_traversal_is_not_found() {
    let outer = tempfile::tempdir().unwrap();
    let root = outer.path().join("site");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(outer.path().join("secret.txt"), "secret").unwrap();
    let state = state(&root);

    let resp = send(&state, Method::GET, "/%2e%2e/secret.txt").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(has_cors(&resp));
}
