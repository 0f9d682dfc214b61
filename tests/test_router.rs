use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use proda::http::request::Request;
use proda::router::{Handler, HandlerFuture, ResponseStream, Router};

struct NoopPage;

impl Handler for NoopPage {
    fn handle<'a>(&'a self, _stream: &'a mut ResponseStream, _request: &'a Request) -> HandlerFuture<'a> {
        Box::pin(async move { Ok(()) })
    }
}

struct RecordingPage {
    called: Arc<AtomicBool>,
    body: &'static [u8],
}

impl Handler for RecordingPage {
    fn handle<'a>(&'a self, stream: &'a mut ResponseStream, _request: &'a Request) -> HandlerFuture<'a> {
        Box::pin(async move {
            use tokio::io::AsyncWriteExt;
            self.called.store(true, Ordering::SeqCst);
            stream.write_all(self.body).await?;
            Ok(())
        })
    }
}

fn request_for(path: &str) -> Request {
    Request {
        method: "GET".to_string(),
        path: path.to_string(),
        protocol: "HTTP/1.1".to_string(),
    }
}

#[test]
fn test_router_exact_match() {
    let mut router = Router::new().unwrap();
    router.register("/", Arc::new(NoopPage)).unwrap();
    router.register("/scream", Arc::new(NoopPage)).unwrap();

    assert_eq!(router.resolve("/"), Some(0));
    assert_eq!(router.resolve("/scream"), Some(1));
}

#[test]
fn test_router_empty_path_misses() {
    let mut router = Router::new().unwrap();
    router.register("/", Arc::new(NoopPage)).unwrap();

    assert_eq!(router.resolve(""), None);
}

#[test]
fn test_router_single_level_fallback() {
    let mut router = Router::new().unwrap();
    router.register("/scream", Arc::new(NoopPage)).unwrap();

    // One segment stripped finds the parent
    assert_eq!(router.resolve("/scream/extra"), Some(0));
    // Two segments deep: the fallback looks up "/scream/extra" only
    assert_eq!(router.resolve("/scream/extra/more"), None);
}

#[test]
fn test_router_fallback_to_root() {
    let mut router = Router::new().unwrap();
    router.register("/", Arc::new(NoopPage)).unwrap();

    assert_eq!(router.resolve("/anything"), Some(0));
    assert_eq!(router.resolve("/a/b"), None);
}

#[test]
fn test_router_path_without_slash_misses() {
    let mut router = Router::new().unwrap();
    router.register("/", Arc::new(NoopPage)).unwrap();

    assert_eq!(router.resolve("favicon.ico"), None);
}

#[test]
fn test_router_unregistered_misses() {
    let router = Router::new().unwrap();
    assert_eq!(router.resolve("/scream"), None);
}

#[test]
fn test_router_reregister_overwrites_mapping() {
    let mut router = Router::new().unwrap();
    router.register("/page", Arc::new(NoopPage)).unwrap();
    router.register("/page", Arc::new(NoopPage)).unwrap();

    // The path now points at the new slot; the old slot stays allocated
    assert_eq!(router.resolve("/page"), Some(1));
    assert_eq!(router.handler_count(), 2);
}

#[tokio::test]
async fn test_router_dispatch_invokes_handler() {
    let called = Arc::new(AtomicBool::new(false));
    let mut router = Router::new().unwrap();
    router
        .register(
            "/page",
            Arc::new(RecordingPage {
                called: called.clone(),
                body: b"hello",
            }),
        )
        .unwrap();

    let request = request_for("/page");
    let slot = router.resolve(&request.path).unwrap();

    let mut out: Vec<u8> = Vec::new();
    router.dispatch(slot, &mut out, &request).await.unwrap();

    assert!(called.load(Ordering::SeqCst));
    assert_eq!(out, b"hello");
}

#[tokio::test]
async fn test_router_dispatch_fallback_sees_original_path() {
    struct PathCheck;
    impl Handler for PathCheck {
        fn handle<'a>(&'a self, _stream: &'a mut ResponseStream, request: &'a Request) -> HandlerFuture<'a> {
            Box::pin(async move {
                // The handler receives the request as parsed, not the
                // stripped prefix it was resolved through
                assert_eq!(request.path, "/scream/extra");
                Ok(())
            })
        }
    }

    let mut router = Router::new().unwrap();
    router.register("/scream", Arc::new(PathCheck)).unwrap();

    let request = request_for("/scream/extra");
    let slot = router.resolve(&request.path).unwrap();
    let mut out: Vec<u8> = Vec::new();
    router.dispatch(slot, &mut out, &request).await.unwrap();
}
