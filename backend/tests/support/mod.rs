#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use litlog::db::{FullRepository, LocalRepository};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Fresh in-memory store behind the trait object the router expects.
pub fn local_repository() -> Arc<dyn FullRepository> {
    Arc::new(LocalRepository::new())
}

/// A SQLite store in a temporary directory. Keep the `TempDir` alive for
/// as long as the repository is used.
#[cfg(feature = "sqlite-repo")]
pub async fn sqlite_repository() -> (tempfile::TempDir, Arc<dyn FullRepository>) {
    use litlog::db::{RepositoryFactory, SqliteConfig};

    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("litlog-test.db");
    let config = SqliteConfig::with_url(path.to_string_lossy());
    let repo = RepositoryFactory::create_sqlite(&config)
        .await
        .expect("open sqlite repository");
    (dir, repo as Arc<dyn FullRepository>)
}

#[cfg(feature = "http-server")]
pub mod http {
    use axum::{
        body::{to_bytes, Body},
        http::{header, HeaderMap, Method, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    /// Response captured for assertions.
    pub struct TestResponse {
        pub status: StatusCode,
        pub headers: HeaderMap,
        pub body: Value,
    }

    pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
        let response = app.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is JSON")
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(app: &Router, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("build request");
        send(app, request).await
    }

    pub async fn post_json(app: &Router, uri: &str, body: Value) -> TestResponse {
        post_raw(app, uri, "application/json", body.to_string()).await
    }

    pub async fn post_raw(
        app: &Router,
        uri: &str,
        content_type: &str,
        body: impl Into<String>,
    ) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.into()))
            .expect("build request");
        send(app, request).await
    }
}
