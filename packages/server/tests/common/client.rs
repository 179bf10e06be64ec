//! In-process HTTP client that drives the router with `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

const BODY_LIMIT: usize = 1024 * 1024;

/// A response with its body read to the end
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Body parsed as JSON; `Value::Null` for an empty body
    pub fn json(&self) -> Value {
        if self.body.is_empty() {
            return Value::Null;
        }
        serde_json::from_slice(&self.body).unwrap_or_else(|err| {
            panic!(
                "response body is not JSON: {err}; body={}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct ApiClient {
    app: Router,
}

impl ApiClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|err| panic!("router request failed: {err}"));

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .unwrap_or_else(|err| panic!("failed to read response body: {err}"));

        TestResponse {
            status,
            headers,
            body: body.to_vec(),
        }
    }

    pub async fn request(&self, method: Method, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap_or_else(|err| panic!("failed to build request: {err}"));
        self.send(request).await
    }

    /// Send `body` verbatim with a JSON content type
    pub async fn request_raw(&self, method: Method, uri: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|err| panic!("failed to build request: {err}"));
        self.send(request).await
    }

    pub async fn request_json(&self, method: Method, uri: &str, body: Value) -> TestResponse {
        self.request_raw(method, uri, &body.to_string()).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request_json(Method::POST, uri, body).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request_json(Method::PUT, uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri).await
    }
}
