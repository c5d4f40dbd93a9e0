use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use axum::Router;
use bytes::Bytes;
use http::StatusCode;
use publitio::{Client, Config, Params};
use publitio_core::{Context, Error, HttpSend, Result};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const API_KEY: &str = "xxx";
pub const API_SECRET: &str = "yyy";

/// Replies with a fixed response and keeps every request it was given.
#[derive(Debug, Clone)]
pub struct RecordingHttpSend {
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
    status: StatusCode,
    body: Bytes,
}

impl RecordingHttpSend {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            requests: Arc::default(),
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn take_requests(&self) -> Vec<http::Request<Bytes>> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

#[async_trait]
impl HttpSend for RecordingHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.requests.lock().unwrap().push(req);

        Ok(http::Response::builder()
            .status(self.status)
            .body(self.body.clone())?)
    }
}

/// Fails every request as if the connection dropped.
#[derive(Debug)]
pub struct FailingHttpSend;

#[async_trait]
impl HttpSend for FailingHttpSend {
    async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::transport("connection reset by peer"))
    }
}

pub fn config(endpoint: Option<&str>) -> Config {
    let mut cfg = Config::new()
        .with_api_key(API_KEY)
        .with_api_secret(API_SECRET);
    if let Some(endpoint) = endpoint {
        cfg = cfg.with_endpoint(endpoint);
    }
    cfg
}

pub fn recording_client(send: &RecordingHttpSend) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_http_send(send.clone());
    Client::new(ctx, config(None)).expect("config must be valid")
}

pub fn query_of(req: &http::Request<Bytes>) -> Params {
    form_urlencoded::parse(req.uri().query().unwrap_or_default().as_bytes()).collect()
}

/// Serve `app` on a random local port and return its base url.
pub async fn serve(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, app).await });
    Ok(format!("http://{addr}"))
}

/// Serve an app that describes every request it receives as json.
pub async fn serve_echo() -> anyhow::Result<String> {
    serve(Router::new().fallback(echo)).await
}

async fn echo(req: Request) -> Json<Value> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or_default().to_string();
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut parts = Vec::new();
    let mut body_len = 0;
    if content_type.starts_with("multipart/form-data;") {
        let mut mp = Multipart::from_request(req, &())
            .await
            .expect("multipart body must be valid");
        while let Some(field) = mp.next_field().await.expect("field must be valid") {
            let name = field.name().map(str::to_string);
            let file_name = field.file_name().map(str::to_string);
            let field_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.expect("field content must be readable");
            parts.push(json!({
                "name": name,
                "file_name": file_name,
                "content_type": field_type,
                "data": String::from_utf8_lossy(&data),
            }));
        }
    } else {
        body_len = axum::body::to_bytes(req.into_body(), usize::MAX)
            .await
            .expect("body must be readable")
            .len();
    }

    Json(json!({
        "method": method,
        "path": path,
        "query": query,
        "content_type": content_type,
        "body_len": body_len,
        "parts": parts,
    }))
}
