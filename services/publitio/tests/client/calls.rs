use std::collections::HashSet;

use anyhow::Result;
use http::{Method, StatusCode};
use log::debug;
use pretty_assertions::assert_eq;
use publitio::{signature, Client, Params};
use publitio_core::{Context, ErrorKind};
use publitio_http_send_reqwest::ReqwestHttpSend;
use serde_json::json;

use super::stub::*;

fn now_u32() -> u32 {
    (chrono::Utc::now().timestamp().rem_euclid(1 << 32)) as u32
}

/// Check the four signing params of a recorded request and return its nonce.
fn assert_signed(query: &Params) -> String {
    assert_eq!(query.get_all("api_key"), [API_KEY]);

    let nonce = query.get("api_nonce").expect("api_nonce must be sent");
    assert_eq!(nonce.len(), 8, "{nonce}");
    let n: u32 = nonce.parse().expect("api_nonce must be decimal");
    assert!((10_000_000..=99_999_999).contains(&n));

    let timestamp = query.get("api_timestamp").expect("api_timestamp must be sent");
    let ts: u32 = timestamp.parse().expect("api_timestamp must be decimal");
    assert!(now_u32().wrapping_sub(ts) <= 5, "{timestamp} is not recent");

    assert_eq!(
        query.get("api_signature"),
        Some(signature(API_SECRET, timestamp, nonce).as_str())
    );
    nonce.to_string()
}

#[tokio::test]
async fn test_get_is_signed() -> Result<()> {
    let send = RecordingHttpSend::new(r#"{"success": true, "files": []}"#);
    let client = recording_client(&send);

    let resp = client
        .get("files/list", &Params::from([("limit", "12")]))
        .await?;
    assert_eq!(resp, json!({"success": true, "files": []}));

    let reqs = send.take_requests();
    assert_eq!(reqs.len(), 1);
    let req = &reqs[0];
    debug!("recorded request: {req:?}");

    assert_eq!(req.method(), Method::GET);
    assert_eq!(req.uri().scheme_str(), Some("https"));
    assert_eq!(req.uri().host(), Some("api.publit.io"));
    assert_eq!(req.uri().path(), "/v1/files/list");
    assert!(req.body().is_empty());

    let query = query_of(req);
    assert_eq!(query.get("limit"), Some("12"));
    assert_signed(&query);
    Ok(())
}

#[tokio::test]
async fn test_methods() -> Result<()> {
    let send = RecordingHttpSend::new(r#"{"success": true}"#);
    let client = recording_client(&send);
    let params = Params::from([("title", "renamed")]);

    client.put("/files/update/xxGh332", &params).await?;
    client.delete("/files/delete/xxGh332", &Params::new()).await?;
    client
        .call(Method::PATCH, "/files/update/xxGh332", &params)
        .await?;

    let reqs = send.take_requests();
    let methods = reqs.iter().map(|r| r.method().clone()).collect::<Vec<_>>();
    assert_eq!(methods, [Method::PUT, Method::DELETE, Method::PATCH]);
    for req in &reqs {
        assert!(req.uri().path().starts_with("/v1/files/"));
        assert!(req.headers().get(http::header::CONTENT_TYPE).is_none());
        assert_signed(&query_of(req));
    }
    Ok(())
}

#[tokio::test]
async fn test_error_status_is_decoded() -> Result<()> {
    let send = RecordingHttpSend::new(
        r#"{"success": false, "error": {"code": 401, "message": "Unauthorized"}}"#,
    )
    .with_status(StatusCode::UNAUTHORIZED);
    let client = recording_client(&send);

    let resp = client.get("/files/list", &Params::new()).await?;
    assert_eq!(resp["success"], json!(false));
    assert_eq!(resp["error"]["code"], json!(401));
    Ok(())
}

#[tokio::test]
async fn test_invalid_json() -> Result<()> {
    let send =
        RecordingHttpSend::new("<html>bad gateway</html>").with_status(StatusCode::BAD_GATEWAY);
    let client = recording_client(&send);

    let err = client.get("/files/list", &Params::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    assert_eq!(err.context("status"), Some("502"));
    assert_eq!(err.context("path"), Some("/files/list"));
    assert!(err.message().contains("bad gateway"));
    Ok(())
}

#[tokio::test]
async fn test_transport_error() -> Result<()> {
    let ctx = Context::new().with_http_send(FailingHttpSend);
    let client = Client::new(ctx, config(None))?;

    let err = client
        .delete("/files/delete/xxGh332", &Params::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.is_retryable());
    assert_eq!(err.context("method"), Some("DELETE"));
    assert_eq!(err.context("path"), Some("/files/delete/xxGh332"));
    Ok(())
}

#[tokio::test]
async fn test_invalid_path_is_not_sent() -> Result<()> {
    let send = RecordingHttpSend::new("{}");
    let client = recording_client(&send);

    let err = client
        .get("/files/list?limit=12", &Params::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UrlInvalid);
    assert!(send.take_requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_calls() -> Result<()> {
    let send = RecordingHttpSend::new(r#"{"success": true}"#);
    let client = recording_client(&send);

    let tasks = (0..32)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let params = Params::from([("offset", i.to_string())]);
                client.get("/files/list", &params).await
            })
        })
        .collect::<Vec<_>>();
    for task in tasks {
        task.await??;
    }

    let reqs = send.take_requests();
    assert_eq!(reqs.len(), 32);

    let mut offsets = HashSet::new();
    let mut nonces = HashSet::new();
    for req in &reqs {
        let query = query_of(req);
        offsets.insert(query.get("offset").map(str::to_string));
        nonces.insert(assert_signed(&query));
    }
    assert_eq!(offsets.len(), 32);
    assert!(nonces.len() > 1);
    Ok(())
}

#[tokio::test]
async fn test_get_over_http() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let base = serve_echo().await?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let client = Client::new(ctx, config(Some(&format!("{base}/v1/"))))?;

    let resp = client
        .get("/files/list", &Params::from([("limit", "12"), ("tags", "a b")]))
        .await?;
    debug!("echo response: {resp}");

    assert_eq!(resp["method"], json!("GET"));
    assert_eq!(resp["path"], json!("/v1/files/list"));
    assert_eq!(resp["body_len"], json!(0));

    let raw = resp["query"].as_str().expect("query must be a string");
    let query: Params = form_urlencoded::parse(raw.as_bytes()).collect();
    assert_eq!(query.get("limit"), Some("12"));
    assert_eq!(query.get("tags"), Some("a b"));
    assert_signed(&query);
    Ok(())
}

#[tokio::test]
async fn test_path_is_escaped_over_http() -> Result<()> {
    let base = serve_echo().await?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let client = Client::new(ctx, config(Some(&format!("{base}/v1"))))?;

    let resp = client.get("files/show/my file", &Params::new()).await?;
    assert_eq!(resp["path"], json!("/v1/files/show/my%20file"));
    Ok(())
}
