//! Reqwest-based HTTP transport for publitio.
//!
//! This crate provides `ReqwestHttpSend`, an implementation of the
//! [`HttpSend`] trait from `publitio_core` on top of [`reqwest::Client`].
//!
//! Timeouts, proxies and TLS settings are whatever the supplied client is
//! configured with; nothing is added on top.
//!
//! ## Example
//!
//! ```no_run
//! use publitio_core::Context;
//! use publitio_http_send_reqwest::ReqwestHttpSend;
//! use std::time::Duration;
//!
//! let client = reqwest::Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use publitio_core::{Error, HttpSend, Result};
use reqwest::{Client, Request};

/// Reqwest-based implementation of the `HttpSend` trait.
///
/// The response body is collected completely before returning, so the
/// connection is released even if the caller never looks at the body.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::url_invalid("failed to convert request into reqwest request").with_source(e)
        })?;
        let method = req.method().clone();

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport("failed to send request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport("failed to read response body").with_source(e))?;

        debug!(
            "{method} got response status {} with {} bytes",
            parts.status,
            bs.len()
        );
        Ok(http::Response::from_parts(parts, bs))
    }
}
