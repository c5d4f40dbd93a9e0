//! Core components for talking to the publit.io API.
//!
//! This crate provides the transport-agnostic foundations that the `publitio`
//! crate builds its signed calls on.
//!
//! ## Overview
//!
//! - **Context**: Holds the implementations for HTTP sending, file reading and environment access
//! - **Error**: One error type for every stage of a call, classified by [`ErrorKind`]
//! - **Multipart**: A multipart/form-data body builder used by uploads
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use publitio_core::{Context, HttpSend, Result};
//!
//! #[derive(Debug)]
//! struct EchoHttpSend;
//!
//! #[async_trait::async_trait]
//! impl HttpSend for EchoHttpSend {
//!     async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//!         let query = req.uri().query().unwrap_or_default().to_string();
//!         Ok(http::Response::new(Bytes::from(query)))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_http_send(EchoHttpSend);
//! let req = http::Request::get("https://api.publit.io/v1/files/list?limit=12")
//!     .body(Bytes::new())?;
//! let resp = ctx.http_send(req).await?;
//! assert_eq!(resp.body().as_ref(), b"limit=12");
//! # Ok(())
//! # }
//! ```
//!
//! ## Traits
//!
//! - [`HttpSend`]: For sending HTTP requests
//! - [`FileRead`]: For asynchronous file reading
//! - [`Env`]: For environment variable access
//!
//! ## Utilities
//!
//! - [`hash`]: SHA1 and entropy helpers
//! - [`time`]: Time helpers
//! - [`utils`]: Redaction of secrets in debug output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::FileRead;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopFileRead;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};

mod multipart;
pub use multipart::FormDataPart;
pub use multipart::Multipart;
