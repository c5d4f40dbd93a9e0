//! publit.io service signer and client
//!
//! Every call to the publit.io api carries four query params that prove the
//! caller owns an api secret: a random nonce, a timestamp, the api key and a
//! signature over them. This crate builds those params and wraps them into a
//! small [`Client`].
//!
//! ## Example
//!
//! ```no_run
//! use publitio::{Client, Config, Params};
//! use publitio_core::{Context, OsEnv};
//! use publitio_file_read_tokio::TokioFileRead;
//! use publitio_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> publitio_core::Result<()> {
//! let ctx = Context::new()
//!     .with_file_read(TokioFileRead)
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//!
//! // Reads PUBLITIO_API_KEY, PUBLITIO_API_SECRET and PUBLITIO_ENDPOINT.
//! let config = Config::new().from_env(&ctx);
//! let client = Client::new(ctx, config)?;
//!
//! let files = client.get("/files/list", &Params::from([("limit", "12")])).await?;
//! println!("{files}");
//!
//! client
//!     .upload_file_from_path("cat.png", &Params::from([("title", "cat")]))
//!     .await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::{
    API_KEY, API_NONCE, API_SIGNATURE, API_TIMESTAMP, DEFAULT_ENDPOINT, PUBLITIO_API_KEY,
    PUBLITIO_API_SECRET, PUBLITIO_ENDPOINT, RESERVED_PARAMS,
};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod params;
pub use params::Params;

mod nonce;
pub use nonce::generate_nonce;

mod sign_request;
pub use sign_request::{api_timestamp, signature, RequestSigner, SignedRequest};

mod response;
pub use response::{parse_response, Response};

mod client;
pub use client::Client;
