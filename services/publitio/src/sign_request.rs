//! publit.io request signing.
use http::Uri;
use log::debug;
use percent_encoding::utf8_percent_encode;
use publitio_core::hash::hex_sha1;
use publitio_core::time::{now, unix_seconds_u32, DateTime};
use publitio_core::{Error, Result};

use crate::constants::*;
use crate::nonce::generate_nonce;
use crate::{Credential, Params};

/// Format the `api_timestamp` of a request signed at `time`.
///
/// The service only accepts 32 bit timestamps, so unix seconds are reduced
/// modulo 2^32.
pub fn api_timestamp(time: DateTime) -> String {
    unix_seconds_u32(time).to_string()
}

/// Compute the `api_signature` for a timestamp and nonce.
///
/// ## Format
///
/// ```text
/// lowercase_hex(SHA1(timestamp + nonce + secret))
/// ```
///
/// The fields are concatenated without separator in exactly this order.
pub fn signature(secret: &str, timestamp: &str, nonce: &str) -> String {
    let mut s = String::with_capacity(timestamp.len() + nonce.len() + secret.len());
    s.push_str(timestamp);
    s.push_str(nonce);
    s.push_str(secret);

    hex_sha1(s.as_bytes())
}

/// SignedRequest is the one-shot result of signing a call.
///
/// It is built right before the request is sent and consumed by it. A retry
/// must sign again: the service rejects a nonce it has seen before.
#[derive(Debug)]
pub struct SignedRequest {
    /// The `api_nonce` sent.
    pub nonce: String,
    /// The `api_timestamp` sent.
    pub timestamp: String,
    /// The `api_signature` sent.
    pub signature: String,
    /// Absolute url carrying the caller params and the four signing params.
    pub uri: Uri,
}

/// RequestSigner builds signed urls for the publit.io api.
///
/// - [Authentication](https://publit.io/docs/#authentication)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    endpoint: String,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a signer for urls below `endpoint`, e.g. `https://api.publit.io/v1`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The endpoint urls are built below, without trailing `/`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sign a call to `path` with a fresh nonce and the current time.
    ///
    /// `path` may or may not start with `/`. Characters not allowed in a url
    /// path are percent-encoded, existing escapes are kept. Caller values for the reserved
    /// params `api_nonce`, `api_timestamp`, `api_key` and `api_signature` are
    /// replaced by the signed ones.
    pub fn sign(&self, cred: &Credential, path: &str, params: &Params) -> Result<SignedRequest> {
        let base = join_path(&self.endpoint, path)?;

        let nonce = generate_nonce()?;
        let timestamp = api_timestamp(self.time.unwrap_or_else(now));
        let signature = signature(&cred.api_secret, &timestamp, &nonce);

        let mut query = params.clone();
        query.set(API_NONCE, vec![nonce.clone()]);
        query.set(API_TIMESTAMP, vec![timestamp.clone()]);
        query.set(API_KEY, vec![cred.api_key.clone()]);
        query.set(API_SIGNATURE, vec![signature.clone()]);

        let uri = format!("{base}?{}", query.encode())
            .parse::<Uri>()
            .map_err(|e| Error::url_invalid("failed to build signed url").with_source(e))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(Error::url_invalid(format!(
                "endpoint {:?} is not an absolute url",
                self.endpoint
            )));
        }

        debug!("signed {path} with nonce {nonce} at {timestamp}");
        Ok(SignedRequest {
            nonce,
            timestamp,
            signature,
            uri,
        })
    }
}

/// Join endpoint and path with exactly one `/`, escaping the path.
///
/// A `%` is kept so that paths escaped by the caller are sent unchanged.
fn join_path(endpoint: &str, path: &str) -> Result<String> {
    if path.is_empty() {
        return Err(Error::url_invalid("path must not be empty"));
    }
    if path.contains(['?', '#']) {
        return Err(Error::url_invalid(
            "path must not contain a query or fragment, pass them as params",
        ));
    }
    let bytes = path.as_bytes();
    let broken_escape = bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    });
    if broken_escape {
        return Err(Error::url_invalid("path contains an invalid percent escape"));
    }

    let path = utf8_percent_encode(path.trim_start_matches('/'), PATH_ENCODE_SET);
    Ok(format!("{endpoint}/{path}"))
}
