use bytes::Bytes;
use log::debug;
use publitio_core::{Error, Result};

/// At most this many body bytes are copied into a parse error.
const BODY_PREFIX_LIMIT: usize = 1024;

/// The decoded json body of a call.
///
/// No schema is applied. The service reports its own failures as json
/// objects (for example `{"success": false, "error": {...}}`), so callers
/// check the shape of the value.
pub type Response = serde_json::Value;

/// Decode the whole response body as json.
///
/// The status code is not looked at: an error status with a json body
/// decodes like any other response.
pub fn parse_response(resp: http::Response<Bytes>) -> Result<Response> {
    let status = resp.status();
    let body = resp.into_body();
    debug!("decoding response with status {status} and {} bytes", body.len());

    serde_json::from_slice(&body).map_err(|e| {
        Error::response_invalid(format!(
            "failed to parse response as json: {}",
            body_prefix(&body)
        ))
        .with_context("status", status.as_str())
        .with_source(e)
    })
}

fn body_prefix(body: &[u8]) -> String {
    if body.len() <= BODY_PREFIX_LIMIT {
        return String::from_utf8_lossy(body).into_owned();
    }

    format!(
        "{}... ({} bytes total)",
        String::from_utf8_lossy(&body[..BODY_PREFIX_LIMIT]),
        body.len()
    )
}
