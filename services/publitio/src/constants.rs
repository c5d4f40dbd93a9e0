use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Env values used by Config::from_env.
/// Env value holding the api key.
pub const PUBLITIO_API_KEY: &str = "PUBLITIO_API_KEY";
/// Env value holding the api secret.
pub const PUBLITIO_API_SECRET: &str = "PUBLITIO_API_SECRET";
/// Env value overriding [`DEFAULT_ENDPOINT`].
pub const PUBLITIO_ENDPOINT: &str = "PUBLITIO_ENDPOINT";

/// Endpoint every call goes to unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://api.publit.io/v1";

// Query params added to every request.
/// Random 8 digit number, fresh per request.
pub const API_NONCE: &str = "api_nonce";
/// Unix seconds modulo 2^32 at signing time.
pub const API_TIMESTAMP: &str = "api_timestamp";
/// The caller's api key.
pub const API_KEY: &str = "api_key";
/// Hex SHA1 over timestamp, nonce and secret.
pub const API_SIGNATURE: &str = "api_signature";
/// Query params the signer owns. Caller values for them are dropped.
pub const RESERVED_PARAMS: [&str; 4] = [API_NONCE, API_TIMESTAMP, API_KEY, API_SIGNATURE];

// Uploads.
pub const UPLOAD_PATH: &str = "/files/create";
pub const UPLOAD_FIELD_NAME: &str = "file";
pub const UPLOAD_FILE_NAME: &str = "new ";
pub const REMOTE_UPLOAD_CONTENT_TYPE: &str = "multipart/form-data";

/// Characters escaped in the path of a call.
///
/// Everything but unreserved characters, `/`, `%` and the sub-delims a
/// path may carry as is.
pub const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/')
    .remove(b'%')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');
