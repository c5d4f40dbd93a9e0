use std::fmt;
use thiserror::Error;

/// The error type for publitio operations
#[derive(Error, Debug)]
#[error("{kind}: {message}{}", render_context(.context))]
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred, one per stage of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operating system entropy source is unavailable
    RandomSource,

    /// The request url cannot be built from the endpoint, path and params
    UrlInvalid,

    /// The upload content cannot be read
    ContentRead,

    /// The multipart body or its content type cannot be built
    MultipartInvalid,

    /// The request could not be delivered or its response could not be read
    Transport,

    /// The response body is not valid json
    ResponseInvalid,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Unexpected errors (unconfigured components, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::new(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach a key/value pair describing where the error happened.
    ///
    /// Context is rendered after the message in the order it was added.
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message without kind and context.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context value for `key`, if any.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check if the failed call may be issued again.
    ///
    /// Only transport failures qualify. A retry must go through the client
    /// again so that it is signed with a fresh nonce and timestamp.
    pub fn is_retryable(&self) -> bool {
        self.kind == ErrorKind::Transport
    }
}

// Convenience constructors
impl Error {
    /// Create a random source error
    pub fn random_source(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RandomSource, message)
    }

    /// Create an url invalid error
    pub fn url_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UrlInvalid, message)
    }

    /// Create a content read error
    pub fn content_read(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ContentRead, message)
    }

    /// Create a multipart invalid error
    pub fn multipart_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MultipartInvalid, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a response invalid error
    pub fn response_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResponseInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::RandomSource => write!(f, "random source unavailable"),
            ErrorKind::UrlInvalid => write!(f, "invalid url"),
            ErrorKind::ContentRead => write!(f, "content read failed"),
            ErrorKind::MultipartInvalid => write!(f, "invalid multipart body"),
            ErrorKind::Transport => write!(f, "transport failed"),
            ErrorKind::ResponseInvalid => write!(f, "invalid response"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

fn render_context(context: &[(&'static str, String)]) -> String {
    if context.is_empty() {
        return String::new();
    }

    let pairs = context
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(" ({pairs})")
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::url_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::url_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::multipart_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
