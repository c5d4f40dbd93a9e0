use std::fmt::{Debug, Formatter};

use publitio_core::utils::Redact;

/// Credential for publit.io.
///
/// Fixed once a client is built.
#[derive(Clone)]
pub struct Credential {
    /// Api key sent as `api_key` with every request
    pub api_key: String,
    /// Api secret, only ever used as signature input
    pub api_secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &Redact::from(&self.api_key))
            .field("api_secret", &Redact::from(&self.api_secret))
            .finish()
    }
}
