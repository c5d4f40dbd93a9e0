use rand::rngs::OsRng;
use rand::RngCore;

use publitio_core::{Error, Result};

const NONCE_MIN: u32 = 10_000_000;
const NONCE_SPAN: u32 = 90_000_000;
/// Largest multiple of `NONCE_SPAN` that fits in u32. Draws at or above it
/// are rejected so that every nonce is equally likely.
const NONCE_ZONE: u32 = NONCE_SPAN * (u32::MAX / NONCE_SPAN);

/// Generate a fresh nonce: an 8 digit decimal in `[10000000, 99999999]`.
///
/// Every call draws from the operating system entropy source, which is safe
/// to use from many threads at once.
pub fn generate_nonce() -> Result<String> {
    nonce_from(&mut OsRng)
}

fn nonce_from(rng: &mut impl RngCore) -> Result<String> {
    loop {
        let mut buf = [0u8; 4];
        rng.try_fill_bytes(&mut buf).map_err(|e| {
            Error::random_source("failed to read os entropy for nonce").with_source(e)
        })?;

        let v = u32::from_le_bytes(buf);
        if v < NONCE_ZONE {
            return Ok((NONCE_MIN + v % NONCE_SPAN).to_string());
        }
    }
}
