//! Short identifier generation.
//!
//! Identifiers are random rather than sequential so pastes cannot be
//! enumerated by walking ids.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;

use crate::db::Database;
use crate::{ApiError, ApiResult};

/// Random bytes drawn per identifier; encodes to 14 characters.
const TOKEN_BYTES: usize = 10;

/// Cap on redraws before giving up, so a degraded randomness source cannot
/// turn the collision check into an unbounded loop.
const MAX_ATTEMPTS: usize = 16;

/// Generate an identifier that is not present in the store at the time of
/// the check.
///
/// The check-then-insert window is closed by the unique constraint on
/// `paste_id`; see [`crate::controllers::paste::create`].
pub async fn generate(db: &Database) -> ApiResult<String> {
    for _ in 0..MAX_ATTEMPTS {
        let id = token();
        if !db.paste_exists(&id).await? {
            return Ok(id);
        }
    }

    Err(ApiError::IdSpaceExhausted)
}

/// Draw a fresh random token: URL-safe, unpadded, fixed length.
fn token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
