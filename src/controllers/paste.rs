//! The two operations of the paste domain: create and fetch.

use chrono::Utc;
use tracing::info;

use crate::db::Database;
use crate::id;
use crate::models::Paste;
use crate::{ApiError, ApiResult};

/// Attempts at the full generate-then-insert cycle. Only a lost race on the
/// unique constraint triggers another attempt, so this is rarely above one.
const MAX_CREATE_ATTEMPTS: usize = 4;

/// Create a paste. Any content is accepted, including empty; `language` is a
/// free-text label with no validation.
pub async fn create(db: &Database, content: String, language: String) -> ApiResult<Paste> {
    for _ in 0..MAX_CREATE_ATTEMPTS {
        let paste_id = id::generate(db).await?;

        match db
            .insert_paste(&paste_id, &content, &language, Utc::now())
            .await
        {
            Ok(paste) => {
                info!(
                    "new paste: id='{paste_id}', language='{language}', size={size}",
                    size = content.len()
                );
                return Ok(paste);
            }
            // a concurrent create claimed the identifier between the
            // existence check and the insert; redraw
            Err(err) if err.is_unique_violation() => continue,
            Err(err) => return Err(err),
        }
    }

    Err(ApiError::IdSpaceExhausted)
}

/// Fetch a paste by identifier. The identifier is looked up literally, any
/// shape accepted; an unknown identifier is a normal miss, not a fault.
pub async fn fetch(db: &Database, paste_id: &str) -> ApiResult<Paste> {
    db.get_paste(paste_id).await
}
