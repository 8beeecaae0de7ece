use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::any::AnyRow;
use sqlx::{FromRow, Row};

/// A paste, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paste {
    /// Store-assigned surrogate key.
    pub id: i64,
    /// The short identifier clients use to retrieve the paste.
    pub paste_id: String,
    pub created_at: DateTime<Utc>,
    pub content: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
}

// Timestamps are stored as RFC 3339 text; the any-database row only hands
// back primitive column types.
impl<'r> FromRow<'r, AnyRow> for Paste {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        let created_at: String = row.try_get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|err| sqlx::Error::ColumnDecode {
                index: "created_at".to_string(),
                source: Box::new(err),
            })?
            .with_timezone(&Utc);

        Ok(Paste {
            id: row.try_get("id")?,
            paste_id: row.try_get("paste_id")?,
            created_at,
            content: row.try_get("content")?,
            language: row.try_get("language")?,
        })
    }
}
