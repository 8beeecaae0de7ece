use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("Not Found")]
    NotFound,
    #[error("identifier space exhausted")]
    IdSpaceExhausted,
    #[error("error reading multipart data")]
    Multipart {
        #[from]
        source: MultipartError,
    },
    #[error("database error")]
    Database { source: sqlx::Error },
}

impl ApiError {
    /// Whether this error is the store rejecting a write on the unique
    /// `paste_id` constraint (a concurrent create won the id race).
    pub fn is_unique_violation(&self) -> bool {
        match self {
            ApiError::Database {
                source: sqlx::Error::Database(db_err),
            } => matches!(
                db_err.code().as_deref(),
                // sqlite SQLITE_CONSTRAINT_UNIQUE / _PRIMARYKEY, postgres unique_violation
                Some("2067") | Some("1555") | Some("23505")
            ),
            _ => false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::IdSpaceExhausted => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Multipart { .. } => StatusCode::BAD_REQUEST,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status_code, format!("{self}")).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            _ => ApiError::Database { source },
        }
    }
}
