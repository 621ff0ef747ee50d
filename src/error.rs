use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field: {0}")]
    InvalidField(&'static str),

    #[error("Candidate must have at least one offer")]
    NoOffers,

    #[error("One or more job offers do not exist")]
    UnknownOffer,

    #[error("Candidate with this email already exists")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    StorageFailure(sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingField(_)
            | Error::InvalidField(_)
            | Error::NoOffers
            | Error::UnknownOffer => StatusCode::BAD_REQUEST,
            Error::DuplicateEmail => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = match &self {
            Error::MissingField(_)
            | Error::InvalidField(_)
            | Error::NoOffers
            | Error::UnknownOffer
            | Error::DuplicateEmail => json!({ "message": self.to_string() }),
            Error::StorageFailure(err) => {
                tracing::error!(error = %err, "Storage failure while handling request");
                json!({
                    "message": "Database error",
                    "error": "An unexpected error occurred",
                })
            }
            other => {
                tracing::error!(error = %other, "Unhandled internal error");
                json!({
                    "message": "Internal server error",
                    "error": "An unexpected error occurred",
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::StorageFailure(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value as JsonValue;

    async fn body_of(err: Error) -> (StatusCode, JsonValue) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn client_errors_carry_their_message() {
        let (status, body) = body_of(Error::MissingField("email")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Missing required field: email");

        let (status, body) = body_of(Error::DuplicateEmail).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Candidate with this email already exists");

        let (status, body) = body_of(Error::UnknownOffer).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "One or more job offers do not exist");
    }

    #[tokio::test]
    async fn storage_failure_does_not_leak_the_driver_error() {
        let (status, body) = body_of(Error::StorageFailure(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Database error");
        assert_eq!(body["error"], "An unexpected error occurred");
        assert!(!body.to_string().contains("pool timed out"));
    }
}
