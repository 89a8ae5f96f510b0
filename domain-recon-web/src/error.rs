//! HTTP error mapping for recon failures.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use domain_recon_core::ReconError;
use thiserror::Error;

/// Wrapper giving [`ReconError`] an HTTP status mapping, plus the one
/// HTTP-only case (download of a report that was never written).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Recon(#[from] ReconError),

    #[error("{0}")]
    NotFound(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Recon(ReconError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            Self::Recon(ReconError::LookupError(_)) => StatusCode::BAD_GATEWAY,
            Self::Recon(ReconError::ExportError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Recon(e) => {
                if e.is_expected() {
                    tracing::warn!("Request rejected: {e}");
                } else {
                    tracing::error!("Request failed: {e}");
                }
                HttpResponse::build(self.status_code()).json(e)
            }
            Self::NotFound(msg) => {
                tracing::warn!("Request rejected: {msg}");
                // Same wire shape as the serialized ReconError.
                HttpResponse::NotFound().json(serde_json::json!({
                    "code": "NotFoundError",
                    "details": msg,
                }))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_error_kind() {
        let validation = ApiError::Recon(ReconError::ValidationError("bad".to_string()));
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        let lookup = ApiError::Recon(ReconError::LookupError("down".to_string()));
        assert_eq!(lookup.status_code(), StatusCode::BAD_GATEWAY);

        let export = ApiError::Recon(ReconError::ExportError("disk".to_string()));
        assert_eq!(export.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let missing = ApiError::NotFound("no report".to_string());
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_response_body_is_tagged() {
        let err = ApiError::Recon(ReconError::ValidationError("bad input".to_string()));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
