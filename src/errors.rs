use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("{0}")]
    NotFound(String),

    /// Business-rule rejection with a message safe to show the caller.
    #[error("{0}")]
    Rejected(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Unauthenticated => AppError::Unauthenticated,
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::Rejected(msg) => AppError::Rejected(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::NotFound(_) => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Rejected(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Internal(msg) => {
                // Details stay on our side of the trust boundary.
                log::error!("Internal error: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn unauthenticated_returns_401() {
        let resp = AppError::Unauthenticated.error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("Order not found".to_string()).error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn rejection_returns_400() {
        let resp = AppError::Rejected("Update status is not allowed".to_string()).error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rejection_message_is_preserved() {
        assert_eq!(
            AppError::Rejected("Product x not found".to_string()).to_string(),
            "Product x not found"
        );
    }

    #[test]
    fn domain_rejection_maps_to_app_rejection() {
        let app_err: AppError = DomainError::Rejected("no".to_string()).into();
        assert!(matches!(app_err, AppError::Rejected(_)));
    }

    #[test]
    fn domain_internal_maps_to_app_internal() {
        let app_err: AppError = DomainError::Internal("oops".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[test]
    fn domain_unauthenticated_maps_to_app_unauthenticated() {
        let app_err: AppError = DomainError::Unauthenticated.into();
        assert!(matches!(app_err, AppError::Unauthenticated));
    }
}
