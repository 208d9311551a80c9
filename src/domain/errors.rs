use thiserror::Error;

/// Error taxonomy shared by the services and repositories.
///
/// `Rejected` carries a human-readable business-rule message and is never
/// logged as a system fault; `Internal` wraps infrastructure failures whose
/// details must not cross the trust boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
