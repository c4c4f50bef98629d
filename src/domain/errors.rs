use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Shopping cart is empty")]
    EmptyCart,
    #[error("Not found")]
    NotFound,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
