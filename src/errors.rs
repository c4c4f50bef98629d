use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Shopping cart is empty")]
    EmptyCart,

    #[error("Not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::EmptyCart => AppError::EmptyCart,
            DomainError::NotFound => AppError::NotFound,
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = |msg: &str| serde_json::json!({ "error": msg });
        match self {
            AppError::EmptyCart | AppError::Validation(_) => {
                HttpResponse::BadRequest().json(body(&self.to_string()))
            }
            AppError::Unauthorized => HttpResponse::Unauthorized().json(body(&self.to_string())),
            AppError::Forbidden => HttpResponse::Forbidden().json(body(&self.to_string())),
            AppError::NotFound => HttpResponse::NotFound().json(body(&self.to_string())),
            AppError::Conflict(_) => HttpResponse::Conflict().json(body(&self.to_string())),
            // Never echo internals to the client.
            AppError::Internal(_) => {
                HttpResponse::InternalServerError().json(body("Internal server error"))
            }
        }
    }
}
