//! Error handling for the Inventory & Procurement Management Platform
//!
//! Provides consistent error responses in English and French

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::StockRuleError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_fr: String,
    },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Insufficient stock: cannot remove {requested} from {available}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Received quantity {received} exceeds ordered quantity {ordered}")]
    OverReceipt { ordered: i32, received: i32 },

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Article-supplier association already exists: {0}")]
    DuplicateAssociation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<StockRuleError> for AppError {
    fn from(err: StockRuleError) -> Self {
        match err {
            StockRuleError::InvalidQuantity => {
                AppError::InvalidQuantity("quantity must be a positive integer".to_string())
            }
            StockRuleError::NegativeReceipt => {
                AppError::InvalidQuantity("received quantity cannot be negative".to_string())
            }
            StockRuleError::InsufficientStock {
                available,
                requested,
            } => AppError::InsufficientStock {
                available,
                requested,
            },
            StockRuleError::OverReceipt { ordered, received } => {
                AppError::OverReceipt { ordered, received }
            }
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_fr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "TOKEN_EXPIRED".to_string(),
                    message_en: "Token has expired".to_string(),
                    message_fr: "Le jeton a expiré".to_string(),
                    field: None,
                },
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_TOKEN".to_string(),
                    message_en: "Invalid token".to_string(),
                    message_fr: "Jeton invalide".to_string(),
                    field: None,
                },
            ),
            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorDetail {
                    code: "FORBIDDEN".to_string(),
                    message_en: msg.clone(),
                    message_fr: "Permission refusée".to_string(),
                    field: None,
                },
            ),
            AppError::Validation {
                field,
                message,
                message_fr,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_fr: message_fr.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidQuantity(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_QUANTITY".to_string(),
                    message_en: msg.clone(),
                    message_fr: format!("Quantité invalide: {}", msg),
                    field: Some("quantity".to_string()),
                },
            ),
            AppError::InsufficientStock {
                available,
                requested,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message_en: format!(
                        "Insufficient stock: cannot remove {} from {}",
                        requested, available
                    ),
                    message_fr: "Quantité insuffisante en stock".to_string(),
                    field: None,
                },
            ),
            AppError::OverReceipt { ordered, received } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "OVER_RECEIPT".to_string(),
                    message_en: format!(
                        "Received quantity {} exceeds ordered quantity {}",
                        received, ordered
                    ),
                    message_fr: "La quantité reçue ne peut dépasser la quantité commandée"
                        .to_string(),
                    field: Some("quantity_received".to_string()),
                },
            ),
            AppError::DuplicateEntry(field) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message_en: format!("A record with this {} already exists", field),
                    message_fr: format!("Un enregistrement avec ce {} existe déjà", field),
                    field: Some(field.clone()),
                },
            ),
            AppError::DuplicateAssociation(msg) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ASSOCIATION".to_string(),
                    message_en: msg.clone(),
                    message_fr: "Cette association article-fournisseur existe déjà".to_string(),
                    field: None,
                },
            ),
            AppError::InvalidStateTransition(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INVALID_STATE_TRANSITION".to_string(),
                    message_en: msg.clone(),
                    message_fr: format!("Impossible de changer le statut: {}", msg),
                    field: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_fr: format!("{} introuvable", resource),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred".to_string(),
                    message_fr: "Une erreur de base de données est survenue".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_fr: "Une erreur interne est survenue".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
