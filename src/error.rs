use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Application error taxonomy. Domain-rule violations (`InvalidQuantity`,
/// `InsufficientSeats`) are normally caught by the controllers and turned
/// into redirect-with-message responses; anything that falls through maps to
/// a plain HTTP status here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("la cantidad debe ser positiva")]
    InvalidQuantity,

    #[error("sólo quedan {available} asientos disponibles")]
    InsufficientSeats { available: i32 },

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("password hashing error")]
    Hash(#[from] bcrypt::BcryptError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Html("<h1>404 - No encontrado</h1>".to_string()),
            )
                .into_response(),
            AppError::InvalidQuantity | AppError::InsufficientSeats { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()).into_response()
            }
            AppError::Database(_) | AppError::Hash(_) => {
                tracing::error!("internal error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Error interno del servidor</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let resp = AppError::NotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn insufficient_seats_names_the_remainder() {
        let err = AppError::InsufficientSeats { available: 0 };
        assert!(err.to_string().contains('0'));
    }

    #[test]
    fn database_error_maps_to_500() {
        let resp = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
