//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Pricing(e) => {
                tracing::debug!("Rejected pricing input: {}", e);
                let details = Some(error_details(e));
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    PricingErrorResponse {
                        error_type: e.error_type().to_string(),
                        message: e.to_string(),
                        details,
                    },
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    PricingErrorResponse {
                        error_type: "internal".to_string(),
                        message: "Internal error".to_string(),
                        details: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn error_details(error: &PricingError) -> serde_json::Value {
    match error {
        PricingError::InvalidInput { field, .. } => serde_json::json!({ "field": field }),
        PricingError::MissingExchangeRate { currency } => {
            serde_json::json!({ "currency": currency })
        }
        PricingError::InPackage {
            package_number,
            error,
        } => {
            let mut details = error_details(error);
            details["package_number"] = serde_json::json!(package_number);
            details
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_maps_to_422() {
        let err = AppError::from(PricingError::MissingExchangeRate {
            currency: "SAR".to_string(),
        });
        assert!(err.to_string().contains("SAR"));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_package_error_details() {
        let err = PricingError::InPackage {
            package_number: "UMR-2025-0004".to_string(),
            error: Box::new(PricingError::MissingExchangeRate {
                currency: "SAR".to_string(),
            }),
        };
        let details = error_details(&err);
        assert_eq!(details["package_number"], "UMR-2025-0004");
        assert_eq!(details["currency"], "SAR");
    }

    #[test]
    fn test_internal_error_maps_to_500() {
        let err = AppError::Internal("boom".to_string());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
