use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use crates::domain::value_objects::limits::LimitInfo;
use serde::Serialize;
use thiserror::Error;

use crate::usecases::{
    appointments::AppointmentError, locations::LocationError, services::ServiceError,
    subscriptions::SubscriptionError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

/// Body returned when a plan cap blocks a create. The shape is part of the
/// client contract, so the field names are fixed here.
#[derive(Debug, Serialize)]
pub struct LimitReachedResponse {
    pub error: String,
    pub message: String,
    pub limit: i64,
    pub current: i64,
    #[serde(rename = "upgradeRequired")]
    pub upgrade_required: bool,
}

impl LimitReachedResponse {
    pub fn from_info(info: &LimitInfo) -> Self {
        Self {
            error: info.error_label(),
            message: info.message(),
            limit: info.limit,
            current: info.current,
            upgrade_required: true,
        }
    }
}

// Your app-level error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{}", .0.message())]
    LimitExceeded(LimitInfo),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::LimitExceeded(info) = &self {
            let body = Json(LimitReachedResponse::from_info(info));
            return (StatusCode::FORBIDDEN, body).into_response();
        }

        let (status, message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::LimitExceeded(_) => unreachable!(),
            AppError::Internal(_) => {
                // Don't leak internal error detail to client
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::LimitExceeded(info) => AppError::LimitExceeded(info),
            AppointmentError::NotFound => AppError::NotFound(err.to_string()),
            AppointmentError::Internal(inner) => AppError::Internal(inner),
        }
    }
}

impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::LimitExceeded(info) => AppError::LimitExceeded(info),
            LocationError::NotFound => AppError::NotFound(err.to_string()),
            LocationError::Internal(inner) => AppError::Internal(inner),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::LimitExceeded(info) => AppError::LimitExceeded(info),
            ServiceError::NotFound => AppError::NotFound(err.to_string()),
            ServiceError::Internal(inner) => AppError::Internal(inner),
        }
    }
}

impl From<SubscriptionError> for AppError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::PlanNotFound | SubscriptionError::SubscriptionNotFound => {
                AppError::NotFound(err.to_string())
            }
            SubscriptionError::Internal(inner) => AppError::Internal(inner),
        }
    }
}
