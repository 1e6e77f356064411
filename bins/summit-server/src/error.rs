use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use summit_core::{Error, ErrorCode};
use summit_geo::GeoError;
use summit_peaks::{CatalogError, MatchError};

/// Handler error: a structured [`Error`] rendered as a JSON body.
#[derive(Debug)]
pub struct AppError(pub Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self.0.code {
            ErrorCode::PeakNotFound => StatusCode::NOT_FOUND,
            code if code.is_caller_fault() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn not_found(id: i64) -> Self {
        AppError(Error::peak_not_found(id))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError(Error::new(ErrorCode::InvalidInput, message))
    }

    fn detail(&self) -> String {
        match self.0.code {
            ErrorCode::PeakNotFound => "Peak not found".to_string(),
            _ => self.0.message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({
            "detail": self.detail(),
            "error": self.0.to_report(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<GeoError> for AppError {
    fn from(err: GeoError) -> Self {
        let error = match err {
            GeoError::InvalidCoordinate(message) => Error::invalid_coordinate(message),
            GeoError::InvalidDistance(message) => Error::validation(message),
        };
        AppError(error)
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError(Error::catalog("Peak catalog unavailable").with_source(err))
    }
}

impl From<MatchError<CatalogError>> for AppError {
    fn from(err: MatchError<CatalogError>) -> Self {
        match err {
            MatchError::InvalidInput(e) => e.into(),
            MatchError::Catalog(e) => e.into(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(Error::validation(rejection.body_text()))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError(Error::new(ErrorCode::Internal, "lookup task failed").with_context(err.to_string()))
    }
}
