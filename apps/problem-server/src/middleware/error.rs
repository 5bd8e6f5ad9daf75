//! Error handling middleware - RFC 7807 compliant responses.
//!
//! Handlers return any error, wrapped as deeply as they like. The category is
//! recovered here through the lathos classification queries: client errors
//! are echoed to the caller, anything else is captured as an internal error,
//! logged once, and answered with a generic 500.

use std::error::Error;
use std::fmt;

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use lathos_core::{
    ErrInternal, InternalError, Metadata, find_client_error, find_internal_error, is_bad_request,
    is_cannot_process, is_client_error, is_conflict, is_duplicate, is_not_authenticated,
    is_not_authorised, is_not_found, is_too_many_requests, is_unavailable,
};
use lathos_shared::ErrorResponse;
use uuid::Uuid;

/// Header carrying a caller supplied request ID.
pub static REQUEST_ID_HEADER: &str = "x-request-id";

/// Map the category of `err` to an HTTP status.
pub fn status_for(err: &(dyn Error + 'static)) -> StatusCode {
    if is_not_found(err) {
        StatusCode::NOT_FOUND
    } else if is_duplicate(err) || is_conflict(err) {
        StatusCode::CONFLICT
    } else if is_not_authenticated(err) {
        StatusCode::UNAUTHORIZED
    } else if is_not_authorised(err) {
        StatusCode::FORBIDDEN
    } else if is_bad_request(err) {
        StatusCode::BAD_REQUEST
    } else if is_cannot_process(err) {
        StatusCode::UNPROCESSABLE_ENTITY
    } else if is_too_many_requests(err) {
        StatusCode::TOO_MANY_REQUESTS
    } else if is_unavailable(err) {
        StatusCode::SERVICE_UNAVAILABLE
    } else if is_client_error(err) {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub struct AppError {
    error: anyhow::Error,
    request_id: Option<String>,
    metadata: Metadata,
}

impl AppError {
    /// Attach the request ID and request metadata used when reporting this error.
    pub fn with_request(mut self, req: &HttpRequest) -> Self {
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.metadata.insert("method".to_string(), req.method().to_string());
        self.metadata.insert("uri".to_string(), req.uri().to_string());
        self.metadata.insert("request_id".to_string(), request_id.clone());
        self.request_id = Some(request_id);
        self
    }

    fn inner(&self) -> &(dyn Error + 'static) {
        &*self.error
    }

    fn internal_response(&self) -> ErrorResponse {
        let body = ErrorResponse::internal_error();
        let mut metadata = self.metadata.clone();
        metadata.insert("status".to_string(), body.status.to_string());

        let captured;
        let internal: &dyn InternalError = match find_internal_error(self.inner()) {
            Some(internal) => internal,
            None => {
                let fresh = ErrInternal::new(self.inner(), metadata.clone());
                captured = match &self.request_id {
                    Some(id) => fresh.with_id(id.clone()),
                    None => fresh,
                };
                &captured
            }
        };

        tracing::error!(
            error_id = internal.id(),
            stack = internal.stack(),
            metadata = ?metadata,
            "Internal error: {}",
            internal.message()
        );

        body.with_request_id(internal.id())
    }

    /// Body for an error that has a category but no client error in its
    /// chain: only the status is known.
    fn category_response(&self, status: StatusCode) -> ErrorResponse {
        tracing::debug!(status = status.as_u16(), error = %self, "Classified error");

        let body = ErrorResponse::new(status.as_u16(), status.canonical_reason().unwrap_or("Error"));
        match &self.request_id {
            Some(id) => body.with_request_id(id.clone()),
            None => body,
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            error: err.into(),
            request_id: None,
            metadata: Metadata::new(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.error)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        status_for(self.inner())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let body = match find_client_error(self.inner()) {
            Some(client) => {
                tracing::debug!(
                    code = client.code(),
                    title = client.title(),
                    error = %self,
                    "Client error"
                );
                let body = ErrorResponse::from_client_error(status.as_u16(), client);
                match &self.request_id {
                    Some(id) => body.with_request_id(id.clone()),
                    None => body,
                }
            }
            None if status == StatusCode::INTERNAL_SERVER_ERROR => self.internal_response(),
            None => self.category_response(status),
        };

        HttpResponse::build(status).json(body)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Converts handler results into [`AppResult`] tagged with the current request.
pub trait RequestResultExt<T> {
    fn with_request(self, req: &HttpRequest) -> AppResult<T>;
}

impl<T, E> RequestResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn with_request(self, req: &HttpRequest) -> AppResult<T> {
        self.map_err(|err| {
            let err: AppError = err.into();
            err.with_request(req)
        })
    }
}
