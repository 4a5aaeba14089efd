//! Application error type and the rules for rendering failures.
//!
//! Every failure in the request pipeline ends up as an [`AppError`]. Errors built
//! through the status constructors (`bad_request`, `unauthorized`, ...) are
//! *operational*: their message is meant for the client. Anything converted with `?`
//! from a library error is *non-operational* and is concealed in terse mode unless it
//! matches one of the recognised low-level failures:
//!
//! | Failure | Terse rendering |
//! |---------|-----------------|
//! | unique constraint | 400 `Duplicate entry: ...` |
//! | SQL syntax | 400 `SQL syntax error: ...` |
//! | foreign key | 400 `Foreign key constraint failed: ...` |
//! | expired token | 401 `Token has expired. Please login again!` |
//! | invalid token | 401 `Invalid token. Please login again!` |
//!
//! `AppError` renders a terse body on its own and attaches an [`ErrorReport`] to the
//! response so a terminal middleware can re-render it in the configured
//! [`ErrorMode`].

use std::sync::Arc;

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error as ThisError;

/// PostgreSQL SQLSTATE for `syntax_error`.
const SQL_SYNTAX_ERROR: &str = "42601";

const GENERIC_MESSAGE: &str = "Something went wrong! Please try again later.";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub operational: bool,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            operational: true,
        }
    }

    /// A failure the client should not see the details of.
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: err.into(),
            operational: false,
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow!(message.into()))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message.into()))
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, anyhow!(message.into()))
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// Returns the typed token failure carried by this error, if any.
    pub fn token_error(&self) -> Option<&TokenError> {
        self.error.downcast_ref::<TokenError>()
    }

    /// Translates a recognised low-level failure into the operational error a
    /// client is allowed to see. Operational errors are never re-mapped.
    pub fn reclassify(&self) -> Option<AppError> {
        if self.operational {
            return None;
        }

        if let Some(violation) = self.error.downcast_ref::<StoreViolation>() {
            return Some(violation.to_operational());
        }

        if let Some(violation) = self
            .error
            .downcast_ref::<sqlx::Error>()
            .and_then(StoreViolation::from_sqlx)
        {
            return Some(violation.to_operational());
        }

        match self.token_error() {
            Some(TokenError::Expired) => Some(AppError::unauthorized(
                "Token has expired. Please login again!",
            )),
            Some(TokenError::Invalid(_)) => {
                Some(AppError::unauthorized("Invalid token. Please login again!"))
            }
            _ => None,
        }
    }

    pub fn normalize(&self, mode: ErrorMode) -> NormalizedError {
        match mode {
            ErrorMode::Verbose => NormalizedError {
                status_code: self.status,
                message: self.message(),
                is_operational: self.operational,
                stack: Some(format!("{:?}", self.error)),
                detail: Some(format!("{:#}", self.error)),
            },
            ErrorMode::Terse => {
                let reclassified = self.reclassify();
                let error = reclassified.as_ref().unwrap_or(self);

                if error.operational {
                    NormalizedError::terse(error.status, error.message(), true)
                } else {
                    NormalizedError::terse(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        GENERIC_MESSAGE.to_string(),
                        false,
                    )
                }
            }
        }
    }

    pub fn render(&self, mode: ErrorMode) -> Response {
        self.normalize(mode).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if !self.operational {
            tracing::error!(status = %self.status, error = ?self.error, "Unhandled application error");
        }

        let report = ErrorReport(Arc::new(self));
        let mut response = report.render(ErrorMode::Terse);
        response.extensions_mut().insert(report);
        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

/// How much of a failure is shown to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Message, stack and the full error chain, no re-mapping.
    Verbose,
    /// Status and message of operational errors only.
    #[default]
    Terse,
}

/// Handle to the error behind an error response, stored in the response extensions.
#[derive(Debug, Clone)]
pub struct ErrorReport(Arc<AppError>);

impl ErrorReport {
    pub fn error(&self) -> &AppError {
        &self.0
    }

    pub fn render(&self, mode: ErrorMode) -> Response {
        self.0.render(mode)
    }
}

/// The single shape every failure takes before it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    pub status_code: StatusCode,
    pub message: String,
    pub is_operational: bool,
    pub stack: Option<String>,
    pub detail: Option<String>,
}

impl NormalizedError {
    fn terse(status_code: StatusCode, message: String, is_operational: bool) -> Self {
        Self {
            status_code,
            message,
            is_operational,
            stack: None,
            detail: None,
        }
    }

    /// `"fail"` for client errors, `"error"` for everything else.
    pub fn status(&self) -> &'static str {
        if self.status_code.is_client_error() {
            "fail"
        } else {
            "error"
        }
    }

    pub fn body(&self) -> Value {
        let mut body = json!({
            "statusCode": self.status_code.as_u16(),
            "status": self.status(),
            "message": self.message,
        });

        if let (Some(stack), Value::Object(fields)) = (&self.stack, &mut body) {
            fields.insert("isOperational".into(), Value::Bool(self.is_operational));
            fields.insert("stack".into(), Value::String(stack.clone()));
            fields.insert(
                "error".into(),
                Value::String(self.detail.clone().unwrap_or_default()),
            );
        }

        body
    }
}

impl IntoResponse for NormalizedError {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.body())).into_response()
    }
}

/// Token codec failures. Expiry is reported separately from every other defect.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("token secret is not configured")]
    MissingSecret,
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Constraint failures reported by the credential store, independent of the backend.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum StoreViolation {
    #[error("duplicate entry: {0}")]
    Duplicate(String),
    #[error("foreign key constraint failed: {0}")]
    ForeignKey(String),
    #[error("SQL syntax error: {0}")]
    Syntax(String),
}

impl StoreViolation {
    pub fn from_sqlx(err: &sqlx::Error) -> Option<Self> {
        let sqlx::Error::Database(db_err) = err else {
            return None;
        };
        let detail = db_err.message().to_string();

        if db_err.is_unique_violation() {
            Some(Self::Duplicate(detail))
        } else if db_err.is_foreign_key_violation() {
            Some(Self::ForeignKey(detail))
        } else if db_err.code().as_deref() == Some(SQL_SYNTAX_ERROR) {
            Some(Self::Syntax(detail))
        } else {
            None
        }
    }

    fn to_operational(&self) -> AppError {
        match self {
            Self::Duplicate(detail) => AppError::bad_request(anyhow!("Duplicate entry: {detail}")),
            Self::ForeignKey(detail) => {
                AppError::bad_request(anyhow!("Foreign key constraint failed: {detail}"))
            }
            Self::Syntax(detail) => AppError::bad_request(anyhow!("SQL syntax error: {detail}")),
        }
    }
}
