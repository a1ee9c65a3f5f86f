use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use adscript_core::error::CoreError;
use adscript_pipeline::PipelineError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`PipelineError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `adscript_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure while running a generation or stage transition.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body was not acceptable JSON for the handler.
    #[error(transparent)]
    JsonBody(#[from] JsonRejection),

    /// A path parameter could not be parsed (e.g. a non-numeric id).
    #[error(transparent)]
    PathParams(#[from] PathRejection),

    /// The query string could not be parsed.
    #[error(transparent)]
    QueryParams(#[from] QueryRejection),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

struct ErrorBody {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<Value>,
}

impl ErrorBody {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }

    fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Pipeline(err) => classify_pipeline_error(err),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::JsonBody(rejection) => {
                ErrorBody::new(rejection.status(), "INVALID_BODY", rejection.body_text())
            }
            AppError::PathParams(rejection) => {
                ErrorBody::new(rejection.status(), "INVALID_PATH", rejection.body_text())
            }
            AppError::QueryParams(rejection) => {
                ErrorBody::new(rejection.status(), "INVALID_QUERY", rejection.body_text())
            }
            AppError::BadRequest(msg) => {
                ErrorBody::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ErrorBody::internal()
            }
        };

        let mut json = json!({
            "error": body.message,
            "code": body.code,
        });
        if let Some(details) = body.details {
            json["details"] = details;
        }

        (body.status, axum::Json(json)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> ErrorBody {
    match err {
        CoreError::NotFound { entity, id } => ErrorBody::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => {
            ErrorBody::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        CoreError::Conflict(msg) => ErrorBody::new(StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => {
            ErrorBody::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
        }
        CoreError::Forbidden(msg) => ErrorBody::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            ErrorBody::internal()
        }
    }
}

/// Map a pipeline failure onto the HTTP taxonomy.
///
/// Client-correctable problems (missing predecessor, missing key, unknown
/// model, illegal transition) are 400. Vendor failures are 500 with the
/// vendor status embedded in `details`.
fn classify_pipeline_error(err: &PipelineError) -> ErrorBody {
    match err {
        PipelineError::ProjectNotFound(id) => ErrorBody::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Project with id {id} not found"),
        ),
        PipelineError::MissingPrerequisite(missing) => ErrorBody::new(
            StatusCode::BAD_REQUEST,
            "MISSING_PREREQUISITE",
            missing.message(),
        )
        .with_details(json!({ "stage_type": missing.missing.as_str() })),
        PipelineError::MissingApiKey { provider } => ErrorBody::new(
            StatusCode::BAD_REQUEST,
            "MISSING_API_KEY",
            err.to_string(),
        )
        .with_details(json!({ "provider": provider.as_str() })),
        PipelineError::UnsupportedModel(msg) => {
            ErrorBody::new(StatusCode::BAD_REQUEST, "UNSUPPORTED_MODEL", msg.clone())
        }
        PipelineError::InvalidTransition(msg) => {
            ErrorBody::new(StatusCode::BAD_REQUEST, "INVALID_TRANSITION", msg.clone())
        }
        PipelineError::Provider(provider_err) => {
            tracing::error!(error = %provider_err, "Vendor call failed");
            ErrorBody::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROVIDER_ERROR",
                provider_err.to_string(),
            )
            .with_details(json!({
                "provider": provider_err.provider().as_str(),
                "status": provider_err.status(),
            }))
        }
        PipelineError::Database(db_err) => classify_sqlx_error(db_err),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorBody {
    match err {
        sqlx::Error::RowNotFound => {
            ErrorBody::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return ErrorBody::new(
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            ErrorBody::internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            ErrorBody::internal()
        }
    }
}
