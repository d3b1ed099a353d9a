use api_types::problem::{PROBLEM_CONTENT_TYPE, Problem};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
};
use engine::{ENTITY_NAME, EngineError};

pub use server::{ServerState, router, run_with_listener};

mod headers;
mod server;
mod transactions;
mod validation;

pub mod types {
    pub mod transaction {
        pub use api_types::transaction::{
            OrderLine, PaymentType, TransactionBody, TransactionPage, TransactionStatus,
            TransactionView,
        };
    }

    pub mod problem {
        pub use api_types::problem::Problem;
    }
}

const DEFAULT_PROBLEM_TYPE: &str = "about:blank";
const ERR_VALIDATION: &str = "error.validation";
const ERR_CONCURRENCY_FAILURE: &str = "error.concurrencyFailure";

pub enum ServerError {
    Engine(EngineError),
    /// Request rejected by the API layer before reaching the engine.
    BadRequest { key: &'static str, message: String },
    /// Body or query string could not be decoded.
    Generic(String),
}

impl ServerError {
    pub(crate) fn bad_request(key: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            key,
            message: message.into(),
        }
    }
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidTransaction { .. } | EngineError::RuleViolation { .. } => {
            StatusCode::BAD_REQUEST
        }
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Conflict(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_key(key: &str) -> String {
    if key.starts_with("error.") {
        key.to_string()
    } else {
        format!("error.{key}")
    }
}

fn title_for(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown Error")
        .to_string()
}

fn problem_for_engine_error(err: EngineError) -> Problem {
    let status = status_for_engine_error(&err);
    let entity_name = err.entity_name().map(ToString::to_string);
    let error_key = err.error_key();

    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            Problem {
                problem_type: DEFAULT_PROBLEM_TYPE.to_string(),
                title: title_for(status),
                status: status.as_u16(),
                detail: Some("internal server error".to_string()),
                message: format!("error.http.{}", status.as_u16()),
                entity_name: None,
                error_key: None,
            }
        }
        EngineError::Conflict(detail) => Problem {
            problem_type: DEFAULT_PROBLEM_TYPE.to_string(),
            title: title_for(status),
            status: status.as_u16(),
            detail: Some(detail),
            message: ERR_CONCURRENCY_FAILURE.to_string(),
            entity_name,
            error_key: error_key.map(ToString::to_string),
        },
        EngineError::KeyNotFound(_) => Problem {
            problem_type: DEFAULT_PROBLEM_TYPE.to_string(),
            title: title_for(status),
            status: status.as_u16(),
            detail: Some(err.to_string()),
            message: format!("error.http.{}", status.as_u16()),
            entity_name,
            error_key: error_key.map(ToString::to_string),
        },
        EngineError::InvalidTransaction { .. } | EngineError::RuleViolation { .. } => {
            let key = error_key.unwrap_or("error.validation");
            Problem {
                problem_type: DEFAULT_PROBLEM_TYPE.to_string(),
                title: err.to_string(),
                status: status.as_u16(),
                detail: Some(err.to_string()),
                message: message_key(key),
                entity_name,
                error_key: Some(key.to_string()),
            }
        }
    }
}

/// `X-Payments-Error` / `X-Payments-Params` for rejections with a key.
fn failure_alert(problem: &Problem) -> HeaderMap {
    let mut map = HeaderMap::new();
    if let (Some(key), Some(entity)) = (&problem.error_key, &problem.entity_name) {
        headers::insert(&mut map, &headers::ERROR_HEADER, &message_key(key));
        headers::insert(&mut map, &headers::PARAMS_HEADER, entity);
    }
    map
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let problem = match self {
            ServerError::Engine(err) => problem_for_engine_error(err),
            ServerError::BadRequest { key, message } => Problem {
                problem_type: DEFAULT_PROBLEM_TYPE.to_string(),
                title: message.clone(),
                status: StatusCode::BAD_REQUEST.as_u16(),
                detail: Some(message),
                message: message_key(key),
                entity_name: Some(ENTITY_NAME.to_string()),
                error_key: Some(key.to_string()),
            },
            ServerError::Generic(err) => Problem {
                problem_type: DEFAULT_PROBLEM_TYPE.to_string(),
                title: "Data binding and validation failure".to_string(),
                status: StatusCode::BAD_REQUEST.as_u16(),
                detail: Some(err),
                message: ERR_VALIDATION.to_string(),
                entity_name: None,
                error_key: None,
            },
        };

        let status =
            StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut map = failure_alert(&problem);
        headers::insert(&mut map, &CONTENT_TYPE, PROBLEM_CONTENT_TYPE);

        (status, map, Json(problem)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Generic(value.body_text())
    }
}
