use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::env;
use std::fmt;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code == 102
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        network_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        malformed_response_error(err.to_string())
    }
}

impl From<geozero::error::GeozeroError> for Error {
    fn from(err: geozero::error::GeozeroError) -> Self {
        Error::new(5, format!("geometry encoding failed: {}", err))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error::new(1, "environment variable error")
}

pub fn network_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        return Error::new(3, "request timed out");
    }

    Error::new(3, format!("network error: {}", err))
}

pub fn upstream_error() -> Error {
    Error::new(4, "upstream error")
}

pub fn unexpected_error() -> Error {
    Error::new(5, "unexpected error")
}

pub fn invalid_input_error() -> Error {
    Error::new(100, "invalid input")
}

pub fn extraction_empty_error() -> Error {
    Error::new(101, "no address found")
}

pub fn not_found_error(what: &str) -> Error {
    Error::new(102, format!("no result for {}", what))
}

pub fn malformed_response_error(detail: impl Into<String>) -> Error {
    Error::new(103, format!("malformed response: {}", detail.into()))
}

pub fn routing_unsuccessful_error(detail: impl Into<String>) -> Error {
    Error::new(104, detail)
}

#[test]
fn client_errors_keep_their_message() {
    let err = not_found_error("北京天安门");

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "no result for 北京天安门");
    assert_eq!(routing_unsuccessful_error("no transit route found").code, 104);
}
