use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::{Debug, Display};

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_internal(&self) -> bool {
        matches!(self.code, 1..=99)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            _ if self.is_internal() => {
                tracing::error!(code = self.code, "{}", self.message);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            101 => (StatusCode::METHOD_NOT_ALLOWED, "Only POST allowed"),
            _ => (StatusCode::BAD_REQUEST, "Text is required"),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 100,
        message: "text is required".into(),
    }
}

pub fn invalid_method_error() -> Error {
    Error {
        code: 101,
        message: "only POST allowed".into(),
    }
}

pub fn config_error(var: &str, reason: impl Display) -> Error {
    Error {
        code: 1,
        message: format!("configuration error: {}: {}", var, reason),
    }
}

pub fn extraction_error<T: Debug>(err: T) -> Error {
    Error {
        code: 4,
        message: format!("extraction upstream error: {:?}", err),
    }
}

pub fn geocoding_error<T: Debug>(err: T) -> Error {
    Error {
        code: 5,
        message: format!("geocoding upstream error: {:?}", err),
    }
}

#[test]
fn internal_errors_hide_detail() {
    use tokio_test::block_on;

    let res = geocoding_error("REQUEST_DENIED").into_response();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = block_on(hyper::body::to_bytes(res.into_body())).unwrap();
    assert_eq!(&body[..], br#"{"error":"Internal Server Error"}"#);
}

#[test]
fn user_errors_map_to_status() {
    assert_eq!(
        invalid_method_error().into_response().status(),
        StatusCode::METHOD_NOT_ALLOWED
    );
    assert_eq!(
        invalid_input_error().into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert!(config_error("PORT", "invalid digit").is_internal());
    assert!(!invalid_input_error().is_internal());
}
