//! Error replies and rejection recovery
//!
//! Every failure leaves the server as `{ "error": kind, "message": text }`
//! with the status code of its kind.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

use crate::error::KeygateError;

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

fn json_error(status: StatusCode, kind: &str, message: &str) -> Response {
    let body = ErrorBody {
        error: kind.to_string(),
        message: message.to_string(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

/// Render a crate error without leaking internal detail
pub fn error_response(err: &KeygateError) -> Response {
    json_error(err.status_code(), err.kind(), err.public_message())
}

/// Turn any rejection into a JSON error reply
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    if let Some(e) = err.find::<KeygateError>() {
        return Ok(error_response(e));
    }

    let response = if err.is_not_found() {
        json_error(StatusCode::NOT_FOUND, "not_found", "Route not found")
    } else if err.find::<warp::reject::InvalidHeader>().is_some() {
        error_response(&KeygateError::Unauthorized)
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        json_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            "Request body is too large",
        )
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        json_error(
            StatusCode::LENGTH_REQUIRED,
            "length_required",
            "Content-Length header is required",
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        json_error(
            StatusCode::METHOD_NOT_ALLOWED,
            "method_not_allowed",
            "Method not allowed",
        )
    } else {
        log::error!("Unhandled rejection: {:?}", err);
        json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error",
        )
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_custom_rejection_maps_to_status() {
        let response = handle_rejection(warp::reject::custom(KeygateError::Unauthorized))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_not_found() {
        let response = handle_rejection(warp::reject::not_found()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_signing_error_body_is_generic() {
        let response = error_response(&KeygateError::InternalSigningError(
            "InvalidKeyFormat".into(),
        ));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
