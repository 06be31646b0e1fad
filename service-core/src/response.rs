//! The single JSON writer every handler and error path goes through.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use serde::{Deserialize, Serialize};

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Build a JSON response with the given status code.
///
/// The status is decided before serialization. If the payload cannot be
/// serialized the failure is logged and the response goes out with that
/// status and an empty body.
pub fn write_json<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> Response {
    let body = match serde_json::to_vec(payload) {
        Ok(bytes) => Body::from(bytes),
        Err(e) => {
            tracing::error!(error = %e, status = %status, "Failed to write JSON response");
            Body::empty()
        }
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

/// Shorthand for `write_json(status, &ErrorBody { error })`.
pub fn error_json(status: StatusCode, message: impl Into<String>) -> Response {
    write_json(
        status,
        &ErrorBody {
            error: message.into(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde::Serializer;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn writes_status_content_type_and_payload() {
        let response = write_json(StatusCode::CREATED, &serde_json::json!({"answer": "42"}));

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["answer"], "42");
    }

    #[tokio::test]
    async fn error_json_wraps_message() {
        let response = error_json(StatusCode::BAD_REQUEST, "nope");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorBody = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body.error, "nope");
    }

    #[tokio::test]
    async fn serialization_failure_keeps_status() {
        let response = write_json(StatusCode::OK, &Unserializable);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(body_bytes(response).await.is_empty());
    }
}
