use std::marker::PhantomData;

use bytes::Bytes;
use http::header::{HeaderName, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;
use crate::models::ErrorResponse;

/// A response accepted by the status policy.
///
/// `T` is the shape the calling operation expects on success. The body is
/// kept as raw bytes and decoded on demand, so a 404 or 400 answer to an
/// operation typed for success can still be inspected with [`json`](Self::json)
/// or [`error_body`](Self::error_body).
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    shape: PhantomData<fn() -> T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
            shape: PhantomData,
        }
    }

    /// Re-type the response without touching its content.
    pub fn cast<U>(self) -> ApiResponse<U> {
        ApiResponse::new(self.status, self.headers, self.body)
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        let name: HeaderName = name.as_ref().parse().ok()?;
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// The declared content length.
    ///
    /// HTTP forbids a `Content-Length` field on 1xx and 204 responses and
    /// some stacks strip it, so for those statuses a missing header is
    /// reported as the length of the body actually received.
    pub fn content_length(&self) -> Option<String> {
        if let Some(declared) = self.headers.get(CONTENT_LENGTH).and_then(|v| v.to_str().ok()) {
            return Some(declared.to_string());
        }
        if self.status.is_informational() || self.status == StatusCode::NO_CONTENT {
            return Some(self.body.len().to_string());
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The body as a (lossy) UTF-8 string.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The body as untyped JSON. An empty body reads as `null`.
    pub fn json(&self) -> Result<Value, ClientError> {
        if self.body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body).map_err(|e| self.decode_error("JSON", e))
    }

    /// Decode the body into an arbitrary shape. An empty body decodes as
    /// `null`, so `()` and `Option<_>` accept a 204.
    pub fn decode<U: DeserializeOwned>(&self) -> Result<U, ClientError> {
        let decoded = if self.body.is_empty() {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_slice(&self.body)
        };
        decoded.map_err(|e| self.decode_error(std::any::type_name::<U>(), e))
    }

    /// Decode the body as an `{ "error": ... }` payload.
    pub fn error_body(&self) -> Result<ErrorResponse, ClientError> {
        self.decode()
    }

    fn decode_error(&self, target: &str, err: serde_json::Error) -> ClientError {
        ClientError::Decode(format!(
            "status {} body is not a valid {target}: {err}; body: {}",
            self.status.as_u16(),
            crate::error::body_preview(&self.body)
        ))
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decode the body into the operation's success shape.
    pub fn data(&self) -> Result<T, ClientError> {
        self.decode()
    }
}

impl<T> std::fmt::Debug for ApiResponse<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &self.text())
            .finish()
    }
}

impl<T> Clone for ApiResponse<T> {
    fn clone(&self) -> Self {
        Self::new(self.status, self.headers.clone(), self.body.clone())
    }
}
