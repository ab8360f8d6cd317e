use reqres_client::ApiResponse;
use serde_json::Value;

use crate::expectation::{
    check_body, check_headers, verify, BodyExpectation, Expectation, HeaderExpectation,
};
use crate::matchers::Pattern;
use crate::path::resolve_path;

/// Panicking fluent assertions for hand-written tests.
///
/// ```ignore
/// client.get_user(2).await?
///     .assert_ok()
///     .assert_json_content_type()
///     .assert_json_path("data.first_name", "Janet")
///     .assert_json_path("data.len()", 5);
/// ```
pub trait ResponseAssertions {
    // ── Status ──

    /// Assert the response has a specific status code.
    fn assert_status(&self, expected: u16) -> &Self;

    /// Assert status is 200 OK.
    fn assert_ok(&self) -> &Self {
        self.assert_status(200)
    }

    /// Assert status is 201 Created.
    fn assert_created(&self) -> &Self {
        self.assert_status(201)
    }

    /// Assert status is 204 No Content.
    fn assert_no_content_status(&self) -> &Self {
        self.assert_status(204)
    }

    /// Assert status is 400 Bad Request.
    fn assert_bad_request(&self) -> &Self {
        self.assert_status(400)
    }

    /// Assert status is 404 Not Found.
    fn assert_not_found(&self) -> &Self {
        self.assert_status(404)
    }

    // ── Headers ──

    /// `content-type: application/json; charset=utf-8`
    fn assert_json_content_type(&self) -> &Self;

    /// `content-length: 0` and nothing in the body.
    fn assert_no_content(&self) -> &Self;

    // ── Body ──

    fn assert_json_eq(&self, expected: Value) -> &Self;

    fn assert_json_includes(&self, expected: Value) -> &Self;

    /// Body is exactly `{}`.
    fn assert_empty_object(&self) -> &Self;

    /// Assert that a JSON path resolves to the expected value.
    /// Supports dot-separated fields, array indices and `len()`/`size()`.
    fn assert_json_path(&self, path: &str, expected: impl Into<Value>) -> &Self;

    fn assert_json_path_matches(&self, path: &str, pattern: Pattern) -> &Self;

    /// Run a whole [`Expectation`] and panic with every mismatch.
    fn assert_expectation(&self, expectation: &Expectation) -> &Self;
}

fn body_json<T>(response: &ApiResponse<T>) -> Value {
    response
        .json()
        .unwrap_or_else(|e| panic!("Failed to parse JSON: {e}\nBody: {}", response.text()))
}

fn resolve<T>(response: &ApiResponse<T>, path: &str) -> (Value, Value) {
    let root = body_json(response);
    let actual = resolve_path(&root, path).unwrap_or_else(|e| panic!("{e}"));
    (root, actual)
}

impl<T> ResponseAssertions for ApiResponse<T> {
    fn assert_status(&self, expected: u16) -> &Self {
        assert_eq!(
            self.status_code(),
            expected,
            "Expected {expected}, got {}\nBody: {}",
            self.status,
            self.text()
        );
        self
    }

    fn assert_json_content_type(&self) -> &Self {
        if let Err(m) = check_headers(HeaderExpectation::JsonContentType, self) {
            panic!("{m}");
        }
        self
    }

    fn assert_no_content(&self) -> &Self {
        if let Err(m) = check_headers(HeaderExpectation::NoContent, self) {
            panic!("{m}");
        }
        if let Err(m) = check_body(&BodyExpectation::Empty, self) {
            panic!("{m}");
        }
        self
    }

    fn assert_json_eq(&self, expected: Value) -> &Self {
        if let Err(m) = check_body(&BodyExpectation::Equal(expected), self) {
            panic!("{m}");
        }
        self
    }

    fn assert_json_includes(&self, expected: Value) -> &Self {
        if let Err(m) = check_body(&BodyExpectation::Includes(expected), self) {
            panic!("{m}");
        }
        self
    }

    fn assert_empty_object(&self) -> &Self {
        if let Err(m) = check_body(&BodyExpectation::EmptyObject, self) {
            panic!("{m}");
        }
        self
    }

    fn assert_json_path(&self, path: &str, expected: impl Into<Value>) -> &Self {
        let (root, actual) = resolve(self, path);
        let expected = expected.into();
        assert_eq!(
            actual, expected,
            "JSON path \"{path}\" assertion failed\n  \
             Expected: {expected}\n  Actual:   {actual}\n  Body: {root}",
        );
        self
    }

    fn assert_json_path_matches(&self, path: &str, pattern: Pattern) -> &Self {
        let (root, actual) = resolve(self, path);
        assert!(
            actual.as_str().is_some_and(|s| pattern.is_match(s)),
            "JSON path \"{path}\" does not match {pattern}\n  Value: {actual}\n  Body: {root}",
        );
        self
    }

    fn assert_expectation(&self, expectation: &Expectation) -> &Self {
        if let Err(mismatches) = verify(expectation, self) {
            let report: Vec<String> = mismatches.iter().map(ToString::to_string).collect();
            panic!("{}", report.join("\n"));
        }
        self
    }
}
