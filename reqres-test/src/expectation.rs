use reqres_client::models::Page;
use reqres_client::ApiResponse;
use serde_json::Value;

use crate::fixtures::JSON_CONTENT_TYPE;
use crate::matchers::{deep_equal, deep_include, first_difference, Pattern};
use crate::path::resolve_path;

/// Which check of an [`Expectation`] a [`Mismatch`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Status,
    ContentType,
    ContentLength,
    Body,
    Field(String),
    Pagination,
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Check::Status => f.write_str("status"),
            Check::ContentType => f.write_str("content-type"),
            Check::ContentLength => f.write_str("content-length"),
            Check::Body => f.write_str("body"),
            Check::Field(path) => write!(f, "field `{path}`"),
            Check::Pagination => f.write_str("pagination"),
        }
    }
}

/// One failed check, with both sides rendered for the report.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub check: Check,
    pub expected: String,
    pub actual: String,
    /// Where the documents diverge, for body checks.
    pub detail: Option<String>,
}

impl Mismatch {
    fn new(check: Check, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            check,
            expected: expected.into(),
            actual: actual.into(),
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} mismatch\n  Expected: {}\n  Actual:   {}",
            self.check, self.expected, self.actual
        )?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  First difference {detail}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderExpectation {
    /// `content-type: application/json; charset=utf-8`
    JsonContentType,
    /// `content-length: 0`
    NoContent,
    Unchecked,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyExpectation {
    /// The body deep-equals the value.
    Equal(Value),
    /// The body deep-includes the value.
    Includes(Value),
    /// The body is exactly `{}`.
    EmptyObject,
    /// No body bytes at all.
    Empty,
    Unchecked,
}

/// A pattern constraint on a string field of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPattern {
    pub path: String,
    pub pattern: Pattern,
}

/// What a contract case expects back.
///
/// Checks run in a fixed order: status, headers, body, field patterns,
/// pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
    pub status: u16,
    pub headers: HeaderExpectation,
    pub body: BodyExpectation,
    pub patterns: Vec<FieldPattern>,
    pub pagination: bool,
}

impl Expectation {
    /// Expect `status` with a JSON content type; body unchecked until set.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: HeaderExpectation::JsonContentType,
            body: BodyExpectation::Unchecked,
            patterns: Vec::new(),
            pagination: false,
        }
    }

    pub fn equals(mut self, body: Value) -> Self {
        self.body = BodyExpectation::Equal(body);
        self
    }

    pub fn includes(mut self, body: Value) -> Self {
        self.body = BodyExpectation::Includes(body);
        self
    }

    pub fn empty_object(mut self) -> Self {
        self.body = BodyExpectation::EmptyObject;
        self
    }

    /// `content-length: 0` and no body.
    pub fn no_content(mut self) -> Self {
        self.headers = HeaderExpectation::NoContent;
        self.body = BodyExpectation::Empty;
        self
    }

    pub fn headers(mut self, headers: HeaderExpectation) -> Self {
        self.headers = headers;
        self
    }

    /// Require the string at `path` to match `pattern`.
    pub fn matching(mut self, path: &str, pattern: Pattern) -> Self {
        self.patterns.push(FieldPattern {
            path: path.to_string(),
            pattern,
        });
        self
    }

    /// Also check the pagination envelope invariants.
    pub fn paginated(mut self) -> Self {
        self.pagination = true;
        self
    }
}

/// Run every check of `expectation` against `response`, in order, and
/// collect all mismatches.
pub fn verify<T>(
    expectation: &Expectation,
    response: &ApiResponse<T>,
) -> Result<(), Vec<Mismatch>> {
    let mut mismatches = Vec::new();

    mismatches.extend(check_status(expectation.status, response).err());
    mismatches.extend(check_headers(expectation.headers, response).err());
    mismatches.extend(check_body(&expectation.body, response).err());

    let needs_json = !expectation.patterns.is_empty() || expectation.pagination;
    if needs_json {
        match response.json() {
            Ok(body) => {
                for field in &expectation.patterns {
                    mismatches.extend(check_pattern(&body, &field.path, field.pattern).err());
                }
                if expectation.pagination {
                    mismatches.extend(check_pagination(&body).err());
                }
            }
            // Already reported by the body check when one is configured.
            Err(e) if matches!(expectation.body, BodyExpectation::Unchecked) => {
                mismatches.push(Mismatch::new(Check::Body, "a JSON body", e.to_string()));
            }
            Err(_) => {}
        }
    }

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(mismatches)
    }
}

pub fn check_status<T>(expected: u16, response: &ApiResponse<T>) -> Result<(), Mismatch> {
    let actual = response.status_code();
    if actual == expected {
        Ok(())
    } else {
        Err(Mismatch::new(Check::Status, expected.to_string(), actual.to_string())
            .with_detail(format!("with body {}", response.text())))
    }
}

pub fn check_headers<T>(
    expected: HeaderExpectation,
    response: &ApiResponse<T>,
) -> Result<(), Mismatch> {
    let render = |v: Option<&str>| v.map_or_else(|| "<absent>".to_string(), |v| format!("\"{v}\""));
    match expected {
        HeaderExpectation::JsonContentType => {
            let actual = response.content_type();
            if actual == Some(JSON_CONTENT_TYPE) {
                Ok(())
            } else {
                let expected = format!("\"{JSON_CONTENT_TYPE}\"");
                Err(Mismatch::new(Check::ContentType, expected, render(actual)))
            }
        }
        HeaderExpectation::NoContent => {
            let actual = response.content_length();
            if actual.as_deref() == Some("0") {
                Ok(())
            } else {
                Err(Mismatch::new(Check::ContentLength, "\"0\"", render(actual.as_deref())))
            }
        }
        HeaderExpectation::Unchecked => Ok(()),
    }
}

pub fn check_body<T>(
    expected: &BodyExpectation,
    response: &ApiResponse<T>,
) -> Result<(), Mismatch> {
    let actual = match expected {
        BodyExpectation::Unchecked => return Ok(()),
        BodyExpectation::Empty => {
            return if response.is_empty() {
                Ok(())
            } else {
                Err(Mismatch::new(Check::Body, "<empty>", response.text()))
            };
        }
        _ => response
            .json()
            .map_err(|e| Mismatch::new(Check::Body, "a JSON body", e.to_string()))?,
    };

    let (wanted, subset) = match expected {
        BodyExpectation::Equal(v) => (v.clone(), false),
        BodyExpectation::Includes(v) => (v.clone(), true),
        _ => (Value::Object(Default::default()), false),
    };
    let ok = if subset {
        deep_include(&wanted, &actual)
    } else {
        deep_equal(&wanted, &actual)
    };
    if ok {
        return Ok(());
    }

    let label = if subset { "including " } else { "" };
    let mismatch = Mismatch::new(Check::Body, format!("{label}{wanted}"), actual.to_string());
    Err(match first_difference(&wanted, &actual, subset) {
        Some(diff) => mismatch.with_detail(diff.to_string()),
        None => mismatch,
    })
}

pub fn check_pattern(body: &Value, path: &str, pattern: Pattern) -> Result<(), Mismatch> {
    let check = Check::Field(path.to_string());
    let expected = || format!("a string matching {pattern}");
    let value = resolve_path(body, path)
        .map_err(|e| Mismatch::new(check.clone(), expected(), e.to_string()))?;
    match value.as_str() {
        Some(text) if pattern.is_match(text) => Ok(()),
        _ => Err(Mismatch::new(check, expected(), value.to_string())),
    }
}

/// Pagination envelope invariants:
/// `total_pages == ceil(total / per_page)`, and a full page of `per_page`
/// entries on every page before the last (never more than `per_page`).
pub fn check_pagination(body: &Value) -> Result<(), Mismatch> {
    let page: Page<Value> = serde_json::from_value(body.clone()).map_err(|e| {
        Mismatch::new(Check::Pagination, "a pagination envelope", format!("{e}: {body}"))
    })?;

    let expected_pages = page.expected_total_pages();
    if page.total_pages != expected_pages {
        return Err(Mismatch::new(
            Check::Pagination,
            format!("total_pages = ceil({} / {}) = {expected_pages}", page.total, page.per_page),
            format!("total_pages = {}", page.total_pages),
        ));
    }

    let len = page.data.len() as u64;
    if page.page < page.total_pages && len != page.per_page {
        return Err(Mismatch::new(
            Check::Pagination,
            format!("{} entries on page {} of {}", page.per_page, page.page, page.total_pages),
            format!("{len} entries"),
        ));
    }
    if len > page.per_page {
        return Err(Mismatch::new(
            Check::Pagination,
            format!("at most {} entries", page.per_page),
            format!("{len} entries"),
        ));
    }
    Ok(())
}
