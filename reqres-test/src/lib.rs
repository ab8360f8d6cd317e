//! Contract verification for the ReqRes API.
//!
//! Every contract case lives in one table ([`scenario::catalogue`]): an
//! operation to invoke through [`ReqResClient`](reqres_client::ReqResClient)
//! and an [`Expectation`] about the response. The [`runner`] executes cases
//! independently and reports, per case, whether it passed, diverged from the
//! expectation, or hit a transport fault.
//!
//! ```rust,ignore
//! use reqres_test::{runner, scenario, stub::StubServer};
//!
//! let stub = StubServer::start().await?;
//! let client = ReqResClient::new(stub.client_config())?;
//! let report = runner::run_all(&client, scenario::catalogue()).await;
//! assert!(report.is_success(), "{report}");
//! ```

pub mod assertions;
pub mod expectation;
pub mod fixtures;
pub mod matchers;
pub mod path;
pub mod runner;
pub mod scenario;
pub mod stub;

pub use assertions::ResponseAssertions;
pub use expectation::{
    verify, BodyExpectation, Check, Expectation, FieldPattern, HeaderExpectation, Mismatch,
};
pub use matchers::{deep_equal, deep_include, first_difference, Difference, Pattern};
pub use path::{resolve_path, tokenize_path, PathError, PathToken};
pub use runner::{run, run_all, CaseReport, Outcome, SuiteReport};
pub use scenario::{catalogue, find, Operation, Scenario};
