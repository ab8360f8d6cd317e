//! Shared runtime pieces for the ReqRes contract suite.
//!
//! - [`config`]: layered configuration (`reqres.yaml`, profile overrides,
//!   `.env` files, `REQRES_*` environment variables).
//! - [`status`]: the status classification applied by the HTTP client.
//! - [`layers`]: `tracing` subscriber setup for binaries and tests.

pub mod config;
pub mod layers;
pub mod status;

pub use config::{ConfigError, ConfigValue, FromConfigValue, ReqresConfig};
pub use layers::{init_test_tracing, init_tracing};
pub use status::StatusPolicy;
