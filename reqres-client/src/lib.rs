//! Typed client for the ReqRes demo REST API.
//!
//! ```rust,ignore
//! use reqres_client::{ClientConfig, ReqResClient};
//!
//! let client = ReqResClient::new(ClientConfig::default())?;
//! let response = client.get_user(2).await?;
//! assert_eq!(response.status, 200);
//! let janet = response.data()?.data;
//! ```
//!
//! Every operation returns an [`ApiResponse`] for any status accepted by the
//! configured [`StatusPolicy`](reqres_core::StatusPolicy), including 4xx. Only
//! transport failures and statuses above the policy limit become a
//! [`ClientError`].

mod client;
pub mod config;
pub mod error;
pub mod models;
mod response;

pub use client::{ReqResClient, COLORS_PATH, LOGIN_PATH, REGISTER_PATH, USERS_PATH};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, FaultCategory};
pub use response::ApiResponse;
