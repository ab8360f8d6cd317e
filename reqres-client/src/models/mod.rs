//! Request and response shapes of the ReqRes API.
//!
//! All response types ignore unknown fields, so extra blocks returned by the
//! live service (such as `support`) do not break decoding.

mod auth;
mod colors;
mod common;
mod users;

pub use auth::{LoginResponse, RegisterOrLoginRequest, RegisterResponse};
pub use colors::Color;
pub use common::{ErrorResponse, Page, Single};
pub use users::{CreateOrUpdateUserRequest, CreateUserResponse, UpdateUserResponse, User};
