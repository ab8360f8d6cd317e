//! The contract table: one row per case.

use reqres_client::models::{CreateOrUpdateUserRequest, RegisterOrLoginRequest};
use reqres_client::{ApiResponse, ClientError, ReqResClient};
use serde::Serialize;
use serde_json::{json, Value};

use crate::expectation::Expectation;
use crate::fixtures::{
    self, CREATE_JOB, CREATE_NAME, EVE_HOLT_EMAIL, EVE_HOLT_PASSWORD, LOGIN_MISSING_PASSWORD_EMAIL,
    MISSING_PASSWORD, NONEXISTENT_ID, REGISTERED_ID, REGISTER_MISSING_PASSWORD_EMAIL,
    TARGET_USER_ID, TOKEN, UPDATE_JOB,
};
use crate::matchers::Pattern;

/// A single client call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListUsers { page: u64 },
    GetUser { id: u64 },
    CreateUser(CreateOrUpdateUserRequest),
    UpdateUser { id: u64, body: CreateOrUpdateUserRequest },
    PatchUser { id: u64, body: CreateOrUpdateUserRequest },
    DeleteUser { id: u64 },
    ListColors,
    GetColor { id: u64 },
    Register(RegisterOrLoginRequest),
    Login(RegisterOrLoginRequest),
}

impl Operation {
    /// Invoke the operation, erasing the response type.
    pub async fn send(&self, client: &ReqResClient) -> Result<ApiResponse<Value>, ClientError> {
        Ok(match self {
            Operation::ListUsers { page } => client.list_users(*page).await?.cast(),
            Operation::GetUser { id } => client.get_user(*id).await?.cast(),
            Operation::CreateUser(body) => client.create_user(body).await?.cast(),
            Operation::UpdateUser { id, body } => client.update_user(*id, body).await?.cast(),
            Operation::PatchUser { id, body } => client.patch_user(*id, body).await?.cast(),
            Operation::DeleteUser { id } => client.delete_user(*id).await?.cast(),
            Operation::ListColors => client.list_colors().await?.cast(),
            Operation::GetColor { id } => client.get_color(*id).await?.cast(),
            Operation::Register(body) => client.register(body).await?.cast(),
            Operation::Login(body) => client.login(body).await?.cast(),
        })
    }

    /// `METHOD /path` as sent, for reports.
    pub fn describe(&self) -> String {
        match self {
            Operation::ListUsers { page } => format!("GET /users?page={page}"),
            Operation::GetUser { id } => format!("GET /users/{id}"),
            Operation::CreateUser(_) => "POST /users".to_string(),
            Operation::UpdateUser { id, .. } => format!("PUT /users/{id}"),
            Operation::PatchUser { id, .. } => format!("PATCH /users/{id}"),
            Operation::DeleteUser { id } => format!("DELETE /users/{id}"),
            Operation::ListColors => "GET /colors".to_string(),
            Operation::GetColor { id } => format!("GET /colors/{id}"),
            Operation::Register(_) => "POST /register".to_string(),
            Operation::Login(_) => "POST /login".to_string(),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A named contract case.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Stable identifier, used to select the case from generated tests.
    pub name: &'static str,
    pub title: &'static str,
    pub operation: Operation,
    pub expect: Expectation,
}

fn to_json<T: Serialize>(value: T) -> Value {
    serde_json::to_value(value).expect("fixture data serializes to JSON")
}

fn update_body() -> CreateOrUpdateUserRequest {
    CreateOrUpdateUserRequest::new(CREATE_NAME, UPDATE_JOB)
}

fn missing_password() -> Value {
    json!({ "error": MISSING_PASSWORD })
}

/// Every contract case, in report order.
pub fn catalogue() -> Vec<Scenario> {
    let create_body = CreateOrUpdateUserRequest::new(CREATE_NAME, CREATE_JOB);
    let eve_holt = RegisterOrLoginRequest::new(EVE_HOLT_EMAIL).with_password(EVE_HOLT_PASSWORD);

    vec![
        Scenario {
            name: "list_users",
            title: "GET /users returns page 2 of the user list",
            operation: Operation::ListUsers { page: 2 },
            expect: Expectation::status(200)
                .includes(to_json(fixtures::users_page_two()))
                .paginated(),
        },
        Scenario {
            name: "get_user",
            title: "GET /users/{id} returns an existing user",
            operation: Operation::GetUser { id: TARGET_USER_ID },
            expect: Expectation::status(200).includes(to_json(fixtures::janet_weaver())),
        },
        Scenario {
            name: "get_missing_user",
            title: "GET /users/{id} for an unknown user returns 404",
            operation: Operation::GetUser { id: NONEXISTENT_ID },
            expect: Expectation::status(404).empty_object(),
        },
        Scenario {
            name: "create_user",
            title: "POST /users echoes the user with a generated id",
            operation: Operation::CreateUser(create_body.clone()),
            expect: Expectation::status(201)
                .includes(to_json(&create_body))
                .matching("id", Pattern::ShortNumericId)
                .matching("createdAt", Pattern::IsoTimestampMillis),
        },
        Scenario {
            name: "update_user_put",
            title: "PUT /users/{id} echoes the replacement",
            operation: Operation::UpdateUser {
                id: TARGET_USER_ID,
                body: update_body(),
            },
            expect: Expectation::status(200)
                .includes(to_json(update_body()))
                .matching("updatedAt", Pattern::IsoTimestampMillis),
        },
        Scenario {
            name: "update_user_patch",
            title: "PATCH /users/{id} echoes the changes",
            operation: Operation::PatchUser {
                id: TARGET_USER_ID,
                body: update_body(),
            },
            expect: Expectation::status(200)
                .includes(to_json(update_body()))
                .matching("updatedAt", Pattern::IsoTimestampMillis),
        },
        Scenario {
            name: "delete_user",
            title: "DELETE /users/{id} answers 204 without content",
            operation: Operation::DeleteUser { id: TARGET_USER_ID },
            expect: Expectation::status(204).no_content(),
        },
        Scenario {
            name: "list_colors",
            title: "GET /colors returns the first page of colors",
            operation: Operation::ListColors,
            expect: Expectation::status(200)
                .includes(to_json(fixtures::colors_page_one()))
                .paginated(),
        },
        Scenario {
            name: "get_color",
            title: "GET /colors/{id} returns an existing color",
            operation: Operation::GetColor { id: 2 },
            expect: Expectation::status(200).includes(to_json(fixtures::fuchsia_rose())),
        },
        Scenario {
            name: "get_missing_color",
            title: "GET /colors/{id} for an unknown color returns 404",
            operation: Operation::GetColor { id: NONEXISTENT_ID },
            expect: Expectation::status(404).empty_object(),
        },
        Scenario {
            name: "register",
            title: "POST /register with valid credentials returns id and token",
            operation: Operation::Register(eve_holt.clone()),
            expect: Expectation::status(200).equals(json!({ "id": REGISTERED_ID, "token": TOKEN })),
        },
        Scenario {
            name: "register_missing_password",
            title: "POST /register without a password is rejected",
            operation: Operation::Register(RegisterOrLoginRequest::new(
                REGISTER_MISSING_PASSWORD_EMAIL,
            )),
            expect: Expectation::status(400).equals(missing_password()),
        },
        Scenario {
            name: "login",
            title: "POST /login with valid credentials returns a token",
            operation: Operation::Login(eve_holt),
            expect: Expectation::status(200).equals(json!({ "token": TOKEN })),
        },
        Scenario {
            name: "login_missing_password",
            title: "POST /login without a password is rejected",
            operation: Operation::Login(RegisterOrLoginRequest::new(LOGIN_MISSING_PASSWORD_EMAIL)),
            expect: Expectation::status(400).equals(missing_password()),
        },
    ]
}

/// Look a case up by name.
pub fn find(name: &str) -> Option<Scenario> {
    catalogue().into_iter().find(|s| s.name == name)
}
