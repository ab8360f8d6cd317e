use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

/// Body of `POST /users`, `PUT /users/{id}` and `PATCH /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrUpdateUserRequest {
    pub name: String,
    pub job: String,
}

impl CreateOrUpdateUserRequest {
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
        }
    }
}

/// Echo of a created user. `id` is a numeric string generated by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub name: String,
    pub job: String,
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    pub name: String,
    pub job: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_use_camel_case_on_the_wire() {
        let body = r#"{
            "name": "morpheus",
            "job": "leader",
            "id": "512",
            "createdAt": "2024-01-01T00:00:00.000Z"
        }"#;
        let created: CreateUserResponse = serde_json::from_str(body).unwrap();
        assert_eq!(created.id, "512");
        assert_eq!(created.created_at, "2024-01-01T00:00:00.000Z");

        let json = serde_json::to_value(UpdateUserResponse {
            name: "morpheus".into(),
            job: "zion resident".into(),
            updated_at: "2024-01-01T00:00:00.000Z".into(),
        })
        .unwrap();
        assert!(json.get("updatedAt").is_some());
    }
}
