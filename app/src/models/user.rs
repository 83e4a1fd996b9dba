use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /users`
///
/// Missing fields default to empty/zero so that an incomplete body is
/// reported as missing fields, not as malformed JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl CreateUserRequest {
    /// Name and email are both required
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }
}

/// Body of `PUT /users/{id}`
///
/// Empty strings and non-positive ages count as "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
}

impl UpdateUserRequest {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }

    pub fn age(&self) -> Option<i64> {
        self.age.filter(|age| *age > 0)
    }
}

/// Aggregates computed by the store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserSummary {
    pub total_users: usize,
    /// Mean age, 0 when there are no users
    pub average_age: f64,
}

/// Payload of `GET /stats`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub total_users: usize,
    pub average_age: f64,
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    pub server_time: String,
}

impl UserStats {
    pub fn new(summary: UserSummary, server_time: String) -> Self {
        Self {
            total_users: summary.total_users,
            average_age: summary.average_age,
            server_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_missing_fields() {
        let input: CreateUserRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(input.name, "");
        assert_eq!(input.age, 0);
        assert!(!input.is_complete());
    }

    #[test]
    fn test_update_request_ignores_empty_and_non_positive() {
        let input: UpdateUserRequest =
            serde_json::from_str(r#"{"name":"","email":"new@x.com","age":0}"#).unwrap();
        assert_eq!(input.name(), None);
        assert_eq!(input.email(), Some("new@x.com"));
        assert_eq!(input.age(), None);

        let input: UpdateUserRequest = serde_json::from_str(r#"{"age":-4}"#).unwrap();
        assert_eq!(input.age(), None);
    }

    #[test]
    fn test_user_serializes_rfc3339_timestamp() {
        let user = User {
            id: 1,
            name: "Nguyen Van Thao".to_string(),
            email: "thao@example.com".to_string(),
            age: 25,
            created_at: DateTime::parse_from_rfc3339("2024-05-01T08:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["created_at"], "2024-05-01T08:30:00Z");
        assert_eq!(json["age"], 25);
    }
}
