//! User, channel and authentication payloads

use super::nullable;
use crate::shared::error::ClientError;
use serde::{Deserialize, Serialize};

/// The signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub avatar: String,
    #[serde(default, deserialize_with = "nullable")]
    pub cover_image: String,
}

/// Owner/author details embedded in videos, comments and notifications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    #[serde(default, deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub avatar: String,
}

/// A channel profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    #[serde(default, deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub avatar: String,
    #[serde(default, deserialize_with = "nullable")]
    pub cover_image: String,
    #[serde(default, deserialize_with = "nullable")]
    pub subscribers_count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub channels_subscribed_to_count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub is_subscribed: bool,
}

/// Login/refresh result; the backend sends the user, the tokens, or both
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAuth")]
pub struct AuthSession {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAuth {
    #[serde(rename_all = "camelCase")]
    WithUser {
        user: User,
        #[serde(default)]
        access_token: Option<String>,
        #[serde(default)]
        refresh_token: Option<String>,
    },
    Bare(User),
    #[serde(rename_all = "camelCase")]
    TokensOnly {
        access_token: String,
        #[serde(default)]
        refresh_token: Option<String>,
    },
}

impl From<RawAuth> for AuthSession {
    fn from(raw: RawAuth) -> Self {
        match raw {
            RawAuth::WithUser {
                user,
                access_token,
                refresh_token,
            } => Self {
                user: Some(user),
                access_token,
                refresh_token,
            },
            RawAuth::Bare(user) => Self {
                user: Some(user),
                access_token: None,
                refresh_token: None,
            },
            RawAuth::TokensOnly {
                access_token,
                refresh_token,
            } => Self {
                user: None,
                access_token: Some(access_token),
                refresh_token,
            },
        }
    }
}

/// Sign-in request; either identifier is accepted by the backend
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password: String,
}

impl Credentials {
    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            username: None,
            password: password.into(),
        }
    }

    pub fn with_username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: None,
            username: Some(username.into()),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let has_identifier = [&self.email, &self.username]
            .iter()
            .any(|value| value.as_deref().is_some_and(|v| !v.trim().is_empty()));
        if !has_identifier {
            return Err(ClientError::validation("email", "Email or username is required"));
        }
        if self.password.is_empty() {
            return Err(ClientError::validation("password", "Password is required"));
        }
        Ok(())
    }
}

/// Account registration request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), ClientError> {
        for (field, value) in [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("username", &self.username),
        ] {
            if value.trim().is_empty() {
                return Err(ClientError::validation(field, format!("{field} is required")));
            }
        }
        if !self.email.contains('@') {
            return Err(ClientError::validation("email", "Invalid email format"));
        }
        if self.password.len() < 6 {
            return Err(ClientError::validation(
                "password",
                "Password must be at least 6 characters",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_json() -> serde_json::Value {
        json!({ "_id": "u1", "username": "ferris", "email": "ferris@example.com", "avatar": null })
    }

    #[test]
    fn test_auth_with_tokens() {
        let session: AuthSession = serde_json::from_value(json!({
            "user": user_json(),
            "accessToken": "at",
            "refreshToken": "rt"
        }))
        .unwrap();
        assert_eq!(session.user.unwrap().username, "ferris");
        assert_eq!(session.access_token.as_deref(), Some("at"));
    }

    #[test]
    fn test_auth_bare_user() {
        let session: AuthSession = serde_json::from_value(user_json()).unwrap();
        assert_eq!(session.user.unwrap().id, "u1");
        assert!(session.access_token.is_none());
    }

    #[test]
    fn test_auth_tokens_only() {
        let session: AuthSession =
            serde_json::from_value(json!({ "accessToken": "new", "refreshToken": "r2" })).unwrap();
        assert!(session.user.is_none());
        assert_eq!(session.access_token.as_deref(), Some("new"));
    }

    #[test]
    fn test_channel_defaults() {
        let channel: Channel = serde_json::from_value(json!({ "_id": "u1", "username": "ferris" })).unwrap();
        assert_eq!(channel.subscribers_count, 0);
        assert!(!channel.is_subscribed);
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::with_email("a@b.c", "pw").validate().is_ok());
        assert!(Credentials::with_username(" ", "pw").validate().is_err());
        assert!(Credentials::with_email("a@b.c", "").validate().is_err());
    }

    #[test]
    fn test_credentials_skip_missing_identifier() {
        let value = serde_json::to_value(Credentials::with_username("ferris", "pw")).unwrap();
        assert!(value.get("email").is_none());
        assert_eq!(value["username"], "ferris");
    }

    #[test]
    fn test_registration_validation() {
        let mut registration = Registration {
            full_name: "Ferris Crab".into(),
            email: "ferris@example.com".into(),
            username: "ferris".into(),
            password: "secret1".into(),
        };
        assert!(registration.validate().is_ok());

        registration.email = "ferris".into();
        assert!(matches!(
            registration.validate(),
            Err(ClientError::Validation { ref field, .. }) if field == "email"
        ));
    }
}
