use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when a failure carries no usable `detail`.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Identifier/secret pair sent to `/auth/login`.
#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct Credentials {
    #[serde(rename = "username")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Body of a 2xx reply from `/auth/login`.
///
/// Token-issuing services answer with `access_token`/`token_type`; session
/// style backends answer with `message`/`user_id`. Any 2xx is a success, so
/// every field is optional.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct LoginResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub message: Option<String>,
    pub user_id: Option<i64>,
}

impl LoginResponse {
    pub fn token(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            token_type: Some(token_type.into()),
            ..Self::default()
        }
    }
}

#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct RegisterResponse {
    pub message: Option<String>,
    pub user_id: Option<i64>,
}

impl RegisterResponse {
    pub fn summary(&self) -> String {
        let message = self.message.as_deref().unwrap_or("Registration successful!");
        match self.user_id {
            Some(id) => format!("{} (user id {})", message, id),
            None => message.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        detail: Option<serde_json::Value>,
    },

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl AuthError {
    /// Text shown to the user when `action` fails with this error.
    ///
    /// Only a rejection with a `detail` field is surfaced; the detail is
    /// rendered as compact JSON so a string detail keeps its quotes.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            AuthError::Rejected {
                detail: Some(detail),
                ..
            } => format!("{} failed: {}", action, detail),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Result of one login invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Succeeded(LoginResponse),
    Failed { reason: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Succeeded(_))
    }

    pub fn message(&self) -> String {
        match self {
            LoginOutcome::Succeeded(response) => success_message(response),
            LoginOutcome::Failed { reason } => reason.clone(),
        }
    }
}

fn success_message(response: &LoginResponse) -> String {
    match (&response.access_token, &response.token_type, &response.message) {
        (Some(token), Some(kind), _) => {
            format!("Login successful! Access token: {} ({})", token, kind)
        }
        (Some(token), None, _) => format!("Login successful! Access token: {}", token),
        (None, _, Some(message)) => match response.user_id {
            Some(id) => format!("{} (user id {})", message, id),
            None => message.clone(),
        },
        (None, _, None) => "Login successful!".to_string(),
    }
}

impl From<AuthResult<LoginResponse>> for LoginOutcome {
    fn from(result: AuthResult<LoginResponse>) -> Self {
        match result {
            Ok(token) => LoginOutcome::Succeeded(token),
            Err(err) => LoginOutcome::Failed {
                reason: err.user_message("Login"),
            },
        }
    }
}
