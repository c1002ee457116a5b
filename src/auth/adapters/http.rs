use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::auth::domain::{
    AuthError, AuthResult, Credentials, LoginResponse, RegisterResponse, Registration,
};
use crate::auth::ports::AuthenticationPort;
use crate::config::ApiConfig;

const LOGIN_PATH: &str = "auth/login";
const REGISTER_PATH: &str = "auth/register";

/// Talks JSON to the authentication service over HTTP.
pub struct HttpAuthClient {
    http_client: HttpClient,
    login_url: Url,
    register_url: Url,
}

impl HttpAuthClient {
    pub fn new(config: &ApiConfig) -> AuthResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| AuthError::ConfigError(e.to_string()))?;

        Self::with_client(http_client, &config.base_url)
    }

    pub fn with_client(http_client: HttpClient, base_url: &str) -> AuthResult<Self> {
        let base = parse_base_url(base_url)?;
        let login_url = base
            .join(LOGIN_PATH)
            .map_err(|e| AuthError::ConfigError(e.to_string()))?;
        let register_url = base
            .join(REGISTER_PATH)
            .map_err(|e| AuthError::ConfigError(e.to_string()))?;

        Ok(Self {
            http_client,
            login_url,
            register_url,
        })
    }

    pub fn login_url(&self) -> &Url {
        &self.login_url
    }

    async fn post_json<B, R>(&self, url: &Url, body: &B) -> AuthResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned + Default,
    {
        let response = self
            .http_client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                AuthError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(rejection(response).await);
        }

        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read response from {}: {}", url, e);
            AuthError::Transport(e.to_string())
        })?;

        Ok(decode_success(status.as_u16(), &body))
    }
}

fn parse_base_url(base_url: &str) -> AuthResult<Url> {
    // 末尾のスラッシュがないと join が最後のセグメントを置き換える
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };
    Url::parse(&normalized).map_err(|e| AuthError::ConfigError(e.to_string()))
}

async fn rejection(response: Response) -> AuthError {
    let status = response.status();
    warn!("Authentication service answered {}", status);

    let detail = match response.bytes().await {
        Ok(body) => extract_detail(&body),
        Err(e) => {
            debug!("Could not read failure body: {}", e);
            None
        }
    };

    AuthError::Rejected {
        status: status.as_u16(),
        detail,
    }
}

/// Decodes a 2xx body. The status alone decides success, so a body that
/// does not match `R` is logged and replaced by `R::default()`.
fn decode_success<R: DeserializeOwned + Default>(status: u16, body: &[u8]) -> R {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        warn!(
            "Unexpected body with status {} ({}): {}",
            status,
            e,
            String::from_utf8_lossy(body)
        );
        R::default()
    })
}

/// Pulls `detail` out of a JSON object body; anything else yields `None`.
fn extract_detail(body: &[u8]) -> Option<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value {
        serde_json::Value::Object(mut map) => map.remove("detail").filter(|d| !d.is_null()),
        _ => None,
    }
}

#[async_trait]
impl AuthenticationPort for HttpAuthClient {
    async fn login(&self, credentials: &Credentials) -> AuthResult<LoginResponse> {
        info!("Logging in as {}", credentials.identifier);
        self.post_json(&self.login_url, credentials).await
    }

    async fn register(&self, registration: &Registration) -> AuthResult<RegisterResponse> {
        info!("Registering {}", registration.username);
        self.post_json(&self.register_url, registration).await
    }
}
