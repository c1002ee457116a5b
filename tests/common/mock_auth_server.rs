use async_trait::async_trait;
use login_client::auth::domain::{
    AuthError, AuthResult, Credentials, LoginResponse, RegisterResponse, Registration,
};
use login_client::auth::ports::AuthenticationPort;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub struct MockAuthServer {
    login_response: RwLock<Option<AuthResult<LoginResponse>>>,
    register_response: RwLock<Option<AuthResult<RegisterResponse>>>,
    received_credentials: RwLock<Vec<Credentials>>,
    login_calls: AtomicUsize,
    delay: Option<Duration>,
}

impl MockAuthServer {
    pub fn new() -> Self {
        Self {
            login_response: RwLock::new(None),
            register_response: RwLock::new(None),
            received_credentials: RwLock::new(Vec::new()),
            login_calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Every login call sleeps for `delay` before answering.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub fn set_login_response(&self, response: AuthResult<LoginResponse>) {
        *self.login_response.write() = Some(response);
    }

    pub fn set_register_response(&self, response: AuthResult<RegisterResponse>) {
        *self.register_response.write() = Some(response);
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn received_credentials(&self) -> Vec<Credentials> {
        self.received_credentials.read().clone()
    }
}

#[async_trait]
impl AuthenticationPort for MockAuthServer {
    async fn login(&self, credentials: &Credentials) -> AuthResult<LoginResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.received_credentials.write().push(credentials.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.login_response
            .read()
            .clone()
            .unwrap_or_else(|| Err(AuthError::Transport("No mock response set".to_string())))
    }

    async fn register(&self, _registration: &Registration) -> AuthResult<RegisterResponse> {
        self.register_response
            .read()
            .clone()
            .unwrap_or_else(|| Err(AuthError::Transport("No mock response set".to_string())))
    }
}
