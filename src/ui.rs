//! Terminal rendering of the login page: a heading and a login button.

use std::fmt;
use std::sync::Arc;

use crate::auth::domain::{Credentials, LoginOutcome};
use crate::auth::handler::LoginRequestHandler;
use crate::auth::ports::{AuthenticationPort, Notifier};

pub const LOGIN_BUTTON_LABEL: &str = "Login";

pub struct LoginPage<P: AuthenticationPort, N: Notifier> {
    title: String,
    handler: Arc<LoginRequestHandler<P, N>>,
}

impl<P: AuthenticationPort, N: Notifier> LoginPage<P, N> {
    pub fn new(title: impl Into<String>, handler: Arc<LoginRequestHandler<P, N>>) -> Self {
        Self {
            title: title.into(),
            handler,
        }
    }

    pub fn handler(&self) -> &Arc<LoginRequestHandler<P, N>> {
        &self.handler
    }

    /// The button's action. The caller supplies the form values.
    pub async fn press_login(&self, credentials: Credentials) -> LoginOutcome {
        self.handler.handle(credentials).await
    }
}

impl<P: AuthenticationPort, N: Notifier> fmt::Display for LoginPage<P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        write!(f, "[ {} ]", LOGIN_BUTTON_LABEL)
    }
}
