//! Action handlers bound to the login page.
//!
//! Each invocation makes exactly one call through the [`AuthenticationPort`]
//! and delivers exactly one message through the [`Notifier`]. Nothing is
//! cached between invocations and nothing is retried.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::domain::{Credentials, LoginOutcome, Registration};
use crate::auth::ports::{AuthenticationPort, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerState {
    Idle,
    Pending,
}

pub struct LoginRequestHandler<P: AuthenticationPort, N: Notifier> {
    auth_port: Arc<P>,
    notifier: Arc<N>,
    in_flight: AtomicUsize,
}

impl<P: AuthenticationPort, N: Notifier> LoginRequestHandler<P, N> {
    pub fn new(auth_port: Arc<P>, notifier: Arc<N>) -> Self {
        Self {
            auth_port,
            notifier,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub async fn handle(&self, credentials: Credentials) -> LoginOutcome {
        let _guard = InFlight::enter(&self.in_flight);

        let outcome = LoginOutcome::from(self.auth_port.login(&credentials).await);
        match &outcome {
            LoginOutcome::Succeeded(_) => info!("Login succeeded for {}", credentials.identifier),
            LoginOutcome::Failed { reason } => {
                warn!("Login failed for {}: {}", credentials.identifier, reason)
            }
        }

        self.notifier.notify(&outcome.message());
        outcome
    }

    pub fn state(&self) -> HandlerState {
        if self.in_flight() == 0 {
            HandlerState::Idle
        } else {
            HandlerState::Pending
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

pub struct RegistrationHandler<P: AuthenticationPort, N: Notifier> {
    auth_port: Arc<P>,
    notifier: Arc<N>,
}

impl<P: AuthenticationPort, N: Notifier> RegistrationHandler<P, N> {
    pub fn new(auth_port: Arc<P>, notifier: Arc<N>) -> Self {
        Self {
            auth_port,
            notifier,
        }
    }

    /// Returns `true` when the service accepted the registration.
    pub async fn handle(&self, registration: Registration) -> bool {
        let (accepted, message) = match self.auth_port.register(&registration).await {
            Ok(response) => {
                info!("Registered {} as user {:?}", registration.username, response.user_id);
                (true, response.summary())
            }
            Err(e) => {
                warn!("Registration failed for {}: {}", registration.username, e);
                (false, e.user_message("Registration"))
            }
        };

        self.notifier.notify(&message);
        accepted
    }
}

/// Counts a call as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
