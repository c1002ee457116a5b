pub mod domain;
pub mod ports;
pub mod adapters;
pub mod handler;

pub use ports::{AuthenticationPort, Notifier};
pub use domain::{AuthError, AuthResult};
pub use handler::{LoginRequestHandler, RegistrationHandler};
