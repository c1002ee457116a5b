pub mod auth;
pub mod config;
pub mod ui;

pub use auth::AuthenticationPort;
pub use config::Settings;
