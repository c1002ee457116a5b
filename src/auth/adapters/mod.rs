pub mod http;
pub mod notifier;
