use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use login_client::auth::adapters::{http::HttpAuthClient, notifier::ConsoleNotifier};
use login_client::auth::domain::{Credentials, Registration};
use login_client::auth::{LoginRequestHandler, RegistrationHandler};
use login_client::config::Settings;
use login_client::ui::LoginPage;

#[derive(Debug, Parser)]
#[command(name = "login-client", about = "Log in against the authentication service")]
struct Cli {
    /// Configuration file, without extension (defaults to config/default)
    #[arg(long, env = "LOGIN_CLIENT_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the login page and press its button
    Login {
        #[arg(long, env = "LOGIN_CLIENT_USERNAME")]
        username: String,
        #[arg(long, env = "LOGIN_CLIENT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long, env = "LOGIN_CLIENT_USERNAME")]
        username: String,
        #[arg(long, env = "LOGIN_CLIENT_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // stdout is reserved for the page and its notifications
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    let cli = Cli::parse();

    let settings = match cli.config.as_deref() {
        Some(path) => Settings::new_with_config(path),
        None => Settings::new(),
    }
    .map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let auth_client = Arc::new(HttpAuthClient::new(&settings.api)?);
    let notifier = Arc::new(ConsoleNotifier);
    info!("Using authentication service at {}", settings.api.base_url);

    let succeeded = match cli.command {
        Command::Login { username, password } => {
            let handler = Arc::new(LoginRequestHandler::new(auth_client, notifier));
            let page = LoginPage::new(settings.app.title, handler);
            println!("{}", page);

            page.press_login(Credentials::new(username, password))
                .await
                .is_success()
        }
        Command::Register {
            username,
            password,
            email,
        } => {
            let handler = RegistrationHandler::new(auth_client, notifier);
            handler
                .handle(Registration {
                    username,
                    password,
                    email,
                })
                .await
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
