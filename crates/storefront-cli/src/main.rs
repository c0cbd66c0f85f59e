//! Storefront CLI - a command-line client for the storefront backend.
//!
//! Registers accounts, signs in and out, and manages the signed-in user's
//! profile and addresses. The session token is kept in the OS keychain.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use storefront_core::models::{
    AddressRequest, AddressUpdate, LoginRequest, RegisterRequest, UserUpdate,
};
use storefront_core::{ApiError, Config, SessionContext, SessionError, UserMessage};

#[derive(Parser)]
#[command(name = "storefront", version, about = "Storefront command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account from a JSON registration file
    Register { file: PathBuf },
    /// Sign in and store the session token
    Login {
        email: String,
        /// Read from a prompt when omitted
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Remove the stored session token
    Logout,
    /// Show whether a session token is stored
    Status,
    /// Show the signed-in user's profile
    Profile,
    /// List the signed-in user's addresses
    Addresses,
    /// Update profile fields
    UpdateProfile {
        user_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Update an address from a JSON file of changed fields
    UpdateAddress {
        user_id: String,
        address_id: String,
        file: PathBuf,
    },
    /// Create an address from a JSON file
    CreateAddress { file: PathBuf },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Turn a failed call into the copy a user should see
fn report(err: SessionError) -> anyhow::Error {
    let message = UserMessage::from_session_error(&err);
    anyhow::Error::new(err).context(message.to_string())
}

fn report_api(err: ApiError) -> anyhow::Error {
    report(SessionError::Api(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    let cli = Cli::parse();

    let config = Config::load()?;
    let ctx = SessionContext::from_config(&config)?;
    info!("Storefront CLI starting");

    run(&ctx, cli.command).await
}

async fn run(ctx: &SessionContext, command: Command) -> Result<()> {
    match command {
        Command::Register { file } => {
            let request: RegisterRequest = read_json(&file)?;
            let missing = request.address.missing_fields();
            if !missing.is_empty() {
                anyhow::bail!("Address is missing required fields: {}", missing.join(", "));
            }
            let response = ctx.auth.register(&request).await.map_err(report)?;
            println!("{}", response.data.message);
            print_json(&response)?;
        }
        Command::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")
                    .context("Failed to read password")?,
            };
            let credentials = LoginRequest::new(&email, &password);
            if let Err(errors) = credentials.validate() {
                let shown: Vec<String> = errors
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect();
                anyhow::bail!("Please complete all required fields ({})", shown.join("; "));
            }
            let response = ctx.auth.login(&credentials).await.map_err(report)?;
            if response.token().is_some() {
                println!("Welcome back!");
            } else {
                println!("Signed in, but the server did not issue a session token.");
            }
        }
        Command::Logout => {
            ctx.auth.logout().await.map_err(report)?;
            println!("Signed out.");
        }
        Command::Status => {
            if ctx.auth.is_logged_in().await {
                println!("Signed in.");
            } else {
                println!("Not signed in.");
            }
        }
        Command::Profile => {
            let user = ctx.users.get_user_data().await.map_err(report_api)?;
            println!("{} <{}>", user.full_name(), user.email);
            if !user.phone_number.is_empty() {
                println!("Phone: {}", user.phone_number);
            }
            println!("Addresses: {}", user.address.len());
        }
        Command::Addresses => {
            let addresses = ctx.users.get_address_data().await.map_err(report_api)?;
            if addresses.is_empty() {
                println!("No saved addresses.");
            }
            for addr in &addresses {
                println!(
                    "[{}] {:?} {}",
                    addr.id.as_deref().unwrap_or("-"),
                    addr.address_type,
                    addr.one_line()
                );
            }
        }
        Command::UpdateProfile {
            user_id,
            name,
            last_name,
            email,
            phone,
        } => {
            let update = UserUpdate {
                name,
                last_name,
                email,
                phone_number: phone,
            };
            if update.is_empty() {
                anyhow::bail!("Nothing to update");
            }
            let user = ctx
                .users
                .update_user_data(&user_id, &update)
                .await
                .map_err(report_api)?;
            println!("Your details have been updated.");
            print_json(&user)?;
        }
        Command::UpdateAddress {
            user_id,
            address_id,
            file,
        } => {
            let update: AddressUpdate = read_json(&file)?;
            let address = ctx
                .users
                .update_address_data(&user_id, &address_id, &update)
                .await
                .map_err(report_api)?;
            println!("Address updated.");
            print_json(&address)?;
        }
        Command::CreateAddress { file } => {
            let request: AddressRequest = read_json(&file)?;
            let missing = request.missing_fields();
            if !missing.is_empty() {
                anyhow::bail!("Please complete the required fields: {}", missing.join(", "));
            }
            let address = ctx.users.create_address(&request).await.map_err(report_api)?;
            println!("New address created.");
            print_json(&address)?;
        }
    }
    Ok(())
}
