//! Create an administrator account directly in the database.
//!
//! ```text
//! SUPERUSER_PASSWORD=... create-superuser --email admin@example.com --database-url postgres://...
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use zeroize::Zeroizing;

use recipe_api::domain::ports::{RegisterUserRequest, UserAccountsCommand};
use recipe_api::domain::{AccountRole, Email, Password, PasswordHasher, UserAccountsService, UserName};
use recipe_api::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};

const PASSWORD_ENV: &str = "SUPERUSER_PASSWORD";

/// `create-superuser` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "create-superuser",
    about = "Create a staff account with superuser rights",
    version
)]
struct CliArgs {
    /// Login email for the new account.
    #[arg(long, value_name = "email")]
    email: String,
    /// Optional display name.
    #[arg(long, value_name = "name", default_value = "")]
    name: String,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    let database_url = match args.database_url {
        Some(url) => url,
        None => env::var("DATABASE_URL").wrap_err("--database-url or DATABASE_URL is required")?,
    };
    let password = Zeroizing::new(
        env::var(PASSWORD_ENV).wrap_err_with(|| format!("{PASSWORD_ENV} must be set"))?,
    );

    let request = RegisterUserRequest {
        email: Email::new(&args.email).map_err(|err| eyre!("invalid email: {err}"))?,
        password: Password::new(password.as_str()).map_err(|err| eyre!("invalid password: {err}"))?,
        name: UserName::new(args.name).map_err(|err| eyre!("invalid name: {err}"))?,
        role: AccountRole::Superuser,
    };

    run_pending_migrations(&database_url)
        .await
        .wrap_err("apply migrations")?;
    let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(1))
        .await
        .wrap_err("create database pool")?;
    let accounts = UserAccountsService::new(
        Arc::new(DieselUserRepository::new(pool)),
        PasswordHasher::default(),
    );

    let user = accounts
        .register(request)
        .await
        .map_err(|err| eyre!("create superuser failed: {err}"))?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "created superuser {} ({})", user.email(), user.id())?;
    Ok(())
}
