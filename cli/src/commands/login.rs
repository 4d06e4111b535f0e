//! `camps login` / `camps logout`.

use anyhow::{Context as _, Result};
use tracing::{info, instrument};

use crate::{context::AppContext, output::Output};

#[instrument(skip_all, name = "login", fields(username = username.trim()))]
pub fn run_login(app: &AppContext, username: &str, token: &str) -> Result<()> {
    app.session
        .login(username, token)
        .context("Failed to store session")?;

    info!("session stored");
    Output::new().success(format!("Logged in as {}", username.trim()));
    Ok(())
}

#[instrument(skip_all, name = "logout")]
pub fn run_logout(app: &AppContext) -> Result<()> {
    let out = Output::new();
    let username = app.session.username();

    app.session.logout().context("Failed to clear session")?;

    match username {
        Some(username) => out.success(format!("Logged out {username}")),
        None => out.info("No active session"),
    }
    Ok(())
}
