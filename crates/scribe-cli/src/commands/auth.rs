use anyhow::{Context, Result};

use crate::app::App;

/// Environment variable checked before prompting for a password.
const PASSWORD_ENV_VAR: &str = "SCRIBE_PASSWORD";

/// Get the account password from the environment or an interactive prompt.
///
/// Priority:
/// 1. `SCRIBE_PASSWORD` environment variable (for scripts and CI)
/// 2. Interactive TTY prompt via `rpassword`
fn acquire_password(username: &str) -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(password);
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("Password for {}: ", username);
        let password = rpassword::read_password().context("Failed to read password")?;
        if password.is_empty() {
            anyhow::bail!("empty password not allowed");
        }
        return Ok(password);
    }

    anyhow::bail!(
        "No password provided. Set {} or run interactively.",
        PASSWORD_ENV_VAR
    )
}

pub async fn login(username: &str) -> Result<()> {
    let password = acquire_password(username)?;
    let app = App::init().await?;
    let session = app.sessions.login(username, &password).await?;
    println!("✅ Logged in as {} (user {})", username, session.user_id);
    Ok(())
}

pub async fn register(username: &str) -> Result<()> {
    let password = acquire_password(username)?;
    let app = App::init().await?;
    let user = app.sessions.register(username, &password).await?;
    println!("✅ Registered {} (user {})", user.username, user.id);
    println!("Log in with: scribe login {}", user.username);
    Ok(())
}

pub async fn logout() -> Result<()> {
    let app = App::init().await?;
    if app.sessions.current().await.is_none() {
        println!("No active session.");
        return Ok(());
    }
    app.sessions.logout().await?;
    println!("Logged out.");
    Ok(())
}
