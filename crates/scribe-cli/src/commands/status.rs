use anyhow::Result;

use crate::app::App;

/// Prints backend reachability and session state. An unreachable backend
/// is reported, not treated as a command failure.
pub async fn run() -> Result<()> {
    let app = App::init().await?;

    println!("Backend:  {}", app.connection.base_url());
    match app.connection.health().await {
        Ok(()) => println!("Health:   ok"),
        Err(e) => println!("Health:   unreachable ({})", e),
    }
    match app.sessions.current().await {
        Some(session) => println!("Session:  logged in (user {})", session.user_id),
        None => println!("Session:  none"),
    }

    Ok(())
}
