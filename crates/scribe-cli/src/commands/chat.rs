use anyhow::Result;

use crate::app::App;

pub async fn run(message: &str) -> Result<()> {
    let app = App::init().await?;
    let reply = app.agent().chat(message).await?;
    println!("{}", reply);
    Ok(())
}
