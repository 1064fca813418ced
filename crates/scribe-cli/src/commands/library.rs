use anyhow::Result;
use clap::Args;
use scribe_application::LibraryViewModel;
use scribe_core::item::ItemPatch;

use crate::app::App;
use crate::commands::utils;

#[derive(Args)]
pub struct ListArgs {
    /// Title and content search text
    #[arg(long, default_value = "")]
    pub query: String,
    /// Platform filter: linkedin, instagram, facebook, blog or all
    #[arg(long, default_value = "all")]
    pub platform: String,
    /// Tone filter: professional, friendly, witty, persuasive or all
    #[arg(long, default_value = "all")]
    pub tone: String,
    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
}

pub async fn list(args: ListArgs) -> Result<()> {
    let app = App::init().await?;
    let library = LibraryViewModel::new(app.items());

    library.set_query(args.query).await;
    library
        .set_platform(utils::parse_platform_filter(&args.platform)?)
        .await;
    library
        .set_tone(utils::parse_tone_filter(&args.tone)?)
        .await;

    library.refresh().await?;
    for _ in 1..args.pages {
        if !library.has_more().await {
            break;
        }
        library.load_more().await?;
    }

    let (pinned, unpinned) = library.partitioned().await;
    if pinned.is_empty() && unpinned.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    for item in &pinned {
        utils::print_item(item);
    }
    for item in &unpinned {
        utils::print_item(item);
    }

    let total = pinned.len() + unpinned.len();
    if library.has_more().await {
        println!(
            "{} item(s) shown, more available (--pages {})",
            total,
            library.page().await + 1
        );
    } else {
        println!("{} item(s) shown", total);
    }

    Ok(())
}

pub async fn delete(id: &str) -> Result<()> {
    let app = App::init().await?;
    app.items().delete(id).await?;
    println!("Deleted {}.", id);
    Ok(())
}

pub async fn duplicate(id: &str) -> Result<()> {
    let app = App::init().await?;
    let clone = app.items().duplicate(id).await?;
    println!("Duplicated {} as {}.", id, clone.id);
    Ok(())
}

pub async fn set_pinned(id: &str, pinned: bool) -> Result<()> {
    let app = App::init().await?;
    app.items().update(id, &ItemPatch::pinned(pinned)).await?;
    if pinned {
        println!("📌 Pinned {}.", id);
    } else {
        println!("Unpinned {}.", id);
    }
    Ok(())
}
