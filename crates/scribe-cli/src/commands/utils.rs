use anyhow::Result;
use scribe_core::item::{Item, Mode, Platform, Tone};

pub fn parse_platform(value: &str) -> Result<Platform> {
    value.parse::<Platform>().map_err(|_| {
        anyhow::anyhow!(
            "unknown platform '{}' (expected linkedin, instagram, facebook or blog)",
            value
        )
    })
}

pub fn parse_tone(value: &str) -> Result<Tone> {
    value.parse::<Tone>().map_err(|_| {
        anyhow::anyhow!(
            "unknown tone '{}' (expected professional, friendly, witty or persuasive)",
            value
        )
    })
}

pub fn parse_mode(value: &str) -> Result<Mode> {
    value
        .parse::<Mode>()
        .map_err(|_| anyhow::anyhow!("unknown mode '{}' (expected social or blog)", value))
}

/// Parses a platform filter where "all" (or empty) means no filter.
pub fn parse_platform_filter(value: &str) -> Result<Option<Platform>> {
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    parse_platform(value).map(Some)
}

/// Parses a tone filter where "all" (or empty) means no filter.
pub fn parse_tone_filter(value: &str) -> Result<Option<Tone>> {
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    parse_tone(value).map(Some)
}

/// Prints one library item as a two-to-three line block.
pub fn print_item(item: &Item) {
    let marker = if item.pinned { "📌 " } else { "   " };
    let title = if item.title.is_empty() {
        "(untitled)"
    } else {
        &item.title
    };
    println!("{}{}  [{}]", marker, title, item.id);
    println!(
        "     {} · {} · {} · {}w · {}",
        item.platform,
        item.tone,
        item.mode,
        item.words,
        item.created_at.format("%Y-%m-%d")
    );
    if !item.tags.is_empty() {
        println!("     #{}", item.tags.join(" #"));
    }
}
