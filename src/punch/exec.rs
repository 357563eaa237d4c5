use super::{parse_log, Histogram};
use crate::config::Config;
use crate::error::Result;
use crate::git::LogQuery;
use crate::model::Punchcard;
use crate::render::renderer_for;
use anyhow::Context;
use chrono::FixedOffset;
use console::style;
use tracing::info;

/// Turns raw `git log` output into a normalized punch card.
pub fn build(log: &str, timezone: Option<FixedOffset>) -> Result<Punchcard> {
    let stamps = parse_log(log, timezone)?;
    let mut card = Histogram::from_stamps(stamps).normalize()?;
    card.timezone = timezone;
    Ok(card)
}

pub fn exec(config: &Config) -> anyhow::Result<()> {
    let log = LogQuery::from_config(config)
        .run()
        .with_context(|| format!("Failed to read git log in {}", config.path.display()))?;

    let card = build(&log, config.timezone).context("Failed to build punch card")?;
    info!(
        commits = card.total_commits,
        busiest = card.max_count,
        "histogram ready"
    );

    let renderer = renderer_for(config.plotter);
    renderer
        .render(&card, config.width, config.opaque, config.file.as_deref())
        .context("Failed to render punch card")?;

    if let Some(file) = &config.file {
        eprintln!(
            "{} {} commits -> {}",
            style("Punch card:").bold(),
            card.total_commits,
            file.display()
        );
    }

    Ok(())
}
