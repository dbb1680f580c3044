use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use meetkit_core::{Config, Dataset};
use serde::Serialize;

#[derive(Args)]
pub struct CheckArgs {
    /// Fixture to validate (defaults to data.fixture_path from config)
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FixtureSummary {
    meetings: usize,
    users: usize,
    participants: usize,
}

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let path = match args.fixture {
        Some(path) => path,
        None => Config::load_or_default()?.data.fixture_path,
    };

    let dataset = Dataset::load(&path)
        .with_context(|| format!("invalid fixture {}", path.display()))?;
    let summary = FixtureSummary {
        meetings: dataset.meetings.len(),
        users: dataset.users.len(),
        participants: dataset.participants().len(),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
