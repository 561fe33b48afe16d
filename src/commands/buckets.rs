use super::open_engine;
use crate::cli::args::BucketCommand;
use crate::error::Result;
use crate::ui as output;
use colored::Colorize;
use std::path::Path;

pub fn run(config: Option<&Path>, command: &BucketCommand) -> Result<()> {
    let engine = open_engine(config)?;
    match command {
        BucketCommand::Add { name, url } => {
            engine.add_bucket(name, url.as_deref())?;
            output::success(&format!("Bucket '{}' added", name));
        }
        BucketCommand::Rm { name } => {
            engine.remove_bucket(name)?;
            output::success(&format!("Bucket '{}' removed", name));
        }
        BucketCommand::Defaults => {
            engine.add_default_buckets()?;
            output::success("Default buckets added");
        }
        BucketCommand::List => {}
    }

    let buckets = engine.refresh_buckets()?;
    output::header(&format!("Buckets ({})", buckets.len()));
    if !engine.base_present() {
        output::warning("Scoop not detected; showing configured buckets");
    }
    for bucket in &buckets {
        match &bucket.url {
            Some(url) => output::indent(&format!("{} {}", bucket.name.bold(), url.dimmed()), 1),
            None => output::indent(&bucket.name.bold().to_string(), 1),
        }
    }
    Ok(())
}
