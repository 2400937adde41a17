use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use syllabus_core::CatalogOptions;
use syllabus_core::crawl::{CatalogProgressCallback, execute_catalog_crawl};
use syllabus_core::report::generate_summary_report;
use tracing::{Level, info};
use url::Url;

/// Install the fmt subscriber. `quiet` keeps warnings and errors only,
/// `verbose` adds debug events.
pub fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        Level::WARN
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Expand `~` in a user-supplied path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Build run options from parsed arguments
pub fn options_from_matches(matches: &ArgMatches) -> anyhow::Result<CatalogOptions> {
    let defaults = CatalogOptions::default();

    let base_url = matches
        .get_one::<Url>("base-url")
        .cloned()
        .unwrap_or(defaults.base_url);
    let course_path = matches
        .get_one::<String>("course")
        .cloned()
        .unwrap_or(defaults.course_path);
    let output = matches
        .get_one::<String>("output")
        .map(|p| expand_path(p))
        .unwrap_or(defaults.output);
    let workers = *matches.get_one::<usize>("workers").unwrap_or(&defaults.workers);
    let timeout_secs = *matches
        .get_one::<u64>("timeout")
        .unwrap_or(&defaults.timeout_secs);
    let deadline = matches
        .get_one::<u64>("deadline")
        .map(|secs| Duration::from_secs(*secs));

    let options = CatalogOptions {
        base_url,
        course_path,
        output,
        workers,
        timeout_secs,
        deadline,
        show_progress_bars: !matches.get_flag("quiet"),
        ..defaults
    };
    options.validate()?;
    Ok(options)
}

pub async fn handle_scrape(matches: &ArgMatches) -> anyhow::Result<()> {
    let quiet = matches.get_flag("quiet");
    let options = options_from_matches(matches)?;
    let index_url = options.index_url()?;

    let progress: CatalogProgressCallback = Arc::new(|msg: String| info!("{}", msg));

    let run = execute_catalog_crawl(&options, Some(progress))
        .await
        .with_context(|| format!("Failed to build catalog from {}", index_url))?;

    if !quiet {
        println!("{}", generate_summary_report(&run.summary));
        println!(
            "{} Wrote {} disciplines to {}",
            "✓".green(),
            run.graph.len(),
            options.output.display()
        );
    }

    Ok(())
}
