use crate::config::CatalogOptions;
use crate::error::{CatalogError, Result};
use crate::graph::CatalogGraph;
use crate::link::{LinkStats, link_dependencies};
use crate::output::write_config;
use crate::report::{CatalogSummary, summarize};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use syllabus_scanner::{CatalogCrawl, Crawler, ProgressCallback, ScanError};
use tracing::info;

/// Callback for reporting pipeline stages
pub type CatalogProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct CatalogRun {
    pub graph: CatalogGraph,
    pub links: LinkStats,
    pub summary: CatalogSummary,
}

/// Crawl the catalog and assemble the graph: the node pass over every
/// detail page, then the edge pass over the same index page.
pub async fn build_catalog_graph(
    options: &CatalogOptions,
    progress_callback: Option<CatalogProgressCallback>,
) -> Result<(CatalogGraph, LinkStats)> {
    options.validate()?;
    let index_url = options.index_url()?;

    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message("Fetching index...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let discipline_callback: ProgressCallback = match progress_bar.clone() {
        Some(pb) => Arc::new(move |done: usize, total: usize, code: String| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
            pb.set_message(code);
        }),
        None => Arc::new(|_done: usize, _total: usize, _code: String| {}),
    };

    let crawler = Crawler::with_timeout(options.timeout_secs)?
        .with_markers(options.markers.clone())
        .with_workers(options.workers)
        .with_progress_callback(discipline_callback);

    if let Some(ref callback) = progress_callback {
        callback(format!("Crawling {}", index_url));
    }

    let crawl = await_crawl(
        crawler.crawl(&options.base_url, index_url.as_str()),
        options.deadline,
        progress_bar.as_deref(),
    )
    .await?;

    let mut graph: CatalogGraph = crawl.records.into_iter().collect();

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("{} disciplines retrieved", graph.len()));
    }

    info!("Parsing discipline dependencies info...");
    let links = link_dependencies(&crawl.index, &mut graph);
    info!(
        "Attached {} dependencies ({} unresolved, {} skipped)",
        links.attached,
        links.unresolved,
        links.orphaned + links.blank
    );

    if let Some(ref callback) = progress_callback {
        callback(format!(
            "Built catalog of {} disciplines with {} dependencies",
            graph.len(),
            links.attached
        ));
    }

    Ok((graph, links))
}

/// Run the node pass under the optional deadline. Any failure, including
/// the deadline, abandons the progress bar.
async fn await_crawl<F>(
    crawl: F,
    deadline: Option<Duration>,
    progress_bar: Option<&ProgressBar>,
) -> Result<CatalogCrawl>
where
    F: Future<Output = std::result::Result<CatalogCrawl, ScanError>>,
{
    let result = match deadline {
        Some(deadline) => match tokio::time::timeout(deadline, crawl).await {
            Ok(result) => result.map_err(CatalogError::from),
            Err(_) => Err(CatalogError::DeadlineExceeded(deadline)),
        },
        None => crawl.await.map_err(CatalogError::from),
    };

    if let (Err(_), Some(pb)) = (&result, progress_bar) {
        pb.abandon_with_message("Crawl failed");
    }
    result
}

/// Build the catalog graph, write it to `options.output`, and summarize it.
/// Nothing is written unless every discipline resolved.
pub async fn execute_catalog_crawl(
    options: &CatalogOptions,
    progress_callback: Option<CatalogProgressCallback>,
) -> Result<CatalogRun> {
    let (graph, links) = build_catalog_graph(options, progress_callback.clone()).await?;

    write_config(&graph, &options.output)?;
    if let Some(ref callback) = progress_callback {
        callback(format!("Wrote {}", options.output.display()));
    }

    let summary = summarize(&graph);
    Ok(CatalogRun {
        graph,
        links,
        summary,
    })
}
