use crate::discipline::resolve_discipline;
use crate::error::{Result, ScanError};
use crate::fetcher::Fetcher;
use crate::index::{DisciplineLink, IndexMarkers, IndexPage};
use crate::record::DisciplineRecord;
use futures::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Called after each discipline is resolved with `(done, total, code)`.
pub type ProgressCallback = Arc<dyn Fn(usize, usize, String) + Send + Sync>;

/// Index page plus one record per distinct discipline code, in index order.
#[derive(Debug, Clone)]
pub struct CatalogCrawl {
    pub index: IndexPage,
    pub records: Vec<DisciplineRecord>,
}

pub struct Crawler {
    fetcher: Fetcher,
    markers: IndexMarkers,
    workers: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new() -> Result<Self> {
        Self::with_timeout(30)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Ok(Self::with_fetcher(Fetcher::with_timeout(timeout_secs)?))
    }

    pub fn with_fetcher(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            markers: IndexMarkers::default(),
            workers: 1,
            progress_callback: None,
        }
    }

    pub fn with_markers(mut self, markers: IndexMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Number of detail pages fetched concurrently. Output order does not
    /// depend on it.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Fetch the index once, then every discipline's detail page.
    ///
    /// The first failure aborts the crawl; there is no partial result.
    pub async fn crawl(&self, base_url: &Url, index_url: &str) -> Result<CatalogCrawl> {
        info!("Getting course info from {} ...", index_url);
        let document = self.fetcher.fetch(index_url).await?;
        let index = IndexPage::parse(&document, &self.markers, base_url)?;

        let links: Vec<DisciplineLink> = index.unique_links().into_iter().cloned().collect();
        let total = links.len();
        info!("Found {} disciplines.", total);
        if total == 0 {
            return Err(ScanError::MalformedIndex(format!(
                "no discipline links found on {}",
                index_url
            )));
        }

        let mut done = 0;
        let records = stream::iter(links)
            .map(|link| self.resolve_link(link))
            .buffered(self.workers)
            .inspect_ok(|record| {
                done += 1;
                info!("Successfully processed {}/{} discipline infos.", done, total);
                if let Some(ref callback) = self.progress_callback {
                    callback(done, total, record.code.clone());
                }
            })
            .try_collect::<Vec<_>>()
            .await?;

        Ok(CatalogCrawl { index, records })
    }

    async fn resolve_link(&self, link: DisciplineLink) -> Result<DisciplineRecord> {
        info!(
            "Retrieving info on discipline {} from {}...",
            link.code, link.url
        );
        let document = self.fetcher.fetch(&link.url).await?;
        let record = resolve_discipline(&document, &link.url, &link.code)?;
        debug!("Resolved {} as {:?}", record.code, record.name);
        Ok(record)
    }
}
