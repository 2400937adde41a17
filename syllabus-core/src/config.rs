//! Run options for one catalog scrape.
//!
//! Nothing here is read at load time; callers build [`CatalogOptions`] and
//! hand it to [`crate::execute_catalog_crawl`].

use crate::error::{CatalogError, Result};
use std::path::PathBuf;
use std::time::Duration;
use syllabus_scanner::IndexMarkers;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://uspdigital.usp.br/jupiterweb/";
pub const DEFAULT_COURSE_PATH: &str = "listarGradeCurricular?codcg=55&codcur=55041&codhab=0&tipo=N";
pub const DEFAULT_OUTPUT_PATH: &str = "config/usp_assets_config.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub base_url: Url,
    pub course_path: String,
    pub output: PathBuf,
    pub workers: usize,
    pub timeout_secs: u64,
    /// Upper bound on the whole crawl, index and detail pages together.
    pub deadline: Option<Duration>,
    pub markers: IndexMarkers,
    pub show_progress_bars: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("Default base URL is invalid"),
            course_path: DEFAULT_COURSE_PATH.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            workers: 1,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            deadline: None,
            markers: IndexMarkers::default(),
            show_progress_bars: false,
        }
    }
}

impl CatalogOptions {
    pub fn index_url(&self) -> Result<Url> {
        self.base_url.join(&self.course_path).map_err(|e| {
            CatalogError::InvalidOptions(format!(
                "cannot join {} onto {}: {}",
                self.course_path, self.base_url, e
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidOptions(format!(
                "{} cannot be used as a base URL",
                self.base_url
            )));
        }
        if self.workers == 0 {
            return Err(CatalogError::InvalidOptions(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(CatalogError::InvalidOptions(
                "timeout must be at least 1 second".to_string(),
            ));
        }
        self.index_url().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_index_url() {
        let options = CatalogOptions::default();
        assert_eq!(
            options.index_url().unwrap().as_str(),
            "https://uspdigital.usp.br/jupiterweb/listarGradeCurricular?codcg=55&codcur=55041&codhab=0&tipo=N"
        );
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let options = CatalogOptions {
            workers: 0,
            ..CatalogOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(CatalogError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_non_base_url_rejected() {
        let options = CatalogOptions {
            base_url: Url::parse("mailto:someone@example.com").unwrap(),
            ..CatalogOptions::default()
        };
        assert!(options.validate().is_err());
    }
}
