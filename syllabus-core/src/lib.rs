pub mod config;
pub mod crawl;
pub mod error;
pub mod graph;
pub mod link;
pub mod output;
pub mod report;

pub use config::CatalogOptions;
pub use crawl::{CatalogProgressCallback, execute_catalog_crawl};
pub use error::CatalogError;
pub use graph::CatalogGraph;
