pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{handle_scrape, init_tracing, options_from_matches};

// Re-export pipeline types from syllabus-core
pub use syllabus_core::crawl::{CatalogRun, build_catalog_graph, execute_catalog_crawl};
pub use syllabus_core::{CatalogGraph, CatalogOptions};
