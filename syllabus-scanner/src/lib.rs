pub mod crawler;
pub mod discipline;
pub mod document;
pub mod error;
pub mod fetcher;
pub mod index;
pub mod record;
pub mod rule;

pub use crawler::{CatalogCrawl, Crawler, ProgressCallback};
pub use document::{Document, TagNode, TextMode};
pub use error::{ExtractionError, Field, ScanError};
pub use fetcher::Fetcher;
pub use index::{Annotation, DisciplineLink, IndexMarkers, IndexPage};
pub use record::DisciplineRecord;
pub use rule::{ExtractionRule, LabelMatch, TagMatch};
