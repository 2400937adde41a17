use std::fmt;
use thiserror::Error;

/// Failure of a single extraction rule against one document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no tag matches label {label:?}")]
    LabelNotFound { label: String },

    #[error("no <{tag}{}> tag follows label {label:?}", class_suffix(.class))]
    TargetNotFound {
        label: String,
        tag: String,
        class: Option<String>,
    },
}

fn class_suffix(class: &Option<String>) -> String {
    class
        .as_ref()
        .map(|c| format!(" class={c:?}"))
        .unwrap_or_default()
}

/// Record field an extraction failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Program,
    Bibliography,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Program => "program",
            Field::Bibliography => "bibliography",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Malformed index entry: {0}")]
    MalformedIndex(String),

    #[error("Failed to extract {field} of discipline {code}: {source}")]
    Extraction {
        code: String,
        field: Field,
        #[source]
        source: ExtractionError,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;
