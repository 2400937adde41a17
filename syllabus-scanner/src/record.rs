use serde::{Deserialize, Serialize};

/// One catalog discipline as written to the assets config.
///
/// `dependencies` holds prerequisite codes, not records. A code may name a
/// discipline that was never scraped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineRecord {
    #[serde(skip)]
    pub code: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "deps")]
    pub dependencies: Vec<String>,
    pub bibliography: String,
    pub description: String,
    pub program: String,
}

impl DisciplineRecord {
    pub fn new(code: String, name: String, url: String) -> Self {
        Self {
            code,
            name,
            url,
            dependencies: Vec::new(),
            bibliography: String::new(),
            description: String::new(),
            program: String::new(),
        }
    }
}
