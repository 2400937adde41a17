//! Catalog index page: discipline links and prerequisite annotations.

use crate::document::{Document, TextMode};
use crate::error::{Result, ScanError};
use crate::rule::TagMatch;
use std::collections::HashSet;
use url::Url;

/// Length of a catalog discipline code, e.g. `SCC0601`.
pub const CODE_LEN: usize = 7;

/// Tag shapes that identify rows on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMarkers {
    pub discipline_link: TagMatch,
    pub dependency_annotation: TagMatch,
}

impl Default for IndexMarkers {
    fn default() -> Self {
        Self {
            discipline_link: TagMatch::new("a").with_class("link_gray"),
            dependency_annotation: TagMatch::new("span").with_class("txt_arial_8pt_red"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisciplineLink {
    /// Pre-order position of the link tag in the index document.
    pub position: usize,
    pub code: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub position: usize,
    /// Prerequisite code the annotation refers to; empty when the
    /// annotation has no text.
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexPage {
    /// Every discipline link, in document order. Codes may repeat.
    pub links: Vec<DisciplineLink>,
    /// Every prerequisite annotation, in document order.
    pub annotations: Vec<Annotation>,
}

impl IndexPage {
    pub fn parse(document: &Document, markers: &IndexMarkers, base_url: &Url) -> Result<Self> {
        let mut links = Vec::new();
        for (position, tag) in document.find_all(|tag| markers.discipline_link.matches(tag)) {
            let text = document.text(position, TextMode::Joined);
            let code = last_chars(&text, CODE_LEN).ok_or_else(|| {
                ScanError::MalformedIndex(format!(
                    "discipline link {:?} at position {} is shorter than a code",
                    text, position
                ))
            })?;
            let href = tag.href.as_deref().ok_or_else(|| {
                ScanError::MalformedIndex(format!("discipline link {} has no href", code))
            })?;
            let url = base_url
                .join(href)
                .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", href, e)))?;

            links.push(DisciplineLink {
                position,
                code,
                url: url.to_string(),
            });
        }

        let annotations = document
            .find_all(|tag| markers.dependency_annotation.matches(tag))
            .map(|(position, _)| {
                let text = document.text(position, TextMode::Joined);
                let code: String = text.chars().take(CODE_LEN).collect();
                Annotation { position, code }
            })
            .collect();

        Ok(Self { links, annotations })
    }

    /// Links with the first occurrence of each code, in document order.
    pub fn unique_links(&self) -> Vec<&DisciplineLink> {
        let mut seen = HashSet::new();
        self.links
            .iter()
            .filter(|link| seen.insert(link.code.as_str()))
            .collect()
    }

    /// The link nearest before `position`, i.e. the row an annotation at
    /// `position` belongs to.
    pub fn owner_of(&self, position: usize) -> Option<&DisciplineLink> {
        let after = self.links.partition_point(|link| link.position < position);
        after.checked_sub(1).map(|i| &self.links[i])
    }
}

fn last_chars(text: &str, count: usize) -> Option<String> {
    let total = text.chars().count();
    (total >= count).then(|| text.chars().skip(total - count).collect())
}
