//! Label-then-nearest-tag extraction rules.
//!
//! A rule finds a label tag, then the first following tag of a target shape,
//! and returns that tag's text. The first label match wins; repeated labels on
//! one page always bind to the first occurrence.

use crate::document::{Document, TagNode, TextMode};
use crate::error::ExtractionError;

/// How the label tag is recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelMatch {
    /// Any tag whose own text, trimmed, equals the word.
    Exact(String),
    /// A tag of the given name whose own text starts with the prefix.
    Prefix { tag: String, prefix: String },
}

impl LabelMatch {
    pub fn matches(&self, tag: &TagNode) -> bool {
        match self {
            LabelMatch::Exact(word) => tag.string.as_deref().is_some_and(|s| s.trim() == word),
            LabelMatch::Prefix { tag: name, prefix } => {
                tag.is(name) && tag.string.as_deref().is_some_and(|s| s.starts_with(prefix.as_str()))
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            LabelMatch::Exact(word) => word.clone(),
            LabelMatch::Prefix { tag, prefix } => format!("<{tag}> {prefix}..."),
        }
    }
}

/// Shape of the tag holding the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    pub name: String,
    pub class: Option<String>,
}

impl TagMatch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn matches(&self, tag: &TagNode) -> bool {
        tag.is(&self.name) && self.class.as_deref().is_none_or(|class| tag.has_class(class))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRule {
    pub label: LabelMatch,
    pub target: TagMatch,
    pub text: TextMode,
}

impl ExtractionRule {
    /// Exact-label rule whose content keeps block separations as newlines.
    pub fn labelled(word: impl Into<String>, target: TagMatch) -> Self {
        Self {
            label: LabelMatch::Exact(word.into()),
            target,
            text: TextMode::Lines,
        }
    }

    /// Rule for discipline names: a `<b>` starting with `Disciplina`, then
    /// the next `<span>`.
    pub fn discipline_name() -> Self {
        Self {
            label: LabelMatch::Prefix {
                tag: "b".to_string(),
                prefix: "Disciplina".to_string(),
            },
            target: TagMatch::new("span"),
            text: TextMode::Joined,
        }
    }

    pub fn apply(&self, document: &Document) -> Result<String, ExtractionError> {
        apply_rule(document, self)
    }
}

pub fn apply_rule(document: &Document, rule: &ExtractionRule) -> Result<String, ExtractionError> {
    let label = document
        .find(|tag| rule.label.matches(tag))
        .ok_or_else(|| ExtractionError::LabelNotFound {
            label: rule.label.describe(),
        })?;

    let target = document
        .find_next(label, |tag| rule.target.matches(tag))
        .ok_or_else(|| ExtractionError::TargetNotFound {
            label: rule.label.describe(),
            tag: rule.target.name.clone(),
            class: rule.target.class.clone(),
        })?;

    Ok(document.text(target, rule.text))
}

/// Text of the nearest `target_tag` following the tag labelled `label_word`.
pub fn extract(
    document: &Document,
    label_word: &str,
    target_tag: &str,
    class_filter: Option<&str>,
) -> Result<String, ExtractionError> {
    let mut target = TagMatch::new(target_tag);
    if let Some(class) = class_filter {
        target = target.with_class(class);
    }
    apply_rule(document, &ExtractionRule::labelled(label_word, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_programa_italic() {
        let document = Document::parse(
            "<table><tr><td><b>Programa</b></td></tr><tr><td><i>X</i></td></tr></table>",
        );
        assert_eq!(extract(&document, "Programa", "i", None).unwrap(), "X");
    }

    #[test]
    fn test_extract_missing_label_is_not_found() {
        let document = Document::parse("<p>Objetivos</p><i>text</i>");
        let err = extract(&document, "Programa", "i", None).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::LabelNotFound {
                label: "Programa".to_string()
            }
        );
    }

    #[test]
    fn test_extract_label_without_following_target_is_not_found() {
        let document = Document::parse("<i>before</i><b>Programa</b><p>no italics</p>");
        let err = extract(&document, "Programa", "i", None).unwrap_err();
        assert!(matches!(err, ExtractionError::TargetNotFound { ref tag, .. } if tag == "i"));
    }

    #[test]
    fn test_extract_label_with_empty_content_is_empty_string() {
        let document = Document::parse("<b>Bibliografia</b><pre>   </pre>");
        assert_eq!(extract(&document, "Bibliografia", "pre", None).unwrap(), "");
    }

    #[test]
    fn test_label_match_is_exact_after_trimming() {
        let document = Document::parse("<b>Programa Resumido</b><i>wrong</i><b>  Programa\n</b><i>right</i>");
        assert_eq!(extract(&document, "Programa", "i", None).unwrap(), "right");
    }

    #[test]
    fn test_first_label_occurrence_wins() {
        let document = Document::parse("<b>Programa</b><i>first</i><b>Programa</b><i>second</i>");
        assert_eq!(extract(&document, "Programa", "i", None).unwrap(), "first");
    }

    #[test]
    fn test_class_filter_skips_other_classes() {
        let document = Document::parse(
            r#"<b>Notes</b><span class="muted">skip</span><span class="body main">keep</span>"#,
        );
        assert_eq!(extract(&document, "Notes", "span", Some("main")).unwrap(), "keep");
        let err = extract(&document, "Notes", "span", Some("absent")).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"no <span class="absent"> tag follows label "Notes""#
        );
    }

    #[test]
    fn test_multiline_content_joined_with_newlines() {
        let document = Document::parse("<b>Objetivos</b><i>First line.<br>Second line.</i>");
        assert_eq!(
            extract(&document, "Objetivos", "i", None).unwrap(),
            "First line.\nSecond line."
        );
    }

    #[test]
    fn test_discipline_name_rule() {
        let document = Document::parse(
            "<b>Disciplina: SCC0601 - Algoritmos</b><br><span>Algorithms</span>",
        );
        assert_eq!(ExtractionRule::discipline_name().apply(&document).unwrap(), "Algorithms");
    }

    #[test]
    fn test_discipline_name_requires_bold_prefix() {
        let document = Document::parse("<i>Disciplina: SCC0601</i><span>Algorithms</span>");
        let err = ExtractionRule::discipline_name().apply(&document).unwrap_err();
        assert!(matches!(err, ExtractionError::LabelNotFound { .. }));
    }
}
