//! Builds a [`DisciplineRecord`] from a discipline detail page.

use crate::document::Document;
use crate::error::{Field, Result, ScanError};
use crate::record::DisciplineRecord;
use crate::rule::{ExtractionRule, TagMatch};
use tracing::debug;

/// Label/target rules for the free-text sections of a detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRules {
    pub description: ExtractionRule,
    pub program: ExtractionRule,
    pub bibliography: ExtractionRule,
}

impl Default for MetadataRules {
    fn default() -> Self {
        Self {
            description: ExtractionRule::labelled("Objetivos", TagMatch::new("i")),
            program: ExtractionRule::labelled("Programa", TagMatch::new("i")),
            bibliography: ExtractionRule::labelled("Bibliografia", TagMatch::new("pre")),
        }
    }
}

/// Name of the discipline, taken from the `<span>` after the bold
/// `Disciplina: CODE - ...` heading.
pub fn resolve_name(document: &Document, code: &str) -> Result<String> {
    ExtractionRule::discipline_name()
        .apply(document)
        .map_err(|source| ScanError::Extraction {
            code: code.to_string(),
            field: Field::Name,
            source,
        })
}

fn resolve_field(document: &Document, code: &str, field: Field, rule: &ExtractionRule) -> Result<String> {
    let content = rule.apply(document).map_err(|source| ScanError::Extraction {
        code: code.to_string(),
        field,
        source,
    })?;
    debug!("{} {}: {} chars", code, field, content.len());
    Ok(content)
}

pub fn resolve_discipline(document: &Document, url: &str, code: &str) -> Result<DisciplineRecord> {
    let name = resolve_name(document, code)?;
    let mut record = DisciplineRecord::new(code.to_string(), name, url.to_string());
    let rules = MetadataRules::default();

    // Bibliography is checked first
    record.bibliography = resolve_field(document, code, Field::Bibliography, &rules.bibliography)?;
    record.description = resolve_field(document, code, Field::Description, &rules.description)?;
    record.program = resolve_field(document, code, Field::Program, &rules.program)?;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;

    const DETAIL_PAGE: &str = r#"<html><body>
        <table>
          <tr><td><b>Disciplina: SCC0601 - Algoritmos</b></td></tr>
          <tr><td><span class="txt_arial_10pt_black">Algorithms</span></td></tr>
          <tr><td><b>Objetivos</b></td></tr>
          <tr><td><i>Learn algorithms.</i></td></tr>
          <tr><td><b>Programa</b></td></tr>
          <tr><td><i>Sorting.<br>Graphs.</i></td></tr>
          <tr><td><b>Bibliografia</b></td></tr>
          <tr><td><pre>CORMEN, T. Introduction to Algorithms.
KNUTH, D. The Art of Computer Programming.</pre></td></tr>
        </table>
    </body></html>"#;

    #[test]
    fn test_resolve_discipline_fills_every_field() {
        let document = Document::parse(DETAIL_PAGE);
        let record = resolve_discipline(&document, "https://example.com/d?sgldis=SCC0601", "SCC0601").unwrap();

        assert_eq!(record.code, "SCC0601");
        assert_eq!(record.name, "Algorithms");
        assert_eq!(record.url, "https://example.com/d?sgldis=SCC0601");
        assert_eq!(record.description, "Learn algorithms.");
        assert_eq!(record.program, "Sorting.\nGraphs.");
        assert_eq!(
            record.bibliography,
            "CORMEN, T. Introduction to Algorithms.\nKNUTH, D. The Art of Computer Programming."
        );
        assert!(record.dependencies.is_empty());
    }

    #[test]
    fn test_missing_section_is_attributed() {
        let page = DETAIL_PAGE.replace("<b>Bibliografia</b>", "<b>Referencias</b>");
        let document = Document::parse(&page);
        let err = resolve_discipline(&document, "u", "SCC0601").unwrap_err();

        match err {
            ScanError::Extraction { code, field, source } => {
                assert_eq!(code, "SCC0601");
                assert_eq!(field, Field::Bibliography);
                assert!(matches!(source, ExtractionError::LabelNotFound { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_description_is_attributed_to_description() {
        let page = DETAIL_PAGE.replace("<b>Objetivos</b>", "<b>Metas</b>");
        let document = Document::parse(&page);
        let err = resolve_discipline(&document, "u", "SCC0601").unwrap_err();

        assert!(matches!(
            err,
            ScanError::Extraction {
                field: Field::Description,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_name_is_attributed() {
        let document = Document::parse("<b>Objetivos</b><i>x</i>");
        let err = resolve_name(&document, "SCC0201").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Failed to extract name of discipline SCC0201: no tag matches label "<b> Disciplina...""#
        );
    }

    #[test]
    fn test_empty_bibliography_is_kept_empty() {
        let page = DETAIL_PAGE.replace(
            "<pre>CORMEN, T. Introduction to Algorithms.\nKNUTH, D. The Art of Computer Programming.</pre>",
            "<pre></pre>",
        );
        let document = Document::parse(&page);
        let record = resolve_discipline(&document, "u", "SCC0601").unwrap();
        assert_eq!(record.bibliography, "");
    }
}
