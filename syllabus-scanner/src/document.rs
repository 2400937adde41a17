//! Flat, document-ordered view of a parsed HTML page.
//!
//! Catalog pages carry no semantic attributes, so every lookup in this crate
//! is positional: "the first tag whose text is X", "the nearest `<i>` after
//! position N". [`Document`] lays the element tree out in pre-order so those
//! questions become index arithmetic over a slice, and keeps the extraction
//! rules independent of the HTML parser.

use scraper::{ElementRef, Html};
use std::ops::Range;

/// How the text under a tag is flattened into a single string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// Every text fragment trimmed, empty ones dropped, joined with `\n`.
    Lines,
    /// Every text fragment trimmed, empty ones dropped, concatenated.
    Joined,
}

impl TextMode {
    fn separator(self) -> &'static str {
        match self {
            TextMode::Lines => "\n",
            TextMode::Joined => "",
        }
    }
}

/// One element of the document, in pre-order position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    pub name: String,
    pub classes: Vec<String>,
    pub href: Option<String>,
    /// Text of the element when it wraps exactly one text node, directly or
    /// through a chain of single-child elements.
    pub string: Option<String>,
    text_span: Range<usize>,
}

impl TagNode {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    tags: Vec<TagNode>,
    texts: Vec<String>,
}

/// Pending work in the pre-order walk.
enum Step<'a> {
    Open(ElementRef<'a>),
    Text(&'a str),
    /// Subtree of the tag at `slot` is done. With `inherit`, its only child
    /// is an element whose `string` it takes.
    Close { slot: usize, inherit: bool },
}

impl Document {
    pub fn parse(html: &str) -> Self {
        let html = Html::parse_document(html);
        let mut document = Document::default();
        let mut stack = vec![Step::Open(html.root_element())];

        while let Some(step) = stack.pop() {
            match step {
                Step::Text(text) => document.texts.push(text.to_string()),
                Step::Open(element) => document.open(element, &mut stack),
                Step::Close { slot, inherit } => {
                    document.tags[slot].text_span.end = document.texts.len();
                    if inherit {
                        // The only child element was pushed right after its parent
                        document.tags[slot].string =
                            document.tags.get(slot + 1).and_then(|child| child.string.clone());
                    }
                }
            }
        }

        document
    }

    fn open<'a>(&mut self, element: ElementRef<'a>, stack: &mut Vec<Step<'a>>) {
        let children: Vec<_> = element
            .children()
            .filter(|child| child.value().is_element() || child.value().is_text())
            .collect();

        let (string, inherit) = match children.as_slice() {
            [only] => match only.value().as_text() {
                Some(text) => (Some(String::from(&**text)), false),
                None => (None, true),
            },
            _ => (None, false),
        };

        let value = element.value();
        let slot = self.tags.len();
        self.tags.push(TagNode {
            name: value.name().to_string(),
            classes: value.classes().map(str::to_string).collect(),
            href: value.attr("href").map(str::to_string),
            string,
            text_span: self.texts.len()..self.texts.len(),
        });

        stack.push(Step::Close { slot, inherit });
        for child in children.into_iter().rev() {
            if let Some(child_element) = ElementRef::wrap(child) {
                stack.push(Step::Open(child_element));
            } else if let Some(text) = child.value().as_text() {
                stack.push(Step::Text(&**text));
            }
        }
    }

    pub fn tags(&self) -> &[TagNode] {
        &self.tags
    }

    /// Position of the first tag in document order satisfying `predicate`.
    pub fn find<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(&TagNode) -> bool,
    {
        self.tags.iter().position(predicate)
    }

    /// Position of the first tag strictly after `from` satisfying `predicate`.
    /// Descendants of `from` count as following it.
    pub fn find_next<P>(&self, from: usize, predicate: P) -> Option<usize>
    where
        P: Fn(&TagNode) -> bool,
    {
        self.tags
            .iter()
            .enumerate()
            .skip(from + 1)
            .find(|(_, tag)| predicate(tag))
            .map(|(position, _)| position)
    }

    pub fn find_all<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = (usize, &'a TagNode)> + 'a
    where
        P: Fn(&TagNode) -> bool + 'a,
    {
        self.tags
            .iter()
            .enumerate()
            .filter(move |(_, tag)| predicate(tag))
    }

    /// Text under the tag at `position`, flattened according to `mode`.
    pub fn text(&self, position: usize, mode: TextMode) -> String {
        let Some(tag) = self.tags.get(position) else {
            return String::new();
        };
        self.texts[tag.text_span.clone()]
            .iter()
            .map(|fragment| fragment.trim())
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(mode.separator())
    }
}
