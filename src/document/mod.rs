//! Markdown parsing.
//!
//! This module is the algorithmic core of markshelf, and the only part of
//! the crate that knows markdown syntax. It is split the way the text
//! flows:
//!
//! - [`segment`]: raw text → ordered [`Block`]s (headings, fenced code,
//!   paragraphs)
//! - [`inline::format`]: one block's text → ordered styled [`Span`]s
//!
//! Both passes are pure and total: no I/O, no failure path. Malformed
//! markdown degrades to the most literal reasonable reading — unmatched
//! delimiters stay in the text, an unterminated fence becomes a code
//! block. The rendering shell in [`crate::ui`] maps the output onto the
//! terminal; nothing here knows about tabs, files, or widths.

pub mod inline;
mod segment;
mod types;

pub use segment::{MAX_HEADING_LEVEL, segment};
pub use types::{Block, Document, Span};

#[cfg(test)]
mod tests {
    use super::*;

    // Cross-pass checks; per-pass behavior is tested next to each scanner.

    #[test]
    fn test_code_blocks_bypass_inline_formatting() {
        let doc = Document::parse("# H\n```\n*x*\n```");
        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(
            doc.blocks()[1].spans(),
            vec![Span::CodeBlockBody {
                lines: vec!["*x*".to_string()],
            }]
        );
    }

    #[test]
    fn test_paragraph_spans_cover_block_text() {
        let doc = Document::parse("plain *i* **b** `c` [l](u)");
        let spans = doc.blocks()[0].spans();
        assert_eq!(
            spans,
            vec![
                Span::Plain("plain ".to_string()),
                Span::Emphasis("i".to_string()),
                Span::Plain(" ".to_string()),
                Span::Strong("b".to_string()),
                Span::Plain(" ".to_string()),
                Span::InlineCode("c".to_string()),
                Span::Plain(" ".to_string()),
                Span::Link {
                    label: "l".to_string(),
                    url: "u".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_heading_interior_is_formatted() {
        let doc = Document::parse("## the `answer`");
        assert_eq!(
            doc.blocks()[0].spans(),
            vec![
                Span::Plain("the ".to_string()),
                Span::InlineCode("answer".to_string()),
            ]
        );
    }
}
