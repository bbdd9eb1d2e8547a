//! Line flow: blocks and spans → rendered lines.
//!
//! The markdown core hands over blocks and styled spans; this module lays
//! them out as terminal lines — wrapping paragraphs to the viewport
//! width, spacing blocks with empty lines, and keeping code blocks
//! verbatim and unwrapped. Heading positions are collected for jump
//! navigation.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::document::{Block, Document, Span};

/// Inline style flags for a rendered text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub link: bool,
    pub dim: bool,
}

/// A styled run of text within one rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// Type of a rendered line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Normal paragraph text
    Paragraph,
    /// Heading with level (1-3)
    Heading(u8),
    /// Code block line, verbatim and unwrapped
    CodeBlock,
    /// Empty separator line
    Empty,
}

/// A single rendered line with styling information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    spans: Vec<InlineSpan>,
    line_type: LineType,
}

impl RenderedLine {
    pub const fn new(spans: Vec<InlineSpan>, line_type: LineType) -> Self {
        Self { spans, line_type }
    }

    fn empty() -> Self {
        Self::new(Vec::new(), LineType::Empty)
    }

    pub fn spans(&self) -> &[InlineSpan] {
        &self.spans
    }

    pub const fn line_type(&self) -> &LineType {
        &self.line_type
    }

    /// The line's text with styling stripped.
    pub fn content(&self) -> String {
        self.spans.iter().map(InlineSpan::text).collect()
    }
}

/// Reference to a heading in the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRef {
    /// Heading level (1-3)
    pub level: u8,
    /// Heading text, inline formatting stripped
    pub text: String,
    /// Line index in the rendered document
    pub line: usize,
}

/// A document laid out for a specific width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDoc {
    lines: Vec<RenderedLine>,
    headings: Vec<HeadingRef>,
}

impl RenderedDoc {
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn headings(&self) -> &[HeadingRef] {
        &self.headings
    }

    /// Visible lines from `offset`, at most `count` of them.
    pub fn visible_lines(&self, offset: usize, count: usize) -> &[RenderedLine] {
        let start = offset.min(self.lines.len());
        let end = (start + count).min(self.lines.len());
        &self.lines[start..end]
    }
}

/// Lay a document out as rendered lines wrapped to `width` columns.
pub fn flow_document(doc: &Document, width: u16) -> RenderedDoc {
    let wrap_width = usize::from(width.max(1));
    let mut lines: Vec<RenderedLine> = Vec::new();
    let mut headings = Vec::new();

    for block in doc.blocks() {
        match block {
            Block::Heading { level, text: _ } => {
                let spans = styled_spans(&block.spans());
                headings.push(HeadingRef {
                    level: *level,
                    text: spans.iter().map(InlineSpan::text).collect(),
                    line: lines.len(),
                });
                lines.push(RenderedLine::new(spans, LineType::Heading(*level)));
                lines.push(RenderedLine::empty());
            }
            Block::Paragraph { .. } => {
                let spans = styled_spans(&block.spans());
                for wrapped in wrap_spans(&spans, wrap_width) {
                    lines.push(RenderedLine::new(wrapped, LineType::Paragraph));
                }
                lines.push(RenderedLine::empty());
            }
            Block::CodeBlock { lines: raw } => {
                // Verbatim: no wrapping, no inline styling, byte-for-byte.
                for raw_line in raw {
                    lines.push(RenderedLine::new(
                        vec![InlineSpan::new(raw_line.clone(), InlineStyle::default())],
                        LineType::CodeBlock,
                    ));
                }
                lines.push(RenderedLine::empty());
            }
        }
    }

    // Drop the separator after the last block.
    if lines.last().is_some_and(|l| *l.line_type() == LineType::Empty) {
        lines.pop();
    }

    RenderedDoc { lines, headings }
}

/// Map core spans to styled runs. A link becomes its underlined label
/// followed by the target in dim angle brackets, so the destination is
/// readable in a keyboard-only pager.
fn styled_spans(spans: &[Span]) -> Vec<InlineSpan> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        match span {
            Span::Plain(text) => out.push(InlineSpan::new(text.clone(), InlineStyle::default())),
            Span::Emphasis(text) => out.push(InlineSpan::new(
                text.clone(),
                InlineStyle {
                    emphasis: true,
                    ..InlineStyle::default()
                },
            )),
            Span::Strong(text) => out.push(InlineSpan::new(
                text.clone(),
                InlineStyle {
                    strong: true,
                    ..InlineStyle::default()
                },
            )),
            Span::StrongEmphasis(text) => out.push(InlineSpan::new(
                text.clone(),
                InlineStyle {
                    emphasis: true,
                    strong: true,
                    ..InlineStyle::default()
                },
            )),
            Span::InlineCode(text) => out.push(InlineSpan::new(
                text.clone(),
                InlineStyle {
                    code: true,
                    ..InlineStyle::default()
                },
            )),
            Span::Link { label, url } => {
                out.push(InlineSpan::new(
                    label.clone(),
                    InlineStyle {
                        link: true,
                        ..InlineStyle::default()
                    },
                ));
                out.push(InlineSpan::new(
                    format!(" <{url}>"),
                    InlineStyle {
                        dim: true,
                        ..InlineStyle::default()
                    },
                ));
            }
            Span::CodeBlockBody { lines } => {
                // Code block bodies are laid out by the caller; joining
                // here only happens if one leaks into a paragraph flow.
                out.push(InlineSpan::new(lines.join("\n"), InlineStyle::default()));
            }
        }
    }
    out
}

/// Wrap styled spans into lines of at most `width` display columns.
///
/// Breaks before whitespace-separated words where possible; a single word
/// wider than the line is split hard. Newlines in span text force a
/// break. Trailing whitespace is trimmed from every produced line, and
/// the separator that caused a wrap is swallowed at the new line's start.
fn wrap_spans(spans: &[InlineSpan], width: usize) -> Vec<Vec<InlineSpan>> {
    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut current_width = 0usize;
    let mut wrapped_start = false;

    let mut close_line =
        |current: &mut Vec<InlineSpan>, current_width: &mut usize, lines: &mut Vec<Vec<InlineSpan>>| {
            trim_line_end(current);
            lines.push(std::mem::take(current));
            *current_width = 0;
        };

    for span in spans {
        let mut pending = String::new();
        for token in tokenize(span.text()) {
            match token {
                Token::Newline => {
                    push_pending(&mut pending, span.style(), &mut current);
                    close_line(&mut current, &mut current_width, &mut lines);
                    wrapped_start = false;
                }
                Token::Chunk(chunk) => {
                    let is_space = chunk.chars().all(char::is_whitespace);
                    if is_space && wrapped_start && current_width == 0 {
                        continue;
                    }
                    let chunk_width = chunk.width();
                    if !is_space && current_width > 0 && current_width + chunk_width > width {
                        push_pending(&mut pending, span.style(), &mut current);
                        close_line(&mut current, &mut current_width, &mut lines);
                        wrapped_start = true;
                    }
                    if chunk_width > width {
                        // Hard-split an oversized word.
                        for ch in chunk.chars() {
                            let ch_width = ch.width().unwrap_or(0);
                            if current_width > 0 && current_width + ch_width > width {
                                push_pending(&mut pending, span.style(), &mut current);
                                close_line(&mut current, &mut current_width, &mut lines);
                                wrapped_start = true;
                            }
                            pending.push(ch);
                            current_width += ch_width;
                        }
                    } else {
                        pending.push_str(chunk);
                        current_width += chunk_width;
                    }
                }
            }
        }
        push_pending(&mut pending, span.style(), &mut current);
    }

    trim_line_end(&mut current);
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn push_pending(pending: &mut String, style: InlineStyle, current: &mut Vec<InlineSpan>) {
    if !pending.is_empty() {
        current.push(InlineSpan::new(std::mem::take(pending), style));
    }
}

/// Remove trailing whitespace from the end of a wrapped line.
fn trim_line_end(line: &mut Vec<InlineSpan>) {
    while let Some(last) = line.last_mut() {
        let trimmed_len = last.text.trim_end().len();
        if trimmed_len == 0 {
            line.pop();
        } else {
            last.text.truncate(trimmed_len);
            break;
        }
    }
}

enum Token<'a> {
    Chunk(&'a str),
    Newline,
}

/// Split text into words, whitespace runs, and newlines.
fn tokenize(text: &str) -> impl Iterator<Item = Token<'_>> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        if let Some(stripped) = rest.strip_prefix('\n') {
            rest = stripped;
            return Some(Token::Newline);
        }
        let first_is_space = rest.starts_with(|c: char| c.is_whitespace() && c != '\n');
        let end = rest
            .find(|c: char| c == '\n' || (c.is_whitespace() && c != '\n') != first_is_space)
            .unwrap_or(rest.len());
        let (chunk, remainder) = rest.split_at(end.max(1));
        rest = remainder;
        Some(Token::Chunk(chunk))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_texts(doc: &RenderedDoc) -> Vec<String> {
        doc.lines().iter().map(RenderedLine::content).collect()
    }

    #[test]
    fn test_empty_document_flows_to_nothing() {
        let doc = flow_document(&Document::empty(), 80);
        assert_eq!(doc.line_count(), 0);
        assert!(doc.headings().is_empty());
    }

    #[test]
    fn test_heading_then_paragraph_layout() {
        let doc = flow_document(&Document::parse("# Title\n\nbody text"), 80);
        assert_eq!(line_texts(&doc), vec!["Title", "", "body text"]);
        assert_eq!(*doc.lines()[0].line_type(), LineType::Heading(1));
        assert_eq!(*doc.lines()[2].line_type(), LineType::Paragraph);
    }

    #[test]
    fn test_headings_are_collected_with_line_indices() {
        let doc = flow_document(&Document::parse("# A\n\npara\n\n## B"), 80);
        let headings = doc.headings();
        assert_eq!(headings.len(), 2);
        assert_eq!((headings[0].level, headings[0].line), (1, 0));
        assert_eq!(headings[1].level, 2);
        assert_eq!(
            doc.lines()[headings[1].line].content(),
            "B"
        );
    }

    #[test]
    fn test_heading_text_strips_inline_markup() {
        let doc = flow_document(&Document::parse("# the *answer*"), 80);
        assert_eq!(doc.headings()[0].text, "the answer");
    }

    #[test]
    fn test_code_block_lines_are_verbatim_and_unwrapped() {
        let long = "x".repeat(200);
        let source = format!("```\n{long}\n  indented *not styled*\n```");
        let doc = flow_document(&Document::parse(&source), 20);
        assert_eq!(doc.lines()[0].content(), long);
        assert_eq!(doc.lines()[1].content(), "  indented *not styled*");
        assert_eq!(*doc.lines()[0].line_type(), LineType::CodeBlock);
        assert_eq!(doc.lines()[1].spans()[0].style(), InlineStyle::default());
    }

    #[test]
    fn test_paragraph_wraps_at_word_boundaries() {
        let doc = flow_document(&Document::parse("alpha beta gamma delta"), 11);
        assert_eq!(line_texts(&doc), vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_wrap_preserves_span_styles() {
        let doc = flow_document(&Document::parse("plain **bold tail that wraps**"), 12);
        let bold_spans: Vec<_> = doc
            .lines()
            .iter()
            .flat_map(RenderedLine::spans)
            .filter(|s| s.style().strong)
            .collect();
        assert!(bold_spans.len() >= 2, "bold run should span wrapped lines");
    }

    #[test]
    fn test_oversized_token_is_hard_split() {
        let doc = flow_document(&Document::parse(&"w".repeat(25)), 10);
        let texts = line_texts(&doc);
        assert_eq!(texts, vec!["w".repeat(10), "w".repeat(10), "w".repeat(5)]);
    }

    #[test]
    fn test_soft_break_inside_paragraph_block() {
        let doc = flow_document(&Document::parse("one\ntwo"), 80);
        assert_eq!(line_texts(&doc), vec!["one", "two"]);
    }

    #[test]
    fn test_link_shows_label_and_target() {
        let doc = flow_document(&Document::parse("[docs](https://e.com)"), 80);
        assert_eq!(doc.lines()[0].content(), "docs <https://e.com>");
        let spans = doc.lines()[0].spans();
        assert!(spans[0].style().link);
        assert!(spans[1].style().dim);
    }

    #[test]
    fn test_visible_lines_clamps_to_bounds() {
        let doc = flow_document(&Document::parse("a\n\nb\n\nc"), 80);
        assert_eq!(doc.visible_lines(0, 2).len(), 2);
        assert_eq!(doc.visible_lines(4, 10).len(), 1);
        assert_eq!(doc.visible_lines(100, 10).len(), 0);
    }

    #[test]
    fn test_inline_styles_reach_rendered_spans() {
        let doc = flow_document(&Document::parse("*i* **b** ***bi*** `c`"), 80);
        let styles: Vec<InlineStyle> = doc.lines()[0]
            .spans()
            .iter()
            .map(|s| s.style())
            .collect();
        assert!(styles[0].emphasis && !styles[0].strong);
        assert!(styles[2].strong && !styles[2].emphasis);
        assert!(styles[4].strong && styles[4].emphasis);
        assert!(styles[6].code);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn flow_never_panics(input in "\\PC{0,300}", width in 1u16..120) {
                let _ = flow_document(&Document::parse(&input), width);
            }

            #[test]
            fn wrapped_lines_fit_width(input in "[a-z ]{0,120}", width in 4u16..60) {
                use unicode_width::UnicodeWidthStr;
                let doc = flow_document(&Document::parse(&input), width);
                for line in doc.lines() {
                    prop_assert!(line.content().width() <= usize::from(width));
                }
            }

            #[test]
            fn heading_refs_point_at_heading_lines(
                titles in proptest::collection::vec("[a-z]{1,10}", 1..5),
            ) {
                let source: String = titles.iter().map(|t| format!("# {t}\n\n")).collect();
                let doc = flow_document(&Document::parse(&source), 80);
                for heading in doc.headings() {
                    prop_assert!(matches!(
                        doc.lines()[heading.line].line_type(),
                        LineType::Heading(_)
                    ));
                }
            }
        }
    }
}
