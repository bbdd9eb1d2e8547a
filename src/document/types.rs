//! Core document types.

use super::{inline, segment};

/// A top-level structural unit of a markdown document.
///
/// Blocks form a closed set: the segmenter produces nothing else, and the
/// rendering shell matches on them exhaustively. Blank lines act only as
/// separators and never survive segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A one-line heading. `level` is 1–3; deeper `#` runs clamp to 3.
    Heading { level: u8, text: String },
    /// A fenced code block. Lines are verbatim, fence markers excluded.
    CodeBlock { lines: Vec<String> },
    /// A run of consecutive non-blank lines, newline-joined.
    Paragraph { text: String },
}

impl Block {
    /// The ordered span sequence for this block.
    ///
    /// Headings and paragraphs go through the inline formatter; code blocks
    /// bypass it and come back as a single verbatim span.
    pub fn spans(&self) -> Vec<Span> {
        match self {
            Self::Heading { text, .. } | Self::Paragraph { text } => inline::format(text),
            Self::CodeBlock { lines } => vec![Span::CodeBlockBody {
                lines: lines.clone(),
            }],
        }
    }

    /// Returns true for fenced code blocks.
    pub const fn is_code(&self) -> bool {
        matches!(self, Self::CodeBlock { .. })
    }
}

/// A styled run of text within a block's rendered output.
///
/// Spans are ordered left to right within their block and never cross block
/// boundaries. Delimiter syntax is stripped; unmatched delimiters come back
/// as part of a `Plain` span instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Unformatted text.
    Plain(String),
    /// `*italic*`
    Emphasis(String),
    /// `**bold**`
    Strong(String),
    /// `***bold italic***`
    StrongEmphasis(String),
    /// `` `code` `` — contents are never rescanned for inline markers.
    InlineCode(String),
    /// `[label](url)`
    Link { label: String, url: String },
    /// The verbatim body of a fenced code block.
    CodeBlockBody { lines: Vec<String> },
}

/// A parsed markdown document: the source text plus its block sequence.
///
/// Parsing is total — any string, including the empty one, yields a
/// document. There is no error path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    source: String,
    blocks: Vec<Block>,
}

impl Document {
    /// Parse markdown source into a document.
    ///
    /// # Example
    ///
    /// ```
    /// use markshelf::document::{Block, Document};
    ///
    /// let doc = Document::parse("# Hello\n\nWorld");
    /// assert_eq!(doc.blocks().len(), 2);
    /// assert!(matches!(doc.blocks()[0], Block::Heading { level: 1, .. }));
    /// ```
    pub fn parse(source: &str) -> Self {
        Self {
            source: source.to_string(),
            blocks: segment(source),
        }
    }

    /// Create an empty document.
    pub const fn empty() -> Self {
        Self {
            source: String::new(),
            blocks: Vec::new(),
        }
    }

    /// The segmented blocks, in source order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true when the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
