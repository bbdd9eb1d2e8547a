//! Block segmentation.
//!
//! A single top-to-bottom line scan splits a document into heading,
//! fenced-code, and paragraph blocks. The scanner carries one piece of
//! state — whether it is inside a code fence — and flushes the paragraph
//! accumulator whenever a boundary (blank line, heading, fence) appears.

use super::types::Block;

/// Deepest heading level the viewer distinguishes. Longer `#` runs still
/// parse as headings and clamp to this level.
pub const MAX_HEADING_LEVEL: u8 = 3;

/// Split a document into an ordered block sequence.
///
/// Total over all inputs: an empty document yields an empty sequence, and
/// a fence that is never closed becomes a code block holding everything
/// collected after the opening marker.
pub fn segment(document: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut in_fence = false;
    let mut code: Vec<String> = Vec::new();

    for line in document.lines() {
        if in_fence {
            if is_fence_marker(line) {
                blocks.push(Block::CodeBlock {
                    lines: std::mem::take(&mut code),
                });
                in_fence = false;
            } else {
                // Everything inside a fence is verbatim, headings included.
                code.push(line.to_string());
            }
            continue;
        }

        if is_fence_marker(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            in_fence = true;
        } else if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
        } else if let Some((level, text)) = heading_line(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading { level, text });
        } else {
            paragraph.push(line);
        }
    }

    if in_fence {
        blocks.push(Block::CodeBlock { lines: code });
    }
    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn flush_paragraph(pending: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !pending.is_empty() {
        blocks.push(Block::Paragraph {
            text: pending.join("\n"),
        });
        pending.clear();
    }
}

/// A fence marker is three backticks preceded by at most three spaces.
/// Anything after the backticks (a language tag) is tolerated and ignored.
fn is_fence_marker(line: &str) -> bool {
    let unindented = line.trim_start_matches(' ');
    line.len() - unindented.len() <= 3 && unindented.starts_with("```")
}

/// A heading is a run of `#` followed by whitespace; the level is the run
/// length clamped to [`MAX_HEADING_LEVEL`] and the text is the trimmed
/// remainder.
fn heading_line(line: &str) -> Option<(u8, String)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let level = u8::try_from(hashes.min(usize::from(MAX_HEADING_LEVEL)))
        .unwrap_or(MAX_HEADING_LEVEL);
    Some((level, rest.trim().to_string()))
}
