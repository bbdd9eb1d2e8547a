//! Inline formatting.
//!
//! Scans one block's text for delimiter pairs and produces styled
//! [`Span`]s. The scan is a single left-to-right pass: at each position
//! the delimiters are tried longest-first, and the first one whose closer
//! exists later in the text wins and consumes through its closing marker.
//! An opener with no closer is emitted literally and the scan advances by
//! exactly one character, which guarantees forward progress and that no
//! input character is ever dropped.
//!
//! Matched interiors are taken verbatim — constructs do not nest, so
//! `**a *b* c**` keeps its inner asterisks as literal bold text.

use super::types::Span;

/// Format one block's text into an ordered span sequence.
///
/// Total over all inputs: malformed or unmatched syntax degrades to plain
/// text. Consecutive unformatted characters coalesce into one [`Span::Plain`].
pub fn format(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        if let Some((span, consumed)) = match_delimiter(rest) {
            flush_plain(&mut plain, &mut spans);
            spans.push(span);
            rest = &rest[consumed..];
        } else {
            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                plain.push(ch);
            }
            rest = chars.as_str();
        }
    }

    flush_plain(&mut plain, &mut spans);
    spans
}

fn flush_plain(plain: &mut String, spans: &mut Vec<Span>) {
    if !plain.is_empty() {
        spans.push(Span::Plain(std::mem::take(plain)));
    }
}

/// Try each construct at the start of `rest`, most specific first.
///
/// Returns the recognized span and the byte length consumed (opening
/// marker through closing marker), or `None` when nothing both opens and
/// closes here. Asterisk and backtick pairs require a non-empty interior;
/// a bare `**` is unmatched syntax, not an empty bold run.
fn match_delimiter(rest: &str) -> Option<(Span, usize)> {
    if let Some(body) = rest.strip_prefix("***")
        && let Some(end) = body.find("***")
        && end > 0
    {
        return Some((Span::StrongEmphasis(body[..end].to_string()), end + 6));
    }
    if let Some(body) = rest.strip_prefix("**")
        && let Some(end) = body.find("**")
        && end > 0
    {
        return Some((Span::Strong(body[..end].to_string()), end + 4));
    }
    if let Some(body) = rest.strip_prefix('*')
        && let Some(end) = body.find('*')
        && end > 0
    {
        return Some((Span::Emphasis(body[..end].to_string()), end + 2));
    }
    if let Some(body) = rest.strip_prefix('`')
        && let Some(end) = body.find('`')
        && end > 0
    {
        return Some((Span::InlineCode(body[..end].to_string()), end + 2));
    }
    if let Some(body) = rest.strip_prefix('[')
        && let Some(label_end) = body.find(']')
        && let Some(url_body) = body[label_end..].strip_prefix("](")
        && let Some(url_end) = url_body.find(')')
    {
        return Some((
            Span::Link {
                label: body[..label_end].to_string(),
                url: url_body[..url_end].to_string(),
            },
            label_end + url_end + 4,
        ));
    }
    None
}
