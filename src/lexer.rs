//! Quote-aware line splitter.
//!
//! Works on one trimmed physical line at a time: the trailing comment
//! is cut off at the first unquoted `#`, and the rest is split into
//! directive fragments on unquoted `;`, with an unquoted `{` ending
//! both the current fragment and the line.

use crate::token::{QuoteState, SplitLine};

/// Split one trimmed line into its comment and directive fragments.
#[must_use]
pub fn split_line(line: &str) -> SplitLine {
    let (text, comment) = extract_comment(line);
    let comment = comment.map(str::to_string);

    if text.is_empty() || text == "}" {
        return SplitLine {
            comment,
            fragments: Vec::new(),
            unterminated_quote: false,
            closes_scope: text == "}",
        };
    }

    let (fragments, unterminated_quote) = split_fragments(text);
    SplitLine {
        comment,
        fragments,
        unterminated_quote,
        closes_scope: false,
    }
}

/// Cut `line` at the first `#` that is not inside quotes.
///
/// Returns the trimmed text before the marker and, if a marker was
/// found, the trimmed comment text after it.
#[must_use]
pub fn extract_comment(line: &str) -> (&str, Option<&str>) {
    let mut state = QuoteState::Outside;

    for (idx, ch) in line.char_indices() {
        if ch == '#' && !state.is_quoted() {
            let text = line[..idx].trim();
            let comment = line[idx + 1..].trim();
            return (text, Some(comment));
        }
        state = state.step(ch);
    }

    (line.trim(), None)
}

/// Split comment-free text into directive fragments.
///
/// Quote characters are kept verbatim. Whitespace-only fragments are
/// dropped. The returned flag is set when a quote is still open at end
/// of text; the open quote swallows the rest of the line.
#[must_use]
pub fn split_fragments(text: &str) -> (Vec<String>, bool) {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut state = QuoteState::Outside;

    for ch in text.chars() {
        match ch {
            ';' if !state.is_quoted() => {
                push_fragment(&mut fragments, &current);
                current.clear();
            }
            '{' if !state.is_quoted() => {
                current.push('{');
                push_fragment(&mut fragments, &current);
                // Anything after an opening brace is ignored.
                return (fragments, false);
            }
            _ => {
                state = state.step(ch);
                current.push(ch);
            }
        }
    }

    push_fragment(&mut fragments, &current);
    (fragments, state.is_quoted())
}

/// Whitespace-separated words of a fragment.
#[must_use]
pub fn words(fragment: &str) -> Vec<&str> {
    fragment.split_whitespace().collect()
}

fn push_fragment(fragments: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        fragments.push(trimmed.to_string());
    }
}
