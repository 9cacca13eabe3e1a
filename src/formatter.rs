//! Flat re-serializer that turns a `Document` back into configuration text.
//!
//! Two spaces per nesting level, one statement per line, child blocks
//! emitted where their opening line sits in the parent.

use crate::ast::{Document, Line, LineKind, ScopeId};

const INDENT: &str = "  ";

/// Format a `Document` into configuration text.
///
/// Scopes left open in the source are closed in the output.
#[must_use]
pub fn format(document: &Document) -> String {
    let mut out = String::new();
    format_body(&mut out, document, ScopeId::ROOT, 0);
    out
}

fn format_body(out: &mut String, document: &Document, id: ScopeId, depth: usize) {
    for line in &document[id].lines {
        match line.kind {
            LineKind::BlockStart(child) => format_scope(out, document, child, depth),
            LineKind::Comment => format_comment_line(out, line, depth),
            LineKind::Include | LineKind::Directive => format_statement(out, line, depth),
        }
    }
}

fn format_scope(out: &mut String, document: &Document, id: ScopeId, depth: usize) {
    let scope = &document[id];
    push_indent(out, depth);
    if push_words(out, &scope.name, &scope.arguments) {
        out.push(' ');
    }
    out.push('{');
    push_trailing_comments(out, &scope.comments);
    out.push('\n');

    format_body(out, document, id, depth + 1);

    push_indent(out, depth);
    out.push_str("}\n");
}

fn format_statement(out: &mut String, line: &Line, depth: usize) {
    push_indent(out, depth);
    push_words(out, &line.name, &line.arguments);
    out.push(';');
    push_trailing_comments(out, &line.comments);
    out.push('\n');
}

fn format_comment_line(out: &mut String, line: &Line, depth: usize) {
    push_indent(out, depth);
    out.push('#');
    let text = line.comments.join(" ");
    if !text.is_empty() {
        out.push(' ');
        out.push_str(&text);
    }
    out.push('\n');
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Write `name` and `arguments` separated by single spaces, skipping
/// an empty name. Returns whether anything was written.
fn push_words(out: &mut String, name: &str, arguments: &[String]) -> bool {
    let mut wrote = false;
    for word in std::iter::once(name).chain(arguments.iter().map(String::as_str)) {
        if word.is_empty() && !wrote {
            continue;
        }
        if wrote {
            out.push(' ');
        }
        out.push_str(word);
        wrote = true;
    }
    wrote
}

fn push_trailing_comments(out: &mut String, comments: &[String]) {
    if !comments.is_empty() {
        out.push_str(" # ");
        out.push_str(&comments.join(" "));
    }
}
