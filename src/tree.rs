//! Hierarchical tree view of a `Document`.
//!
//! Each scope lists its lines first and then its child blocks, using
//! box-drawing connectors. The very last entry of a scope, counting
//! lines and blocks together, gets the closing connector.

use std::fmt::{self, Write as _};

use crate::ast::{Document, Line, LineKind, Scope, ScopeId};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Render the whole document as a tree.
#[must_use]
pub fn render_tree(document: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Configuration File: {}", document.source());
    let _ = writeln!(out, "{LAST_BRANCH}Root");
    render_scope(&mut out, document, ScopeId::ROOT, BLANK);
    out
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_tree(self))
    }
}

fn render_scope(out: &mut String, document: &Document, id: ScopeId, prefix: &str) {
    let scope = &document[id];
    let has_children = !scope.children.is_empty();

    for (i, line) in scope.lines.iter().enumerate() {
        let is_last = i + 1 == scope.lines.len() && !has_children;
        let _ = writeln!(out, "{prefix}{}{}", connector(is_last), line_label(line));

        if line.kind != LineKind::Comment {
            let nested = continuation(prefix, is_last);
            for (j, comment) in line.comments.iter().enumerate() {
                let last = j + 1 == line.comments.len();
                let _ = writeln!(out, "{nested}{}Comment: {comment}", connector(last));
            }
        }
    }

    for (i, &child_id) in scope.children.iter().enumerate() {
        let child = &document[child_id];
        let is_last = i + 1 == scope.children.len();
        let _ = writeln!(
            out,
            "{prefix}{}Block: {}",
            connector(is_last),
            block_label(child)
        );

        let nested = continuation(prefix, is_last);
        let empty = child.lines.is_empty() && child.children.is_empty();
        for (j, comment) in child.comments.iter().enumerate() {
            let last = j + 1 == child.comments.len() && empty;
            let _ = writeln!(out, "{nested}{}Comment: {comment}", connector(last));
        }

        render_scope(out, document, child_id, &nested);
    }
}

const fn connector(is_last: bool) -> &'static str {
    if is_last { LAST_BRANCH } else { BRANCH }
}

fn continuation(prefix: &str, is_last: bool) -> String {
    let tail = if is_last { BLANK } else { PIPE };
    format!("{prefix}{tail}")
}

fn line_label(line: &Line) -> String {
    let tag = match line.kind {
        LineKind::Comment => return format!("Comment: {}", line.comments.join(" ")),
        LineKind::Include => "Include",
        LineKind::Directive => "Directive",
        LineKind::BlockStart(_) => "BlockStart",
    };
    format!("{tag}: {}", words(&line.name, &line.arguments))
}

fn block_label(scope: &Scope) -> String {
    let mut label = words(&scope.name, &scope.arguments);
    label.push_str(" {}");
    if !scope.comments.is_empty() {
        let _ = write!(label, " (Comments: {})", scope.comments.len());
    }
    label
}

fn words(name: &str, arguments: &[String]) -> String {
    let mut text = name.to_string();
    for arg in arguments {
        text.push(' ');
        text.push_str(arg);
    }
    text
}
