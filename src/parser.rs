use std::fmt;

use crate::ast::{Document, Line, ScopeId};
use crate::lexer;
use crate::token::Span;

/// Classifies a non-fatal structural problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// `}` with no open scope; ignored.
    StrayCloseBrace,
    /// Scope still open at end of input; kept as built.
    UnclosedScope { name: String },
    /// Quote left open at end of line; the rest of the line was quoted.
    UnterminatedQuote,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrayCloseBrace => write!(f, "unmatched '}}' ignored"),
            Self::UnclosedScope { name } => {
                write!(f, "block '{name}' is never closed")
            }
            Self::UnterminatedQuote => write!(f, "unterminated quote"),
        }
    }
}

/// Structural problem the parser tolerated.
///
/// Warnings never change the shape of the resulting tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}", span.line)]
pub struct Warning {
    pub kind: WarningKind,
    pub span: Span,
}

/// Parse configuration text into a `Document`.
///
/// Never fails: unbalanced braces, unterminated quotes, and missing
/// semicolons are absorbed into the tree and reported through
/// `Document::warnings`.
#[must_use]
pub fn parse(source: &str, input: &str) -> Document {
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
    parse_lines(source, input.lines())
}

/// Parse a sequence of physical lines into a `Document`.
#[must_use]
pub fn parse_lines<I>(source: &str, lines: I) -> Document
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut builder = TreeBuilder::new(source);

    for (idx, raw) in lines.into_iter().enumerate() {
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        builder.feed(line, Span { line: idx + 1 });
    }

    builder.finish()
}

struct OpenScope {
    id: ScopeId,
    /// Where the block was opened; `None` for the root.
    opened_at: Option<Span>,
}

struct TreeBuilder {
    document: Document,
    stack: Vec<OpenScope>,
}

impl TreeBuilder {
    fn new(source: &str) -> Self {
        Self {
            document: Document::new(source),
            stack: vec![OpenScope {
                id: ScopeId::ROOT,
                opened_at: None,
            }],
        }
    }

    fn current(&self) -> ScopeId {
        self.stack.last().map_or(ScopeId::ROOT, |open| open.id)
    }

    fn feed(&mut self, line: &str, span: Span) {
        let split = lexer::split_line(line);

        if split.unterminated_quote {
            self.warn(WarningKind::UnterminatedQuote, span);
        }

        if split.is_comment_only() {
            let text = split.comment.unwrap_or_default();
            let scope = self.current();
            self.document.push_line(scope, Line::comment(&text));
            return;
        }

        if split.closes_scope {
            self.close(span);
            return;
        }

        // Only the first line or scope built from this line gets the comment.
        let mut comment = split.comment;

        for fragment in &split.fragments {
            let words = lexer::words(fragment);
            let Some((&name, rest)) = words.split_first() else {
                continue;
            };
            let comments: Vec<String> = comment.take().into_iter().collect();

            if fragment.ends_with('{') {
                self.open(&words, comments, span);
            } else {
                let mut statement = Line::directive(name);
                statement.arguments = rest.iter().map(ToString::to_string).collect();
                statement.comments = comments;
                let scope = self.current();
                self.document.push_line(scope, statement);
            }
        }
    }

    fn open(&mut self, words: &[&str], comments: Vec<String>, span: Span) {
        let (name, arguments) = scope_header(words);
        let parent = self.current();
        let id = self
            .document
            .open_scope(parent, &name, arguments, comments);

        tracing::trace!(
            line = span.line,
            depth = self.stack.len(),
            "opened block '{name}'"
        );
        self.stack.push(OpenScope {
            id,
            opened_at: Some(span),
        });
    }

    fn close(&mut self, span: Span) {
        if self.stack.len() > 1 {
            if let Some(open) = self.stack.pop() {
                tracing::trace!(
                    line = span.line,
                    "closed block '{}'",
                    self.document[open.id].name
                );
            }
        } else {
            self.warn(WarningKind::StrayCloseBrace, span);
        }
    }

    fn warn(&mut self, kind: WarningKind, span: Span) {
        tracing::warn!(
            source = self.document.source(),
            line = span.line,
            "{kind}"
        );
        self.document.push_warning(Warning { kind, span });
    }

    fn finish(mut self) -> Document {
        let unclosed: Vec<OpenScope> = self.stack.drain(1..).collect();
        for open in unclosed {
            if let Some(span) = open.opened_at {
                let name = self.document[open.id].name.clone();
                self.warn(WarningKind::UnclosedScope { name }, span);
            }
        }

        tracing::debug!(
            source = self.document.source(),
            scopes = self.document.scope_count(),
            warnings = self.document.warnings().len(),
            "parsed configuration"
        );
        self.document
    }
}

/// Split the words of a `{`-terminated fragment into name and arguments.
///
/// The brace is cut from the last word, which is dropped if nothing
/// else remains of it. A lone `{` yields an empty name.
fn scope_header(words: &[&str]) -> (String, Vec<String>) {
    let mut words = words.to_vec();
    if let Some(last) = words.pop() {
        let stripped = last.strip_suffix('{').unwrap_or(last);
        if !stripped.is_empty() || words.is_empty() {
            words.push(stripped);
        }
    }

    let mut iter = words.into_iter().map(str::to_string);
    let name = iter.next().unwrap_or_default();
    (name, iter.collect())
}
