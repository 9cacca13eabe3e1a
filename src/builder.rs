//! Fluent construction of documents without going through text.

use crate::ast::{Document, Line, ScopeId};

#[derive(Debug, Clone)]
enum Item {
    Line(Line),
    Scope(ScopeBuilder),
}

/// Builds a `Document` top-down.
///
/// ```
/// use nginxconf_rs::{DocumentBuilder, ScopeBuilder, format};
///
/// let doc = DocumentBuilder::new("nginx.conf")
///     .directive("worker_processes", &["auto"])
///     .scope(ScopeBuilder::new("http").scope(
///         ScopeBuilder::new("server").directive("listen", &["80"]),
///     ))
///     .build();
///
/// assert!(format(&doc).contains("    listen 80;"));
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    source: String,
    items: Vec<Item>,
}

impl DocumentBuilder {
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            items: Vec::new(),
        }
    }

    /// Add a line to the root scope.
    #[must_use]
    pub fn line(mut self, line: Line) -> Self {
        self.items.push(Item::Line(line));
        self
    }

    /// Add a directive with arguments to the root scope.
    #[must_use]
    pub fn directive(self, name: &str, args: &[&str]) -> Self {
        self.line(with_args(Line::directive(name), args))
    }

    /// Add an `include` line to the root scope.
    #[must_use]
    pub fn include(self, path: &str) -> Self {
        self.line(Line::include(path))
    }

    /// Add a comment-only line to the root scope.
    #[must_use]
    pub fn comment(self, text: &str) -> Self {
        self.line(Line::comment(text))
    }

    /// Add a child scope to the root.
    #[must_use]
    pub fn scope(mut self, scope: ScopeBuilder) -> Self {
        self.items.push(Item::Scope(scope));
        self
    }

    #[must_use]
    pub fn build(self) -> Document {
        let mut document = Document::new(self.source);
        emit(&mut document, ScopeId::ROOT, self.items);
        document
    }
}

/// A scope under construction.
#[derive(Debug, Clone)]
pub struct ScopeBuilder {
    name: String,
    arguments: Vec<String>,
    comments: Vec<String>,
    items: Vec<Item>,
}

impl ScopeBuilder {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            arguments: Vec::new(),
            comments: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Add an argument to the scope header.
    #[must_use]
    pub fn arg(mut self, value: &str) -> Self {
        self.arguments.push(value.to_string());
        self
    }

    /// Attach a comment to the scope header.
    #[must_use]
    pub fn with_comment(mut self, text: &str) -> Self {
        self.comments.push(text.to_string());
        self
    }

    #[must_use]
    pub fn line(mut self, line: Line) -> Self {
        self.items.push(Item::Line(line));
        self
    }

    #[must_use]
    pub fn directive(self, name: &str, args: &[&str]) -> Self {
        self.line(with_args(Line::directive(name), args))
    }

    #[must_use]
    pub fn include(self, path: &str) -> Self {
        self.line(Line::include(path))
    }

    #[must_use]
    pub fn comment(self, text: &str) -> Self {
        self.line(Line::comment(text))
    }

    #[must_use]
    pub fn scope(mut self, child: Self) -> Self {
        self.items.push(Item::Scope(child));
        self
    }
}

fn with_args(line: Line, args: &[&str]) -> Line {
    args.iter().fold(line, |line, arg| line.arg(arg))
}

/// An unnamed scope with arguments takes its first argument as name,
/// which is how the same header reads back from text.
fn header(name: String, mut arguments: Vec<String>) -> (String, Vec<String>) {
    if name.is_empty() && !arguments.is_empty() {
        let name = arguments.remove(0);
        return (name, arguments);
    }
    (name, arguments)
}

fn emit(document: &mut Document, parent: ScopeId, items: Vec<Item>) {
    for item in items {
        match item {
            Item::Line(line) => document.push_line(parent, line),
            Item::Scope(scope) => {
                let (name, arguments) = header(scope.name, scope.arguments);
                let id = document.open_scope(parent, &name, arguments, scope.comments);
                emit(document, id, scope.items);
            }
        }
    }
}
