use std::ops::Index;

use crate::parser::Warning;

/// Name of the root scope. Contains whitespace, so no word-tokenized
/// directive name can collide with it.
pub const ROOT_SCOPE_NAME: &str = "<document root>";

/// Directive name that marks a file inclusion.
pub const INCLUDE_DIRECTIVE: &str = "include";

/// Handle of a scope inside its `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The root scope of every document.
    pub const ROOT: Self = Self(0);

    /// Position in the document's scope arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Comment on a line of its own.
    Comment,
    /// `include` directive; the target is recorded, never loaded.
    Include,
    /// Any other directive.
    Directive,
    /// Opening line of the given child scope.
    BlockStart(ScopeId),
}

/// A single statement inside a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    /// First word of the statement; empty for comment lines.
    pub name: String,
    pub arguments: Vec<String>,
    pub comments: Vec<String>,
}

impl Line {
    /// Comment-only line.
    #[must_use]
    pub fn comment(text: &str) -> Self {
        Self {
            kind: LineKind::Comment,
            name: String::new(),
            arguments: Vec::new(),
            comments: vec![text.to_string()],
        }
    }

    /// Directive line. Named `include`, it is classified as an include.
    #[must_use]
    pub fn directive(name: &str) -> Self {
        let kind = if name == INCLUDE_DIRECTIVE {
            LineKind::Include
        } else {
            LineKind::Directive
        };
        Self {
            kind,
            name: name.to_string(),
            arguments: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// `include <path>` line.
    #[must_use]
    pub fn include(path: &str) -> Self {
        Self::directive(INCLUDE_DIRECTIVE).arg(path)
    }

    /// Append an argument.
    #[must_use]
    pub fn arg(mut self, value: &str) -> Self {
        self.arguments.push(value.to_string());
        self
    }

    /// Attach a comment.
    #[must_use]
    pub fn with_comment(mut self, text: &str) -> Self {
        self.comments.push(text.to_string());
        self
    }

    /// Child scope this line opens, if any.
    #[must_use]
    pub const fn block(&self) -> Option<ScopeId> {
        match self.kind {
            LineKind::BlockStart(id) => Some(id),
            _ => None,
        }
    }
}

/// A named `{ ... }` container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub name: String,
    pub arguments: Vec<String>,
    /// Lines in source order, including one `BlockStart` per child.
    pub lines: Vec<Line>,
    /// Child scopes in source order.
    pub children: Vec<ScopeId>,
    pub comments: Vec<String>,
    /// Enclosing scope; `None` only for the root.
    pub parent: Option<ScopeId>,
}

impl Scope {
    fn new(
        name: String,
        arguments: Vec<String>,
        comments: Vec<String>,
        parent: Option<ScopeId>,
    ) -> Self {
        Self {
            name,
            arguments,
            lines: Vec::new(),
            children: Vec::new(),
            comments,
            parent,
        }
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A parsed configuration: scope arena plus the source it came from.
///
/// Scopes are owned by the arena and refer to each other by
/// `ScopeId`. The tree shape lives in `Scope::children`; the
/// `parent` links are plain lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source: String,
    scopes: Vec<Scope>,
    warnings: Vec<Warning>,
}

impl Document {
    /// Empty document holding only the root scope.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            scopes: vec![Scope::new(
                ROOT_SCOPE_NAME.to_string(),
                Vec::new(),
                Vec::new(),
                None,
            )],
            warnings: Vec::new(),
        }
    }

    /// Path or name the document was read from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn root(&self) -> &Scope {
        &self.scopes[ScopeId::ROOT.0]
    }

    /// Look up a scope; `None` for handles from another document.
    #[must_use]
    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0)
    }

    /// Child scopes of `id` in source order.
    pub fn children(&self, id: ScopeId) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.get(id)
            .into_iter()
            .flat_map(|scope| scope.children.iter())
            .map(|&child| (child, &self[child]))
    }

    #[must_use]
    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).and_then(|scope| scope.parent)
    }

    /// Enclosing scopes of `id`, innermost first, ending at the root.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(self.parent(id), |&up| self.parent(up))
    }

    /// Nesting depth; the root is at depth 0.
    #[must_use]
    pub fn depth(&self, id: ScopeId) -> usize {
        self.ancestors(id).count()
    }

    /// All scopes, depth-first, parents before children.
    #[must_use]
    pub fn walk(&self) -> Vec<ScopeId> {
        let mut order = Vec::with_capacity(self.scopes.len());
        let mut pending = vec![ScopeId::ROOT];
        while let Some(id) = pending.pop() {
            order.push(id);
            pending.extend(self[id].children.iter().rev());
        }
        order
    }

    /// Number of scopes, root included.
    #[must_use]
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Non-fatal structural problems noticed while parsing.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Append a line to `scope`.
    ///
    /// `BlockStart` lines are only created by `open_scope`; one passed
    /// here is dropped, since it would have no matching child.
    pub fn push_line(&mut self, scope: ScopeId, line: Line) {
        if line.block().is_some() {
            tracing::debug!(name = %line.name, "ignored block line without a scope");
            return;
        }
        self.scopes[scope.0].lines.push(line);
    }

    /// Create a child scope of `parent`.
    ///
    /// Records the child and its `BlockStart` line in the parent
    /// together, so lines and children stay in step.
    pub fn open_scope(
        &mut self,
        parent: ScopeId,
        name: &str,
        arguments: Vec<String>,
        comments: Vec<String>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(
            name.to_string(),
            arguments.clone(),
            comments.clone(),
            Some(parent),
        ));

        let owner = &mut self.scopes[parent.0];
        owner.children.push(id);
        owner.lines.push(Line {
            kind: LineKind::BlockStart(id),
            name: name.to_string(),
            arguments,
            comments,
        });
        id
    }

    pub(crate) fn push_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}

impl Index<ScopeId> for Document {
    type Output = Scope;

    fn index(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }
}
