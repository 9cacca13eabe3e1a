/// Source location for warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// 1-based physical line number, blank lines included.
    pub line: usize,
}

/// Quote tracking state shared by comment extraction and fragment splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteState {
    /// Not inside a quoted span.
    Outside,
    /// Inside a span opened by the given quote character.
    Inside(char),
}

impl QuoteState {
    /// Advance the state over one character.
    ///
    /// A quote opens only while outside, and closes only on the
    /// character that opened it.
    #[must_use]
    pub const fn step(self, ch: char) -> Self {
        match (self, ch) {
            (Self::Outside, '\'' | '"') => Self::Inside(ch),
            (Self::Inside(open), c) if c == open => Self::Outside,
            (state, _) => state,
        }
    }

    #[must_use]
    pub const fn is_quoted(self) -> bool {
        matches!(self, Self::Inside(_))
    }
}

/// One physical line after comment extraction and fragment splitting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitLine {
    /// Text after the first unquoted `#`, trimmed.
    pub comment: Option<String>,
    /// Directive fragments in source order. A scope-opening fragment
    /// keeps its trailing `{` and is always last.
    pub fragments: Vec<String>,
    /// A quote was still open at end of line.
    pub unterminated_quote: bool,
    /// The line, minus its comment, is exactly `}`.
    pub closes_scope: bool,
}

impl SplitLine {
    /// The line carried nothing but a comment.
    #[must_use]
    pub fn is_comment_only(&self) -> bool {
        self.fragments.is_empty() && self.comment.is_some() && !self.closes_scope
    }
}
