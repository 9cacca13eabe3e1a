//! Lenient parser for nginx-style configuration files.
//!
//! Turns block-structured configuration text (`;`-terminated
//! directives, `{ }` blocks, `#` comments, quoted strings) into a
//! scope tree, and renders that tree back as configuration text or
//! as a tree view.
//!
//! # Quick start
//!
//! ## Parse and re-format
//!
//! ```
//! use nginxconf_rs::{format, parse_str};
//!
//! let input = "http {\n  server {\n    listen 80;\n  }\n}\n";
//! let doc = parse_str("nginx.conf", input);
//! assert_eq!(format(&doc), input);
//! ```
//!
//! ## Inspect the tree
//!
//! ```
//! use nginxconf_rs::{LineKind, ScopeId, parse_str};
//!
//! let input = "events {\n  worker_connections 512;\n}\ninclude mime.types;\n";
//! let doc = parse_str("nginx.conf", input);
//! let (_, events) = doc.children(ScopeId::ROOT).next().unwrap();
//! assert_eq!(events.name, "events");
//! assert_eq!(doc.root().lines[1].kind, LineKind::Include);
//! ```
//!
//! Malformed input never fails to parse. Unbalanced braces and open
//! quotes are kept in the tree as written and reported through
//! `Document::warnings`.

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod tree;

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

pub use ast::{Document, INCLUDE_DIRECTIVE, Line, LineKind, ROOT_SCOPE_NAME, Scope, ScopeId};
pub use builder::{DocumentBuilder, ScopeBuilder};
pub use formatter::format;
pub use lexer::split_line;
pub use parser::{Warning, WarningKind, parse, parse_lines};
pub use token::{Span, SplitLine};
pub use tree::render_tree;

/// Failure to obtain the configuration text.
///
/// Structural problems in the text are never errors; see `Warning`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source could not be read.
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Parse configuration text held in memory.
#[must_use]
pub fn parse_str(source: &str, input: &str) -> Document {
    parse(source, input)
}

/// Read every line from `reader`, then parse them.
///
/// A read error aborts before any line is parsed. Bytes that are not
/// valid UTF-8 are replaced rather than rejected.
pub fn parse_reader<R: BufRead>(source: &str, reader: R) -> Result<Document, Error> {
    let mut lines = Vec::new();
    for raw in reader.split(b'\n') {
        let mut raw = raw.map_err(|source_err| Error::Io {
            path: source.to_string(),
            source: source_err,
        })?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        lines.push(String::from_utf8_lossy(&raw).into_owned());
    }
    let lines = strip_bom(lines);
    Ok(parse_lines(source, &lines))
}

/// Read and parse a configuration file.
///
/// Like `parse_reader`, invalid UTF-8 is replaced, never an error.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document, Error> {
    let path = path.as_ref();
    let name = path.display().to_string();
    tracing::debug!(path = %name, "reading configuration");

    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: name.clone(),
        source,
    })?;
    Ok(parse(&name, &String::from_utf8_lossy(&bytes)))
}

fn strip_bom(mut lines: Vec<String>) -> Vec<String> {
    if let Some(first) = lines.first_mut() {
        if let Some(rest) = first.strip_prefix('\u{FEFF}') {
            *first = rest.to_string();
        }
    }
    lines
}
