#![allow(dead_code)]

use nginxconf_rs::{Document, LineKind, ScopeId, format, parse_str};

/// One entry per line, in source order, descending into blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub depth: usize,
    pub kind: &'static str,
    pub name: String,
    pub arguments: Vec<String>,
}

/// Structural outline of a document, ignoring comment texts.
pub fn outline(doc: &Document) -> Vec<Entry> {
    let mut entries = Vec::new();
    collect(doc, ScopeId::ROOT, 0, &mut entries);
    entries
}

fn collect(doc: &Document, id: ScopeId, depth: usize, entries: &mut Vec<Entry>) {
    for line in &doc[id].lines {
        let kind = match line.kind {
            LineKind::Comment => "comment",
            LineKind::Include => "include",
            LineKind::Directive => "directive",
            LineKind::BlockStart(_) => "block",
        };
        entries.push(Entry {
            depth,
            kind,
            name: line.name.clone(),
            arguments: line.arguments.clone(),
        });
        if let LineKind::BlockStart(child) = line.kind {
            collect(doc, child, depth + 1, entries);
        }
    }
}

/// Parse then format should reproduce the input exactly.
pub fn roundtrip(input: &str) {
    let doc = parse_str("roundtrip.conf", input);
    let output = format(&doc);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Format, re-parse, and compare outlines.
pub fn assert_structure_roundtrip(original: &Document) {
    let formatted = format(original);
    let reparsed = parse_str(original.source(), &formatted);
    assert_eq!(
        outline(original),
        outline(&reparsed),
        "structure mismatch\n--- formatted ---\n{formatted}"
    );
}

/// Every `BlockStart` line matches the child at the same position.
pub fn assert_blocks_match_children(doc: &Document) {
    for id in doc.walk() {
        let scope = &doc[id];
        let starts: Vec<ScopeId> = scope.lines.iter().filter_map(|l| l.block()).collect();
        assert_eq!(starts, scope.children, "scope '{}'", scope.name);
        for line in scope.lines.iter().filter(|l| l.block().is_some()) {
            let child = &doc[line.block().unwrap()];
            assert_eq!(line.name, child.name);
            assert_eq!(line.arguments, child.arguments);
            assert_eq!(child.parent, Some(id));
        }
    }
}

/// Shorthand for building expected outline entries.
pub fn entry(depth: usize, kind: &'static str, name: &str, arguments: &[&str]) -> Entry {
    Entry {
        depth,
        kind,
        name: name.to_string(),
        arguments: arguments.iter().map(ToString::to_string).collect(),
    }
}
