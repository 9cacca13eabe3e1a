//! End-to-end tests over a realistic configuration file.

mod common;

use std::io::{self, BufReader, Cursor, Read};

use common::{assert_blocks_match_children, assert_structure_roundtrip};
use nginxconf_rs::{Error, LineKind, ScopeId, format, parse_file, parse_reader, parse_str, render_tree};

const NGINX_CONF: &str = r#"
user  nginx;
worker_processes  auto;   # one per core

error_log  /var/log/nginx/error.log notice;
pid        /var/run/nginx.pid;

events {
    worker_connections  1024;
}

http {
    include       /etc/nginx/mime.types;
    default_type  application/octet-stream;

    log_format  main  '$remote_addr - $remote_user [$time_local] "$request" '
                      '$status $body_bytes_sent "$http_referer"';

    access_log  /var/log/nginx/access.log  main;
    sendfile        on;  tcp_nopush on;

    # upstream pool
    upstream app {
        server 127.0.0.1:3000 weight=5;
        server 127.0.0.1:3001;
    }

    server {
        listen       80;
        server_name  example.com www.example.com;

        location / {
            proxy_pass http://app;
            add_header X-Note "a;b#c";
        }

        location ~ \.php$ {
            return 403;
        }
    }

    include /etc/nginx/conf.d/*.conf;
}
"#;

#[test]
fn realistic_config_shape() {
    let doc = parse_str("nginx.conf", NGINX_CONF);
    assert!(doc.warnings().is_empty(), "{:?}", doc.warnings());
    assert_eq!(doc.scope_count(), 7);
    assert_blocks_match_children(&doc);

    let names: Vec<_> = doc.children(ScopeId::ROOT).map(|(_, s)| s.name.as_str()).collect();
    assert_eq!(names, vec!["events", "http"]);

    let root = doc.root();
    assert_eq!(root.lines[1].name, "worker_processes");
    assert_eq!(root.lines[1].comments, vec!["one per core"]);

    let http = doc.root().children[1];
    let http_lines = &doc[http].lines;
    assert_eq!(http_lines[0].kind, LineKind::Include);
    assert_eq!(http_lines.last().map(|l| l.kind), Some(LineKind::Include));

    // A log_format continued on the next line is two separate lines.
    let continued = http_lines
        .iter()
        .find(|l| l.name.starts_with('\''))
        .expect("continuation line");
    assert_eq!(continued.name, "'$status");
    assert_eq!(continued.arguments.len(), 2);

    // Two directives on one line.
    assert!(http_lines.iter().any(|l| l.name == "sendfile"));
    assert!(http_lines.iter().any(|l| l.name == "tcp_nopush"));

    let comment = http_lines
        .iter()
        .find(|l| l.kind == LineKind::Comment)
        .expect("comment line");
    assert_eq!(comment.comments, vec!["upstream pool"]);
}

#[test]
fn realistic_config_locations() {
    let doc = parse_str("nginx.conf", NGINX_CONF);
    let http = doc.root().children[1];
    let (server, _) = doc
        .children(http)
        .find(|(_, s)| s.name == "server")
        .expect("server block");

    let locations: Vec<_> = doc.children(server).map(|(_, s)| s.arguments.clone()).collect();
    assert_eq!(locations, vec![vec!["/".to_string()], vec!["~".to_string(), "\\.php$".to_string()]]);

    let (root_location, _) = doc.children(server).next().expect("location /");
    let header = &doc[root_location].lines[1];
    assert_eq!(header.name, "add_header");
    assert_eq!(header.arguments, vec!["X-Note", "\"a;b#c\""]);
    assert_eq!(doc.depth(root_location), 3);
}

#[test]
fn realistic_config_roundtrip() {
    let doc = parse_str("nginx.conf", NGINX_CONF);
    assert_structure_roundtrip(&doc);

    let once = format(&doc);
    let twice = format(&parse_str("nginx.conf", &once));
    assert_eq!(once, twice);
}

#[test]
fn realistic_config_tree_view() {
    let doc = parse_str("nginx.conf", NGINX_CONF);
    let tree = render_tree(&doc);
    assert!(tree.starts_with("Configuration File: nginx.conf\n└── Root\n"));
    assert!(tree.contains("    ├── Directive: worker_processes auto\n    │   └── Comment: one per core\n"));
    assert!(tree.contains("    ├── Block: events {}\n"));
    assert!(tree.contains("    └── Block: http {}\n"));
    assert!(tree.contains("Include: include /etc/nginx/mime.types"));
    assert!(tree.contains("Block: location ~ \\.php$ {}"));
}

// -----------------------------------------------------------
// Reading sources.
// -----------------------------------------------------------

#[test]
fn parse_file_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("nginxconf-rs-e2e-{}.conf", std::process::id()));
    std::fs::write(&path, "events {\n  worker_connections 64;\n}\n").expect("write temp file");

    let doc = parse_file(&path).expect("parse file");
    let _ = std::fs::remove_file(&path);

    assert_eq!(doc.source(), path.display().to_string());
    assert_eq!(doc.scope_count(), 2);
}

#[test]
fn parse_file_missing_is_io_error() {
    let err = parse_file("/definitely/not/here/nginx.conf").unwrap_err();
    let Error::Io { path, source } = &err;
    assert_eq!(path, "/definitely/not/here/nginx.conf");
    assert_eq!(source.kind(), io::ErrorKind::NotFound);
    assert!(err.to_string().starts_with("/definitely/not/here/nginx.conf: "));
}

#[test]
fn parse_reader_strips_bom() {
    let doc = parse_reader("mem", Cursor::new("\u{FEFF}user www;\n")).expect("parse");
    assert_eq!(doc.root().lines[0].name, "user");
}

struct FailAfterFirstLine {
    served: bool,
}

impl Read for FailAfterFirstLine {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::other("disk gone"));
        }
        self.served = true;
        let data = b"user www;\n";
        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }
}

#[test]
fn parse_reader_failure_aborts() {
    let reader = BufReader::new(FailAfterFirstLine { served: false });
    let result = parse_reader("flaky", reader);
    let Err(Error::Io { path, .. }) = result else {
        panic!("expected an I/O error");
    };
    assert_eq!(path, "flaky");
}

#[test]
fn parse_reader_matches_parse_str() {
    let from_reader = parse_reader("x", NGINX_CONF.as_bytes()).expect("parse");
    let from_str = parse_str("x", NGINX_CONF);
    assert_eq!(from_reader, from_str);
}

#[test]
fn parse_file_tolerates_invalid_utf8() {
    let path = std::env::temp_dir().join(format!("nginxconf-rs-latin1-{}.conf", std::process::id()));
    std::fs::write(&path, b"# caf\xe9\nworker_processes 4;\n").expect("write temp file");

    let doc = parse_file(&path).expect("parse file");
    let _ = std::fs::remove_file(&path);

    let lines = &doc.root().lines;
    assert_eq!(lines[0].kind, LineKind::Comment);
    assert_eq!(lines[0].comments, vec!["caf\u{FFFD}"]);
    assert_eq!(lines[1].name, "worker_processes");
    assert_eq!(lines[1].arguments, vec!["4"]);
}

#[test]
fn parse_reader_tolerates_invalid_utf8() {
    let bytes: &[u8] = b"user www; # \xff\xfe\r\nevents {\r\n}\r\n";
    let doc = parse_reader("latin1", bytes).expect("parse");
    assert_eq!(doc.root().lines[0].name, "user");
    assert_eq!(doc.root().lines[0].comments, vec!["\u{FFFD}\u{FFFD}"]);
    assert_eq!(doc.scope_count(), 2);
    assert!(doc.warnings().is_empty());
}
