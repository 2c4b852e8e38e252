//! Document source: turns XML bytes into an [`Element`] tree.
//!
//! Parsing itself is delegated to `roxmltree`; this module only maps its node
//! tree onto the element view the renderer works with (text before
//! the first child, no tails, comments and processing instructions skipped).

use crate::model::element::{Element, MAX_DEPTH};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Path that selects standard input instead of a file
pub const STDIN_PATH: &str = "-";

/// Errors produced while loading a document
#[derive(Debug)]
pub enum DocumentError {
    /// The source could not be read
    Io { path: PathBuf, message: String },
    /// The source is not well-formed XML
    Parse(String),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::Io { path, message } => {
                write!(f, "Cannot read {}: {message}", path.display())
            }
            DocumentError::Parse(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Parse an XML document and return its root element
pub fn parse(source: &str) -> Result<Element, DocumentError> {
    // roxmltree parses recursively; refuse deep documents before it can
    // run out of stack
    if exceeds_depth(source, MAX_DEPTH) {
        return Err(too_deep());
    }

    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(source, options)
        .map_err(|e| DocumentError::Parse(e.to_string()))?;

    let root = element_from_node(document.root_element(), 1)?;
    tracing::debug!("Parsed document with {} elements", root.subtree_len());
    Ok(root)
}

/// Read and parse a document from `path`, or from stdin when `path` is `-`
pub fn load(path: &Path) -> Result<Element, DocumentError> {
    let source = if path == Path::new(STDIN_PATH) {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| DocumentError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        source
    } else {
        std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    tracing::info!("Loaded {} bytes from {}", source.len(), path.display());
    parse(&source)
}

fn too_deep() -> DocumentError {
    DocumentError::Parse(format!("nesting too deep (more than {MAX_DEPTH} levels)"))
}

/// Position of `pattern` in `bytes` at or after `from`
fn find(bytes: &[u8], from: usize, pattern: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|offset| offset + from)
}

/// Index of the `>` closing a tag, skipping quoted attribute values
fn tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote = None;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i),
            _ => {}
        }
    }
    None
}

/// Index of the `>` closing a `<!DOCTYPE ...>`, including any `[...]` subset
fn declaration_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote = None;
    let mut brackets = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'[') => brackets += 1,
            (None, b']') => brackets = brackets.saturating_sub(1),
            (None, b'>') if brackets == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// True if elements in `source` nest deeper than `limit`.
///
/// A flat scan over the markup; it stops at the first construct it cannot
/// close and leaves the error to the parser.
fn exceeds_depth(source: &str, limit: usize) -> bool {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0;

    while let Some(start) = find(bytes, pos, b"<") {
        let rest = &bytes[start..];
        let end = if rest.starts_with(b"<!--") {
            find(bytes, start + 4, b"-->").map(|i| i + 2)
        } else if rest.starts_with(b"<![CDATA[") {
            find(bytes, start + 9, b"]]>").map(|i| i + 2)
        } else if rest.starts_with(b"<?") {
            find(bytes, start + 2, b"?>").map(|i| i + 1)
        } else if rest.starts_with(b"<!") {
            declaration_end(bytes, start + 2)
        } else if rest.starts_with(b"</") {
            depth = depth.saturating_sub(1);
            tag_end(bytes, start + 2)
        } else {
            let end = tag_end(bytes, start + 1);
            if let Some(end) = end {
                if bytes[end - 1] != b'/' {
                    depth += 1;
                    if depth > limit {
                        return true;
                    }
                }
            }
            end
        };

        match end {
            Some(end) => pos = end + 1,
            None => return false,
        }
    }
    false
}

fn qualified_name(namespace: Option<&str>, local: &str) -> String {
    match namespace {
        Some(uri) => format!("{{{uri}}}{local}"),
        None => local.to_string(),
    }
}

/// Convert `node`, which sits at `depth` (the root is 1)
fn element_from_node(
    node: roxmltree::Node<'_, '_>,
    depth: usize,
) -> Result<Element, DocumentError> {
    if depth > MAX_DEPTH {
        return Err(too_deep());
    }

    let name = node.tag_name();
    let attributes = node
        .attributes()
        .map(|attr| (qualified_name(attr.namespace(), attr.name()), attr.value().to_string()))
        .collect();

    // Only text that precedes the first child element belongs to this element;
    // anything after a child is that child's tail and is not shown.
    let mut text: Option<String> = None;
    for child in node.children() {
        if child.is_element() {
            break;
        }
        if child.is_text() {
            text.get_or_insert_with(String::new)
                .push_str(child.text().unwrap_or_default());
        }
    }

    let children = node
        .children()
        .filter(|child| child.is_element())
        .map(|child| element_from_node(child, depth + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Element {
        tag: qualified_name(name.namespace(), name.name()),
        attributes,
        text,
        children,
    })
}
