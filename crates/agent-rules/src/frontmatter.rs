//! Frontmatter extraction for agent definition files.
//!
//! Agent files carry a small YAML-like header between two `---` lines.
//! The header is not parsed as YAML: real agent files routinely contain
//! descriptions that are not valid YAML (unescaped colons, `<example>`
//! tags, stray quotes), so a forgiving line scanner is used instead.
//!
//! # Example
//!
//! ```
//! use agent_rules::frontmatter::parse_frontmatter;
//!
//! let doc = parse_frontmatter("---\nname: reviewer\ncolor: \"blue\"\n---\n\nYou review code.\n");
//! assert_eq!(doc.metadata["name"], "reviewer");
//! assert_eq!(doc.metadata["color"], "blue");
//! assert_eq!(doc.body, "You review code.");
//! ```

use indexmap::IndexMap;

/// Ordered key/value pairs from a frontmatter block.
///
/// Keys keep their first-seen position; a repeated key overwrites the value.
pub type Metadata = IndexMap<String, String>;

/// Delimiter line that opens and closes the metadata block.
pub const DELIMITER: &str = "---";

/// Marker that introduces a multi-line block scalar value.
pub const BLOCK_SCALAR_MARKER: char = '|';

/// Marker that introduces a sequence item line.
pub const SEQUENCE_MARKER: char = '-';

/// Top-level keys that terminate a block scalar.
pub const TOP_LEVEL_KEYS: &[&str] = &["name:", "description:", "color:", "tools:"];

/// A document split into its metadata block and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// Parsed metadata. Empty when the document has no frontmatter.
    pub metadata: Metadata,
    /// The trimmed text following the metadata block.
    pub body: String,
}

/// A forward-only cursor over an indexed sequence of lines.
///
/// Parsing functions take the cursor by `&mut` and leave it positioned at
/// the first line they did not consume.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Creates a cursor positioned at the first line.
    #[must_use]
    pub fn new(lines: &'a [&'a str]) -> Self {
        Self { lines, pos: 0 }
    }

    /// Index of the next line to be consumed.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the next line without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Returns `true` once every line has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.lines.len()
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }
}

/// Splits a document into metadata and body.
///
/// Without an opening `---` line, or without a matching closing `---`
/// line, the metadata is empty and the body is the whole trimmed text.
#[must_use]
pub fn parse_frontmatter(content: &str) -> Frontmatter {
    let content = content.replace("\r\n", "\n");
    let lines: Vec<&str> = content.trim_start().lines().collect();

    let opens = lines.first().is_some_and(|l| l.trim_end() == DELIMITER);
    let close = lines
        .iter()
        .skip(1)
        .position(|l| l.trim() == DELIMITER)
        .map(|i| i + 1);

    match close {
        Some(close) if opens => Frontmatter {
            metadata: parse_metadata(&lines[1..close]),
            body: lines[close + 1..].join("\n").trim().to_string(),
        },
        _ => Frontmatter {
            metadata: Metadata::new(),
            body: content.trim().to_string(),
        },
    }
}

/// Parses the lines of a metadata block (delimiters excluded).
#[must_use]
pub fn parse_metadata(lines: &[&str]) -> Metadata {
    let mut cursor = LineCursor::new(lines);
    let mut metadata = Metadata::new();
    while !cursor.is_exhausted() {
        if let Some((key, value)) = parse_entry(&mut cursor) {
            metadata.insert(key, value);
        }
    }
    metadata
}

/// Consumes one entry from the cursor.
///
/// Returns `None` when the current line has no `:` (the line is still
/// consumed) or when the cursor is exhausted.
pub fn parse_entry(cursor: &mut LineCursor<'_>) -> Option<(String, String)> {
    let line = cursor.next()?;
    let (key, value) = line.split_once(':')?;
    let value = value.trim();

    let value = if value.starts_with(BLOCK_SCALAR_MARKER) {
        read_block_scalar(cursor)
    } else if value.is_empty() {
        read_sequence(cursor)
    } else {
        unquote(value).to_string()
    };

    Some((key.trim().to_string(), value))
}

/// Strips one pair of matching single or double quotes.
///
/// Values with mismatched or missing quotes are returned unchanged.
#[must_use]
pub fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn read_block_scalar(cursor: &mut LineCursor<'_>) -> String {
    let mut collected = Vec::new();
    while let Some(line) = cursor.peek() {
        if ends_block_scalar(line) {
            break;
        }
        collected.push(line);
        cursor.next();
    }
    collected.join("\n").trim().to_string()
}

// Indentation is ignored: an indented `- x` or `  name:` line also ends
// the block.
fn ends_block_scalar(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with(SEQUENCE_MARKER) || TOP_LEVEL_KEYS.iter().any(|key| line.starts_with(key))
}

// `key:` followed by `- item` lines, e.g. a tools list. Items are joined
// into the comma-separated form used by single-line values.
fn read_sequence(cursor: &mut LineCursor<'_>) -> String {
    let mut items = Vec::new();
    while let Some(item) = cursor
        .peek()
        .and_then(|line| line.trim_start().strip_prefix(SEQUENCE_MARKER))
    {
        let item = unquote(item.trim());
        if !item.is_empty() {
            items.push(item);
        }
        cursor.next();
    }
    items.join(", ")
}
