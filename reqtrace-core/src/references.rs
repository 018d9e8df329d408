//! Parsing of parent and functional-child references out of free-text cells
//!
//! The two grammars anchor differently. A parent cell carries at least one
//! free-text line before the reference, and the reference text runs to the
//! end of the cell. A child cell holds one reference per line.

use regex::Regex;
use std::sync::LazyLock;

static PARENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A.*\n(\w+-\w+-\d+):(.*)\z").expect("parent regex is valid")
});

static CHILD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+-\w+-\d+):(.*)").expect("child regex is valid"));

static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+-\w+-\d+$").expect("id regex is valid"));

/// A requirement identifier together with the description that followed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub id: String,
    pub text: String,
}

/// Returns true if `s` is a whole identifier such as `SYS-FUNC-001`
pub fn is_requirement_id(s: &str) -> bool {
    ID_REGEX.is_match(s)
}

/// Parses a `Parent` cell.
///
/// The reference is the last line that starts with `ID:` and follows at
/// least one other line. Everything after the colon up to the end of the
/// cell, trimmed, becomes the text. A cell holding only `ID: text` on its
/// first line has no parent reference.
pub fn parse_parent_reference(cell: &str) -> Option<Reference> {
    let caps = PARENT_REGEX.captures(cell)?;
    Some(Reference {
        id: caps[1].to_string(),
        text: caps[2].trim().to_string(),
    })
}

/// Parses a `Functional Child` cell, one reference per line.
/// Lines that do not start with `ID:` are skipped.
pub fn parse_child_references(cell: &str) -> Vec<Reference> {
    cell.lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            CHILD_REGEX.captures(line).map(|caps| Reference {
                id: caps[1].to_string(),
                text: caps[2].trim().to_string(),
            })
        })
        .collect()
}
