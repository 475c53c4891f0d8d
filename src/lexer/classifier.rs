use once_cell::sync::Lazy;
use regex::Regex;

use super::LineKind;

static BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<name>[A-Za-z0-9_.]+)(?:\s+(?P<id>[A-Za-z0-9_.]+))?:\s*$")
        .expect("block header pattern")
});

static ASSIGN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:SET\s+)?(?P<key>[A-Za-z0-9_.]+)\s*=(?P<value>.*)$")
        .expect("assignment pattern")
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.]+$").expect("identifier pattern"));

/// Classify one physical line, or `None` when it has no valid shape.
pub fn classify(line: &str) -> Option<LineKind<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
        return Some(LineKind::Blank);
    }

    if let Some(caps) = BLOCK.captures(line) {
        let name = caps.name("name")?.as_str();
        let id = caps.name("id").map(|m| m.as_str());
        return Some(LineKind::Block { name, id });
    }

    if let Some(caps) = ASSIGN.captures(line) {
        let key = caps.name("key")?.as_str();
        let value = caps.name("value")?.as_str();
        return Some(LineKind::Assign { key, value });
    }

    None
}

/// Whether `s` is usable as a key, block name or block identifier.
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}
