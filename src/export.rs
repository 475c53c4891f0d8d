// Author: Dustin Pilgrim
// License: MIT

use std::fs;

use crate::ast::Document;
use crate::ConfigError;

/// Export a SimpleConfig document to pretty-printed JSON.
///
/// Values map as follows:
/// - strings, numbers, booleans, null → direct mapping
/// - timestamps → RFC 3339 strings in UTC (`1979-05-27T15:32:00Z`)
/// - lists → arrays
/// - blocks and grouping blocks → objects, keys in file order
///
/// # Examples
/// ```
/// use simple_cfg::{export::document_to_json, parse};
///
/// let doc = parse("SERVER web:\n  port = 8080\n").unwrap();
/// let json = document_to_json(&doc).unwrap();
/// assert!(json.contains("\"port\": 8080"));
/// ```
pub fn document_to_json(doc: &Document) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(doc).map_err(|e| ConfigError::ConstructionError {
        key: String::new(),
        message: format!("Failed to encode JSON: {}", e),
        hint: None,
        code: Some(510),
    })
}

/// Export a SimpleConfig file directly to JSON.
///
/// Convenience function that reads, parses, and exports in one call.
///
/// # Errors
/// Returns error if the file doesn't exist or contains invalid syntax.
pub fn export_file(path: &str) -> Result<String, ConfigError> {
    let input = fs::read_to_string(path).map_err(|e| ConfigError::FileError {
        message: format!("Failed to read file: {}", e),
        path: path.to_string(),
        hint: Some("Check that the file exists and is readable".into()),
        code: Some(301),
    })?;

    let doc = crate::parse(&input)?;
    document_to_json(&doc)
}
