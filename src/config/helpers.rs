use crate::lexer::{Lexer, LineKind};

/// Find the line that assigns or opens `path` in raw config text.
///
/// Replays indentation the way the parser does so nested and grouped keys
/// resolve to their full dotted path. Falls back to the first line whose key
/// matches the last path segment, and to `(0, "<key not found>")`.
pub(super) fn find_config_line(path: &str, raw_content: &str) -> (usize, String) {
    // (indent, dotted path of the open block)
    let mut scopes: Vec<(usize, String)> = Vec::new();
    let mut by_last_segment: Option<(usize, String)> = None;
    let last_segment = path.rsplit('.').next().unwrap_or(path);

    let mut lexer = Lexer::new(raw_content);
    while let Ok(Some(line)) = lexer.next_line() {
        let (local, opens_scope) = match line.kind {
            LineKind::Block { name, id: Some(id) } => (format!("{}.{}", name, id), true),
            LineKind::Block { name, id: None } => (name.to_string(), true),
            LineKind::Assign { key, .. } => (key.to_string(), false),
            LineKind::Blank => continue,
        };

        while scopes.last().is_some_and(|(top, _)| line.indent <= *top) {
            scopes.pop();
        }

        let full_path = match scopes.last() {
            Some((_, parent)) => format!("{}.{}", parent, local),
            None => local.clone(),
        };

        if full_path == path {
            return (line.number, line.raw.trim().to_string());
        }
        if by_last_segment.is_none() && local.rsplit('.').next() == Some(last_segment) {
            by_last_segment = Some((line.number, line.raw.trim().to_string()));
        }

        if opens_scope {
            scopes.push((line.indent, full_path));
        }
    }

    by_last_segment.unwrap_or((0, "<key not found>".into()))
}
