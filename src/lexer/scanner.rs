use super::*;

/// Advance past the next physical line. `\r\n`, `\r` and `\n` each end one line.
pub(super) fn next_physical<'a>(lexer: &mut Lexer<'a>) -> Option<&'a str> {
    if lexer.finished {
        return None;
    }
    lexer.line += 1;

    let rest = lexer.rest;
    match rest.find(['\r', '\n']) {
        Some(pos) => {
            let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
            lexer.rest = &rest[pos + terminator..];
            Some(&rest[..pos])
        }
        None => {
            lexer.finished = true;
            Some(rest)
        }
    }
}

/// Raw count of leading whitespace characters. A tab counts as one.
pub(super) fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
