use super::*;
use crate::lexer::{Line, LineKind};

pub(super) fn parse_document(parser: &mut Parser) -> Result<Document, ConfigError> {
    while let Some(line) = parser.lexer.next_line()? {
        parser.close_scopes(line.indent);

        match line.kind {
            LineKind::Block { name, id: None } => {
                open_block(parser, name, &line);
            }
            LineKind::Block { name, id: Some(id) } => {
                open_instance(parser, name, id, &line)?;
            }
            LineKind::Assign { key, value } => {
                let value = value::parse_value(value);
                parser.current().insert(key.to_string(), value);
            }
            LineKind::Blank => {}
        }
    }

    Ok(parser.finish())
}

/// `NAME:` replaces whatever `NAME` held in the current scope.
fn open_block(parser: &mut Parser, name: &str, line: &Line) {
    // Reserve the key's position now; the finished mapping replaces it on close.
    parser
        .current()
        .insert(name.to_string(), Value::Mapping(Mapping::new()));
    parser.push_scope(line.indent, Slot::Key(name.to_string()));
}

/// `NAME IDENTIFIER:` adds an instance to the group container at `NAME`.
fn open_instance(parser: &mut Parser, name: &str, id: &str, line: &Line) -> Result<(), ConfigError> {
    let slot = parser
        .current()
        .entry(name.to_string())
        .or_insert_with(|| Value::Mapping(Mapping::grouped()));
    let existing = slot.type_name();

    let Value::Mapping(container) = slot else {
        return Err(ConfigError::StructuralConflict {
            name: name.to_string(),
            line: line.number,
            text: line.raw.to_string(),
            hint: Some(format!(
                "'{}' is already assigned a {}; rename the block or the key",
                name, existing
            )),
            code: Some(201),
        });
    };

    container.set_grouped(true);
    container.insert(id.to_string(), Value::Mapping(Mapping::new()));

    parser.push_scope(
        line.indent,
        Slot::Instance {
            group: name.to_string(),
            id: id.to_string(),
        },
    );
    Ok(())
}
