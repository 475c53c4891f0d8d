//! Canonical SimpleConfig text output.
//!
//! Every nesting level adds two spaces. Mappings become `KEY:` blocks,
//! grouping containers become one `NAME IDENTIFIER:` block per instance and
//! everything else becomes a `KEY = literal` line. Entries keep insertion order.

use std::fmt::Write;

use chrono::SecondsFormat;

use crate::ast::{Document, Mapping, Value};
use crate::lexer::is_identifier;
use crate::parser::parse_value;
use crate::ConfigError;

const INDENT: &str = "  ";

/// How assignments are spelled. Both forms parse to the same tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// `key = value`
    #[default]
    Plain,
    /// `SET key = value` for root-level assignments.
    Set,
}

/// Render a document in the plain dialect.
///
/// # Examples
/// ```
/// use simple_cfg::{parse, to_string};
///
/// let doc = parse("SERVER web:\n  port = 8080\n").unwrap();
/// assert_eq!(to_string(&doc).unwrap(), "SERVER web:\n  port = 8080\n");
/// ```
///
/// # Errors
/// Returns `ConstructionError` for keys outside `[A-Za-z0-9_.]+` and for
/// values the format cannot express (see [`render_inline`]).
pub fn to_string(doc: &Document) -> Result<String, ConfigError> {
    to_string_with(doc, Dialect::Plain)
}

pub fn to_string_with(doc: &Document, dialect: Dialect) -> Result<String, ConfigError> {
    mapping_to_string(&doc.items, dialect)
}

pub(crate) fn mapping_to_string(mapping: &Mapping, dialect: Dialect) -> Result<String, ConfigError> {
    let mut out = String::new();
    write_mapping(&mut out, mapping, 0, dialect)?;
    Ok(out)
}

impl Document {
    pub fn to_config_string(&self) -> Result<String, ConfigError> {
        to_string(self)
    }
}

fn write_mapping(out: &mut String, mapping: &Mapping, depth: usize, dialect: Dialect) -> Result<(), ConfigError> {
    for (key, value) in mapping {
        check_key(key)?;
        match value {
            Value::Mapping(child) if child.is_grouped() => {
                write_group(out, key, child, depth, dialect)?;
            }
            Value::Mapping(child) => {
                write_header(out, depth, key, None);
                write_mapping(out, child, depth + 1, dialect)?;
            }
            _ => write_assignment(out, depth, key, value, dialect)?,
        }
    }
    Ok(())
}

/// Loose (non-mapping) entries of a container go under a plain `NAME:` header
/// first; the parser reuses that mapping when the instance headers follow.
///
/// Instances are always emitted after every loose entry, so a container that
/// interleaves them comes back in that order. Equality ignores it.
fn write_group(out: &mut String, name: &str, group: &Mapping, depth: usize, dialect: Dialect) -> Result<(), ConfigError> {
    let (instances, loose): (Vec<_>, Vec<_>) = group
        .iter()
        .partition(|(_, v)| matches!(v, Value::Mapping(_)));

    if !loose.is_empty() || instances.is_empty() {
        write_header(out, depth, name, None);
        for (key, value) in loose {
            check_key(key)?;
            write_assignment(out, depth + 1, key, value, dialect)?;
        }
    }

    for (id, instance) in instances {
        check_key(id)?;
        if let Value::Mapping(instance) = instance {
            write_header(out, depth, name, Some(id));
            write_mapping(out, instance, depth + 1, dialect)?;
        }
    }
    Ok(())
}

fn write_header(out: &mut String, depth: usize, name: &str, id: Option<&str>) {
    let pad = INDENT.repeat(depth);
    match id {
        Some(id) => {
            let _ = writeln!(out, "{}{} {}:", pad, name, id);
        }
        None => {
            let _ = writeln!(out, "{}{}:", pad, name);
        }
    }
}

fn write_assignment(out: &mut String, depth: usize, key: &str, value: &Value, dialect: Dialect) -> Result<(), ConfigError> {
    let literal = render_inline(key, value)?;
    let prefix = if depth == 0 && dialect == Dialect::Set { "SET " } else { "" };
    let _ = writeln!(out, "{}{}{} = {}", INDENT.repeat(depth), prefix, key, literal);
    Ok(())
}

pub(crate) fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_identifier(key) {
        Ok(())
    } else {
        Err(ConfigError::construction(
            key,
            format!("'{}' is not a valid key", key),
            "Keys, block names and identifiers may only use letters, digits, '_' and '.'",
            501,
        ))
    }
}

/// Render the right-hand side of `key = ...`.
///
/// Fails for values a re-parse could not reproduce: mappings, lists shorter
/// than two elements, lists holding lists or mappings, strings with a line
/// break, and strings whose quotes would make the line split differently.
pub fn render_inline(key: &str, value: &Value) -> Result<String, ConfigError> {
    match value {
        Value::List(items) => {
            if items.len() < 2 {
                return Err(ConfigError::construction(
                    key,
                    format!("a list of {} element(s) cannot be written", items.len()),
                    "Lists need at least two elements; assign the scalar directly instead",
                    503,
                ));
            }
            let rendered = items
                .iter()
                .map(|item| match item {
                    Value::List(_) | Value::Mapping(_) => Err(ConfigError::construction(
                        key,
                        format!("a {} cannot be nested inside a list", item.type_name()),
                        "Lists are flat; use blocks for nested structure",
                        504,
                    )),
                    scalar => render_scalar(key, scalar),
                })
                .collect::<Result<Vec<_>, _>>()?
                .join(", ");

            // Quotes inside items can pair up across the separators.
            let has_inner_quote = items
                .iter()
                .any(|item| item.as_str().is_some_and(|s| s.contains('"')));
            if has_inner_quote && parse_value(&rendered) != *value {
                return Err(unwritable_string(key));
            }
            Ok(rendered)
        }
        Value::Mapping(_) => Err(ConfigError::construction(
            key,
            "a mapping cannot be assigned with '='",
            "Use a block (`KEY:`) for nested values",
            502,
        )),
        scalar => render_scalar(key, scalar),
    }
}

fn render_scalar(key: &str, value: &Value) -> Result<String, ConfigError> {
    Ok(match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => format_float(*f),
        Value::Timestamp(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        Value::String(s) => render_string(key, s)?,
        Value::List(_) | Value::Mapping(_) => return render_inline(key, value),
    })
}

/// Double-quoted when that reads back unchanged, else bare. Inner quotes are
/// never escaped.
fn render_string(key: &str, s: &str) -> Result<String, ConfigError> {
    if s.contains(['\n', '\r']) {
        return Err(unwritable_string(key));
    }

    let quoted = format!("\"{}\"", s);
    if reads_back_as(&quoted, s) {
        return Ok(quoted);
    }
    if reads_back_as(s, s) {
        return Ok(s.to_string());
    }
    Err(unwritable_string(key))
}

fn reads_back_as(literal: &str, s: &str) -> bool {
    matches!(parse_value(literal), Value::String(ref read) if read == s)
}

fn unwritable_string(key: &str) -> ConfigError {
    ConfigError::construction(
        key,
        "string cannot be written so that it reads back unchanged",
        "Strings may not contain line breaks, or quotes that pair up across commas",
        505,
    )
}

/// Shortest form that reads back as the same float, never as an integer.
fn format_float(f: f64) -> String {
    format!("{:?}", f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::parse;
    use chrono::{TimeZone, Utc};

    fn sample() -> Document {
        let mut b = Builder::new();
        b.set("title", "Mi Aplicación").unwrap()
            .set("version", 1.2).unwrap()
            .block("OWNER", |o| {
                o.set("name", "Jhobanny")?;
                o.set("dob", Utc.with_ymd_and_hms(1979, 5, 27, 15, 32, 0).unwrap())?;
                Ok(())
            }).unwrap()
            .block("DATABASE", |db| {
                db.set("enabled", true)?
                    .set("ports", [5432, 5433])?
                    .block("temp_targets", |t| {
                        t.set("cpu", 79.5)?.set("case", 72.0)?;
                        Ok(())
                    })?;
                Ok(())
            }).unwrap()
            .group("SERVER", "frontend", |s| {
                s.set("ip", "10.0.0.1")?.set("role", "web")?;
                Ok(())
            }).unwrap()
            .group("SERVER", "backend", |s| {
                s.set("ip", "10.0.0.2")?.set("role", "api")?;
                Ok(())
            }).unwrap();
        b.build()
    }

    #[test]
    fn test_canonical_text() {
        let text = to_string(&sample()).unwrap();
        let expected = "\
title = \"Mi Aplicación\"
version = 1.2
OWNER:
  name = \"Jhobanny\"
  dob = 1979-05-27T15:32:00Z
DATABASE:
  enabled = true
  ports = 5432, 5433
  temp_targets:
    cpu = 79.5
    case = 72.0
SERVER frontend:
  ip = \"10.0.0.1\"
  role = \"web\"
SERVER backend:
  ip = \"10.0.0.2\"
  role = \"api\"
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_builder_round_trip() {
        let doc = sample();
        let reparsed = parse(&to_string(&doc).unwrap()).unwrap();
        assert_eq!(reparsed, doc);
        assert!(reparsed.get("SERVER").and_then(Value::as_mapping).unwrap().is_grouped());

        // Rendering is stable once canonical.
        assert_eq!(to_string(&reparsed).unwrap(), to_string(&doc).unwrap());
    }

    #[test]
    fn test_parsed_text_round_trip() {
        let input = r#"
# comments and spacing are not preserved
name=   "svc"
limits = 1.5e3, -2, "x, y", null, false
SERVER a:
      port = 1
SERVER b:
      port = 2
"#;
        let doc = parse(input).unwrap();
        let text = to_string(&doc).unwrap();
        assert_eq!(parse(&text).unwrap(), doc);
        assert!(text.contains("limits = 1500.0, -2, \"x, y\", null, false\n"));
    }

    #[test]
    fn test_group_with_loose_entries() {
        let doc = parse("SERVER:\n  port = 80\nSERVER edge:\n  ip = \"1.1.1.1\"\n").unwrap();
        let text = to_string(&doc).unwrap();
        assert_eq!(text, "SERVER:\n  port = 80\nSERVER edge:\n  ip = \"1.1.1.1\"\n");
        assert_eq!(parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_inner_quotes_round_trip() {
        let doc = parse("msg = say \"hi\"\nq = \"a\"b\"\nodd = a\"b,c\"\nlist = \"x\", a\"b\n").unwrap();
        assert_eq!(doc.get("msg"), Some(&Value::String("say \"hi\"".into())));

        let text = to_string(&doc).unwrap();
        assert_eq!(
            text,
            "msg = \"say \"hi\"\"\nq = \"a\"b\"\nodd = a\"b,c\"\nlist = \"x\", \"a\"b\"\n"
        );
        assert_eq!(parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_group_loose_entries_come_first() {
        // A second `A:` header would replace the container, so loose entries
        // cannot follow an instance.
        let doc = parse("A:\n  sub:\n    k = 1\n  tail = 2\nA x:\n  y = 3\n").unwrap();
        let text = to_string(&doc).unwrap();
        assert_eq!(text, "A:\n  tail = 2\nA sub:\n  k = 1\nA x:\n  y = 3\n");

        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed, doc);
        assert_eq!(to_string(&reparsed).unwrap(), text);
    }

    #[test]
    fn test_empty_blocks() {
        let mut root = Mapping::new();
        root.insert("empty".into(), Value::Mapping(Mapping::new()));
        root.insert("group".into(), Value::Mapping(Mapping::grouped()));
        let doc = Document::from(root);

        let text = to_string(&doc).unwrap();
        assert_eq!(text, "empty:\ngroup:\n");
        assert_eq!(parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_set_dialect() {
        let mut b = Builder::new();
        b.set("title", "X").unwrap()
            .block("A", |a| {
                a.set("k", 1)?;
                Ok(())
            }).unwrap();
        let doc = b.build();

        let text = to_string_with(&doc, Dialect::Set).unwrap();
        assert_eq!(text, "SET title = \"X\"\nA:\n  k = 1\n");
        assert_eq!(parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_float_literals_stay_floats() {
        assert_eq!(format_float(72.0), "72.0");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(parse(&format!("x = {}", format_float(1e300))).unwrap().get("x"), Some(&Value::Float(1e300)));
        assert_eq!(parse(&format!("x = {}", format_float(72.0))).unwrap().get("x"), Some(&Value::Float(72.0)));
    }

    #[test]
    fn test_unrepresentable_values() {
        let err = render_inline("k", &Value::List(vec![Value::Integer(1)])).unwrap_err();
        assert_eq!(err.code(), Some(503));

        let nested = Value::List(vec![Value::Integer(1), Value::List(vec![])]);
        assert_eq!(render_inline("k", &nested).unwrap_err().code(), Some(504));

        let multiline = Value::String("line\nbreak".into());
        assert_eq!(render_inline("k", &multiline).unwrap_err().code(), Some(505));

        // Splits into a list whichever way it is written.
        let resplits = Value::String(r#""x", "y""#.into());
        assert_eq!(render_inline("k", &resplits).unwrap_err().code(), Some(505));

        let pairs_across_items = Value::List(vec![Value::from("a\"b"), Value::from("c\"d")]);
        assert_eq!(render_inline("k", &pairs_across_items).unwrap_err().code(), Some(505));

        let mut root = Mapping::new();
        root.insert("bad key".into(), Value::Integer(1));
        let err = to_string(&Document::from(root)).unwrap_err();
        assert!(matches!(err, ConfigError::ConstructionError { ref key, .. } if key == "bad key"));
    }
}
