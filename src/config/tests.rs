// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use std::collections::HashMap;
use std::io::Write;

use chrono::{DateTime, TimeZone, Utc};

use crate::Mapping;

const SAMPLE: &str = r#"
# Configuración de ejemplo

title = "Mi Aplicación"
version = 1.2

OWNER:
  name = "Jhobanny"
  dob = 1979-05-27T07:32:00-08:00

DATABASE:
  enabled = true
  ports = 5432,5433
  temp_targets:
    cpu = 79.5
    case = 72.0

SERVER frontend:
  ip = "10.0.0.1"
  role = "web"

SERVER backend:
  ip = "10.0.0.2"
  role = "api"
"#;

#[test]
fn test_config_from_string() {
    let config = Config::from_str(SAMPLE).expect("Failed to parse config");

    let title: String = config.get("title").expect("Failed to get title");
    assert_eq!(title, "Mi Aplicación");

    let version: f64 = config.get("version").unwrap();
    assert!((version - 1.2).abs() < f64::EPSILON);

    let dob: DateTime<Utc> = config.get("OWNER.dob").unwrap();
    assert_eq!(dob, Utc.with_ymd_and_hms(1979, 5, 27, 15, 32, 0).unwrap());

    let ports: Vec<u16> = config.get("DATABASE.ports").unwrap();
    assert_eq!(ports, vec![5432, 5433]);

    let cpu: f32 = config.get("DATABASE.temp_targets.cpu").unwrap();
    assert_eq!(cpu, 79.5);

    let ip: String = config.get("SERVER.frontend.ip").unwrap();
    assert_eq!(ip, "10.0.0.1");

    assert!(config.has("SERVER.backend.role"));
    assert!(!config.has("SERVER.middle"));

    let servers = config.get_keys("SERVER").unwrap();
    assert_eq!(servers, vec!["frontend", "backend"]);
}

#[test]
fn test_order_preservation() {
    let config = Config::from_str("first = 1\nsecond = 2\nnested:\n  gamma = 1\n  alpha = 2\n  beta = 3\n").unwrap();
    assert_eq!(config.get_keys("nested").unwrap(), vec!["gamma", "alpha", "beta"]);
    assert_eq!(config.get_keys("").unwrap(), vec!["first", "second", "nested"]);
}

#[test]
fn test_get_optional_and_default() {
    let config = Config::from_str("timeout = 10\nlabel = null\n").unwrap();

    assert_eq!(config.get_optional::<u64>("timeout").unwrap(), Some(10));
    assert_eq!(config.get_optional::<u64>("missing").unwrap(), None);
    assert_eq!(config.get_optional::<String>("label").unwrap(), None);
    assert!(config.get::<String>("label").is_err());
    assert!(config.get_optional::<bool>("timeout").is_err());

    assert_eq!(config.get_or("timeout", 30u64), 10);
    assert_eq!(config.get_or("retries", 3u8), 3);
}

#[test]
fn test_missing_path_error() {
    let config = Config::from_str("a = 1").unwrap();
    let err = config.get::<i64>("b.c").unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { ref path, code: Some(304), .. } if path == "b.c"));
}

#[test]
fn test_type_error_carries_line() {
    let config = Config::from_str("A:\n  x = 1\nB:\n  x = \"text\"\n").unwrap();
    let err = config.get::<i64>("B.x").unwrap_err();

    match err {
        ConfigError::TypeError { line, ref message, .. } => {
            assert_eq!(line, 4);
            assert!(message.contains("x = \"text\""));
        }
        other => panic!("Expected TypeError, got {:?}", other),
    }
}

#[test]
fn test_type_error_in_group_carries_line() {
    let config = Config::from_str(SAMPLE).unwrap();
    let err = config.get::<bool>("SERVER.backend.ip").unwrap_err();
    assert_eq!(err.line(), Some(23));
}

#[test]
fn test_get_keys_on_scalar() {
    let config = Config::from_str("a = 1").unwrap();
    let err = config.get_keys("a").unwrap_err();
    assert!(matches!(err, ConfigError::TypeError { code: Some(306), line: 1, .. }));
}

#[test]
fn test_syntax_error_surfaces() {
    let err = Config::from_str("a = 1\nnot valid syntax\n").err().unwrap();
    assert!(err.is_syntax());
    assert_eq!(err.line(), Some(2));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "SERVER web:\r\n  port = 8080\r\n").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    let port: u16 = config.get("SERVER.web.port").unwrap();
    assert_eq!(port, 8080);
    assert_eq!(config.source(), Some(file.path()));
}

#[test]
fn test_from_file_missing() {
    let err = Config::from_file("/definitely/not/here.conf").err().unwrap();
    assert!(matches!(err, ConfigError::FileError { code: Some(301), .. }));
}

#[test]
fn test_from_file_with_fallback() {
    let mut fallback = tempfile::NamedTempFile::new().unwrap();
    write!(fallback, "mode = \"fallback\"\n").unwrap();

    let missing = fallback.path().with_extension("missing");
    let config = Config::from_file_with_fallback(missing.as_path(), fallback.path()).unwrap();
    let mode: String = config.get("mode").unwrap();
    assert_eq!(mode, "fallback");

    let err = Config::from_file_with_fallback(missing.as_path(), missing.as_path())
        .err()
        .unwrap();
    assert!(matches!(err, ConfigError::FileError { code: Some(302), .. }));
}

#[test]
fn test_fallback_does_not_hide_syntax_errors() {
    let mut primary = tempfile::NamedTempFile::new().unwrap();
    write!(primary, "oops\n").unwrap();
    let mut fallback = tempfile::NamedTempFile::new().unwrap();
    write!(fallback, "ok = true\n").unwrap();

    let err = Config::from_file_with_fallback(primary.path(), fallback.path())
        .err()
        .unwrap();
    assert!(matches!(err, ConfigError::SyntaxError { line: 1, .. }));
}

#[test]
fn test_to_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.conf");

    let config = Config::from_str(SAMPLE).unwrap();
    config.to_file(&path, Dialect::Set).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("SET title = \"Mi Aplicación\"\n"));

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.document(), config.document());
}

#[test]
fn test_from_document() {
    let mut builder = crate::Builder::new();
    builder.set("name", "svc").unwrap();
    let config = Config::from_document(builder.build());

    let name: String = config.get("name").unwrap();
    assert_eq!(name, "svc");

    let err = config.get::<bool>("name").unwrap_err();
    assert_eq!(err.line(), None);
}

// ===== Conversion Tests =====

#[test]
fn test_string_conversion() {
    let result: Result<String, ConfigError> = Value::String("hello".into()).try_into();
    assert_eq!(result.unwrap(), "hello");

    let result: Result<String, ConfigError> = Value::Integer(42).try_into();
    assert!(result.is_err());
}

#[test]
fn test_integer_conversions() {
    let result: Result<i64, ConfigError> = Value::Integer(-5).try_into();
    assert_eq!(result.unwrap(), -5);

    let result: Result<u8, ConfigError> = Value::Integer(255).try_into();
    assert_eq!(result.unwrap(), 255);

    let result: Result<u8, ConfigError> = Value::Integer(256).try_into();
    assert!(matches!(result, Err(ConfigError::TypeError { code: Some(405), .. })));

    let result: Result<u32, ConfigError> = Value::Integer(-1).try_into();
    assert!(result.is_err());

    let result: Result<usize, ConfigError> = Value::Float(1000.0).try_into();
    assert_eq!(result.unwrap(), 1000);

    let result: Result<i32, ConfigError> = Value::Float(1.5).try_into();
    assert!(matches!(result, Err(ConfigError::TypeError { code: Some(403), .. })));
}

#[test]
fn test_float_conversion_widens_integers() {
    let result: Result<f64, ConfigError> = Value::Integer(3).try_into();
    assert_eq!(result.unwrap(), 3.0);

    let result: Result<f64, ConfigError> = Value::String("3".into()).try_into();
    assert!(result.is_err());
}

#[test]
fn test_bool_conversion() {
    let result: Result<bool, ConfigError> = Value::Bool(false).try_into();
    assert!(!result.unwrap());

    let result: Result<bool, ConfigError> = Value::String("tru".into()).try_into();
    assert!(matches!(
        result,
        Err(ConfigError::TypeError { ref message, .. }) if message.contains("Did you mean")
    ));

    let result: Result<bool, ConfigError> = Value::String("yes".into()).try_into();
    assert!(result.is_err());
}

#[test]
fn test_vec_conversion() {
    let value = Value::List(vec![Value::from("one"), Value::from("two")]);
    let result: Result<Vec<String>, ConfigError> = value.try_into();
    assert_eq!(result.unwrap(), vec!["one", "two"]);

    let value = Value::List(vec![Value::from("one"), Value::from(2)]);
    let result: Result<Vec<String>, ConfigError> = value.try_into();
    assert!(result.is_err());

    let result: Result<Vec<i64>, ConfigError> = Value::Integer(1).try_into();
    assert!(matches!(result, Err(ConfigError::TypeError { code: Some(412), .. })));
}

#[test]
fn test_mapping_conversions() {
    let config = Config::from_str("creds:\n  user = \"admin\"\n  pass = \"x\"\nmixed:\n  a = \"b\"\n  n = 1\n").unwrap();

    let creds: HashMap<String, String> = config.get("creds").unwrap();
    assert_eq!(creds.get("user"), Some(&"admin".to_string()));

    let mixed: HashMap<String, Value> = config.get("mixed").unwrap();
    assert_eq!(mixed.get("n"), Some(&Value::Integer(1)));

    assert!(config.get::<HashMap<String, String>>("mixed").is_err());

    let mapping: Mapping = config.get("mixed").unwrap();
    assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["a", "n"]);
}
