use std::ops::{Deref, DerefMut};

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<Utc>), // normalized to UTC
    String(String),
    List(Vec<Value>),
    Mapping(Mapping),
}

/// An insertion-ordered mapping from keys to values.
///
/// `grouped` marks a grouping-block container (`SERVER frontend:`), whose
/// entries are instances keyed by identifier. It only steers rendering and is
/// ignored by equality.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, Value>,
    grouped: bool,
}

/// The root mapping produced by a parse or a builder.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct Document {
    pub items: Mapping,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(b) = self { Some(*b) } else { None }
    }

    pub fn as_i64(&self) -> Option<i64> {
        if let Value::Integer(n) = self { Some(*n) } else { None }
    }

    /// Floats, and integers widened to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self { Some(s) } else { None }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        if let Value::Timestamp(t) = self { Some(t) } else { None }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        if let Value::List(items) = self { Some(items) } else { None }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        if let Value::Mapping(m) = self { Some(m) } else { None }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        if let Value::Mapping(m) = self { Some(m) } else { None }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Timestamp(_) => "timestamp",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Mapping(_) => "mapping",
        }
    }
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty grouping-block container.
    pub fn grouped() -> Self {
        Self { entries: IndexMap::new(), grouped: true }
    }

    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    pub fn set_grouped(&mut self, grouped: bool) {
        self.grouped = grouped;
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.entries
    }

    /// Look up a dotted path such as `SERVER.frontend.ip`.
    ///
    /// Keys may contain dots themselves, so at every level the longest run of
    /// segments naming an existing key is tried first.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        let segments: Vec<&str> = path.split('.').collect();
        lookup_segments(self, &segments)
    }
}

fn lookup_segments<'a>(mapping: &'a Mapping, segments: &[&str]) -> Option<&'a Value> {
    for take in (1..=segments.len()).rev() {
        let key = segments[..take].join(".");
        let Some(value) = mapping.get(&key) else {
            continue;
        };
        if take == segments.len() {
            return Some(value);
        }
        if let Value::Mapping(child) = value {
            if let Some(found) = lookup_segments(child, &segments[take..]) {
                return Some(found);
            }
        }
    }
    None
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Deref for Mapping {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl DerefMut for Mapping {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.entries
    }
}

impl From<IndexMap<String, Value>> for Mapping {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Self { entries, grouped: false }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        iter.into_iter().map(|(k, v)| (k.into(), v)).collect::<IndexMap<_, _>>().into()
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.items.lookup(path)
    }

    pub fn into_mapping(self) -> Mapping {
        self.items
    }
}

impl From<Mapping> for Document {
    fn from(items: Mapping) -> Self {
        Self { items }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Timestamp(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => items.serialize(serializer),
            Value::Mapping(m) => m.serialize(serializer),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Timestamp(t)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
