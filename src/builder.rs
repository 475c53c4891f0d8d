//! Programmatic construction of SimpleConfig documents.

use crate::ast::{Document, Mapping, Value};
use crate::serializer::{self, check_key, render_inline, Dialect};
use crate::ConfigError;

/// Staging area for a mapping tree, filled through chained calls.
///
/// Every adder validates its input on the spot, so anything a builder holds
/// can be serialized and parsed back to an equal tree.
///
/// # Examples
/// ```
/// use simple_cfg::Builder;
///
/// # fn main() -> Result<(), simple_cfg::ConfigError> {
/// let mut builder = Builder::new();
/// builder
///     .set("title", "X")?
///     .group("SERVER", "frontend", |s| {
///         s.set("ip", "10.0.0.1")?;
///         Ok(())
///     })?;
///
/// assert_eq!(
///     builder.to_config_string()?,
///     "title = \"X\"\nSERVER frontend:\n  ip = \"10.0.0.1\"\n"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    root: Mapping,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a scalar or flat list at `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<&mut Self, ConfigError> {
        check_key(key)?;
        let value = value.into();
        render_inline(key, &value)?;
        self.root.insert(key.to_string(), value);
        Ok(self)
    }

    /// Add a `NAME:` block whose contents come from a nested builder.
    pub fn block<F>(&mut self, name: &str, build: F) -> Result<&mut Self, ConfigError>
    where
        F: FnOnce(&mut Builder) -> Result<(), ConfigError>,
    {
        check_key(name)?;
        let mut nested = Builder::new();
        build(&mut nested)?;
        self.root.insert(name.to_string(), Value::Mapping(nested.root));
        Ok(self)
    }

    /// Add a `NAME IDENTIFIER:` instance. Instances sharing `name` collect
    /// into one grouping container.
    pub fn group<F>(&mut self, name: &str, id: &str, build: F) -> Result<&mut Self, ConfigError>
    where
        F: FnOnce(&mut Builder) -> Result<(), ConfigError>,
    {
        check_key(name)?;
        check_key(id)?;
        let mut nested = Builder::new();
        build(&mut nested)?;

        let slot = self
            .root
            .entry(name.to_string())
            .or_insert_with(|| Value::Mapping(Mapping::grouped()));
        let existing = slot.type_name();

        let Value::Mapping(container) = slot else {
            return Err(ConfigError::construction(
                name,
                format!("'{}' already holds a {}", name, existing),
                "A grouping block needs its name free or bound to a block",
                506,
            ));
        };
        container.set_grouped(true);
        container.insert(id.to_string(), Value::Mapping(nested.root));
        Ok(self)
    }

    /// Place an already assembled mapping under `key`.
    ///
    /// Used for intermediate nesting, such as a credentials mapping handed
    /// over from elsewhere. The whole mapping is validated.
    pub fn mapping(&mut self, key: &str, mapping: Mapping) -> Result<&mut Self, ConfigError> {
        check_key(key)?;
        check_mapping(&mapping)?;
        self.root.insert(key.to_string(), Value::Mapping(mapping));
        Ok(self)
    }

    pub fn build(self) -> Document {
        Document::from(self.root)
    }

    pub fn to_config_string(&self) -> Result<String, ConfigError> {
        serializer::mapping_to_string(&self.root, Dialect::Plain)
    }

    pub fn to_config_string_with(&self, dialect: Dialect) -> Result<String, ConfigError> {
        serializer::mapping_to_string(&self.root, dialect)
    }
}

fn check_mapping(mapping: &Mapping) -> Result<(), ConfigError> {
    for (key, value) in mapping {
        check_key(key)?;
        match value {
            Value::Mapping(child) => check_mapping(child)?,
            other => {
                render_inline(key, other)?;
            }
        }
    }
    Ok(())
}
