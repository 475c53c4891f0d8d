use super::*;

impl Config {
    /// Get a typed value using dot notation.
    ///
    /// Grouping blocks are addressed through their identifier:
    /// `SERVER.frontend.ip`.
    ///
    /// # Examples
    /// ```
    /// # use simple_cfg::Config;
    /// # fn main() -> Result<(), simple_cfg::ConfigError> {
    /// let config = Config::from_str("DATABASE:\n  port = 5432\n  enabled = true\n")?;
    /// let port: u16 = config.get("DATABASE.port")?;
    /// let enabled: bool = config.get("DATABASE.enabled")?;
    /// assert_eq!((port, enabled), (5432, true));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns `NotFound` if the path doesn't exist, or `TypeError` if the value
    /// can't be converted to `T`.
    pub fn get<T>(&self, path: &str) -> Result<T, ConfigError>
    where
        T: TryFrom<Value, Error = ConfigError>,
    {
        let value = self.get_value(path)?;
        T::try_from(value).map_err(|e| enhance_error_with_line_info(e, path, &self.raw_content))
    }

    /// Like [`Config::get`], but a missing path or a `null` value yields `None`.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, ConfigError>
    where
        T: TryFrom<Value, Error = ConfigError>,
    {
        match self.get_value(path) {
            Ok(Value::Null) | Err(ConfigError::NotFound { .. }) => Ok(None),
            Ok(value) => T::try_from(value)
                .map(Some)
                .map_err(|e| enhance_error_with_line_info(e, path, &self.raw_content)),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```
    /// # use simple_cfg::Config;
    /// let config = Config::from_str("timeout = 10").unwrap();
    /// assert_eq!(config.get_or("timeout", 30u64), 10);
    /// assert_eq!(config.get_or("retries", 3u64), 3);
    /// ```
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = ConfigError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Get the raw `Value` at a path. An empty path returns the whole root mapping.
    pub fn get_value(&self, path: &str) -> Result<Value, ConfigError> {
        if path.trim().is_empty() {
            return Ok(Value::Mapping(self.document.items.clone()));
        }

        self.document
            .get(path)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound {
                path: path.to_string(),
                hint: Some("Check that the path exists in your config file".into()),
                code: Some(304),
            })
    }

    /// Keys directly under a block, in file order.
    ///
    /// For a grouping block these are the instance identifiers.
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, ConfigError> {
        match self.get_value(path)? {
            Value::Mapping(items) => Ok(items.keys().cloned().collect()),
            other => Err(ConfigError::TypeError {
                message: format!("Path '{}' is a {}, not a block", path, other.type_name()),
                line: helpers::find_config_line(path, &self.raw_content).0,
                hint: Some("Only blocks have keys".into()),
                code: Some(306),
            }),
        }
    }

    /// Check if a configuration path exists.
    pub fn has(&self, path: &str) -> bool {
        self.document.get(path).is_some()
    }
}

/// Attach the source line of `path` to type errors.
fn enhance_error_with_line_info(e: ConfigError, path: &str, raw_content: &str) -> ConfigError {
    match e {
        ConfigError::TypeError { message, hint, code, .. } => {
            let (line, snippet) = helpers::find_config_line(path, raw_content);
            if line > 0 {
                ConfigError::TypeError {
                    message: format!("{} at `{}`\n  → {}", message, path, snippet),
                    line,
                    hint,
                    code,
                }
            } else {
                ConfigError::TypeError {
                    message: format!("{} at `{}`", message, path),
                    line: 0,
                    hint,
                    code,
                }
            }
        }
        other => other,
    }
}
