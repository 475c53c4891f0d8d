use std::fmt;

/// The main error type for SimpleConfig parsing, building and access.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A line matched none of the comment, block header or key-value shapes.
    SyntaxError {
        message: String,
        line: usize,
        text: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// A grouping header names a key that already holds a scalar or list.
    StructuralConflict {
        name: String,
        line: usize,
        text: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised by the builder or serializer for values the text format cannot express.
    ConstructionError {
        key: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    NotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl ConfigError {
    /// The 1-based source line for errors raised while parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConfigError::SyntaxError { line, .. } | ConfigError::StructuralConflict { line, .. } => {
                Some(*line)
            }
            ConfigError::TypeError { line, .. } if *line > 0 => Some(*line),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            ConfigError::SyntaxError { code, .. }
            | ConfigError::StructuralConflict { code, .. }
            | ConfigError::ConstructionError { code, .. }
            | ConfigError::TypeError { code, .. }
            | ConfigError::NotFound { code, .. }
            | ConfigError::FileError { code, .. } => *code,
        }
    }

    /// Syntax errors proper and structural conflicts both come from unparseable input.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            ConfigError::SyntaxError { .. } | ConfigError::StructuralConflict { .. }
        )
    }

    pub(crate) fn construction(key: &str, message: impl Into<String>, hint: &str, code: u32) -> Self {
        ConfigError::ConstructionError {
            key: key.to_string(),
            message: message.into(),
            hint: Some(hint.into()),
            code: Some(code),
        }
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SyntaxError { message, line, text, hint, code } =>
                write!(f, "[SimpleConfig] Syntax Error on line {}: {} '{}'{}",
                    line, message, text, suffix(hint, code)
                ),
            ConfigError::StructuralConflict { name, line, text, hint, code } =>
                write!(f, "[SimpleConfig] Syntax Error on line {}: key '{}' already exists and is not a grouping block '{}'{}",
                    line, name, text, suffix(hint, code)
                ),
            ConfigError::ConstructionError { key, message, hint, code } =>
                write!(f, "[SimpleConfig] Construction Error at '{}': {}{}",
                    key, message, suffix(hint, code)
                ),
            ConfigError::TypeError { message, line, hint, code } => {
                if *line > 0 {
                    write!(f, "[SimpleConfig] Type Error on line {}: {}{}",
                        line, message, suffix(hint, code)
                    )
                } else {
                    write!(f, "[SimpleConfig] Type Error: {}{}", message, suffix(hint, code))
                }
            }
            ConfigError::NotFound { path, hint, code } =>
                write!(f, "[SimpleConfig] Path '{}' not found{}", path, suffix(hint, code)),
            ConfigError::FileError { message, path, hint, code } =>
                write!(f, "[SimpleConfig] File Error '{}': {}{}",
                    path, message, suffix(hint, code)
                ),
        }
    }
}

impl std::error::Error for ConfigError {}
