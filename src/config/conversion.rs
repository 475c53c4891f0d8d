// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{ConfigError, Mapping, Value};

fn type_error(expected: &str, value: &Value, hint: &str, code: u32) -> ConfigError {
    ConfigError::TypeError {
        message: format!("Expected {}, got {} {:?}", expected, value.type_name(), value),
        line: 0,
        hint: Some(hint.into()),
        code: Some(code),
    }
}

impl TryFrom<Value> for String {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(type_error("string", &value, "Quote the value: key = \"text\"", 401)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value
            .as_f64()
            .ok_or_else(|| type_error("number", &value, "Use a number value in your config", 402))
    }
}

impl TryFrom<Value> for f32 {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|f| f as f32)
    }
}

impl TryFrom<Value> for i64 {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(n) => Ok(n),
            // 2^63 is exact as f64; anything strictly below it fits in i64.
            Value::Float(f)
                if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < 9_223_372_036_854_775_808.0 =>
            {
                Ok(f as i64)
            }
            Value::Float(f) => Err(ConfigError::TypeError {
                message: format!("Number {} is not a whole number in integer range", f),
                line: 0,
                hint: Some("Use an integer value such as 42".into()),
                code: Some(403),
            }),
            _ => Err(type_error("integer", &value, "Use an integer value in your config", 402)),
        }
    }
}

/// Narrower integers go through `i64` with a range check.
macro_rules! integer_conversion {
    ($($ty:ty => $code:expr),* $(,)?) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = ConfigError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    let n = i64::try_from(value)?;
                    <$ty>::try_from(n).map_err(|_| ConfigError::TypeError {
                        message: format!("Number {} out of range for {}", n, stringify!($ty)),
                        line: 0,
                        hint: Some(format!(
                            "Use a number between {} and {}",
                            <$ty>::MIN,
                            <$ty>::MAX
                        )),
                        code: Some($code),
                    })
                }
            }
        )*
    };
}

integer_conversion! {
    i32 => 404,
    u8 => 405,
    u16 => 406,
    u32 => 407,
    u64 => 408,
    usize => 409,
}

impl TryFrom<Value> for bool {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::String(ref s) if s.to_lowercase().starts_with("tru") || s.to_lowercase().starts_with("fal") => {
                Err(ConfigError::TypeError {
                    message: format!("Invalid boolean value '{}'. Did you mean 'true' or 'false'?", s),
                    line: 0,
                    hint: None,
                    code: Some(410),
                })
            }
            _ => Err(type_error("boolean", &value, "Use true or false", 410)),
        }
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Timestamp(t) => Ok(t),
            _ => Err(type_error(
                "timestamp",
                &value,
                "Use an ISO 8601 date-time such as 1979-05-27T07:32:00-08:00",
                411,
            )),
        }
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = ConfigError>,
{
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(items) => items.into_iter().map(T::try_from).collect(),
            _ => Err(type_error("list", &value, "Separate list items with commas: a, b, c", 412)),
        }
    }
}

impl TryFrom<Value> for Mapping {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(m) => Ok(m),
            _ => Err(type_error("block", &value, "Use a block (`NAME:`) in your config", 413)),
        }
    }
}

impl TryFrom<Value> for HashMap<String, Value> {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(Mapping::try_from(value)?.into_iter().collect())
    }
}

impl TryFrom<Value> for HashMap<String, String> {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Mapping::try_from(value)?
            .into_iter()
            .map(|(k, v)| String::try_from(v).map(|s| (k, s)))
            .collect()
    }
}
