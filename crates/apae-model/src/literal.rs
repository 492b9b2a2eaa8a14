//! SQL literals produced by field normalization.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A SQL value that is safe to splice into an `INSERT` tuple.
///
/// Text is stored unescaped; quoting happens when the literal is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlLiteral {
    /// Quoted string literal.
    Text(String),
    /// Bare integer (enumeration codes).
    Integer(i64),
    /// `true` / `false`.
    Boolean(bool),
    /// `'YYYY-MM-DD'::date`.
    Date(NaiveDate),
    /// Server-generated identity (`gen_random_uuid()`).
    GeneratedId,
}

impl SqlLiteral {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Unescaped text content, if this is a text literal.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for SqlLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(&quote_text(text)),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Date(date) => write!(f, "'{}'::date", date.format("%Y-%m-%d")),
            Self::GeneratedId => f.write_str("gen_random_uuid()"),
        }
    }
}

/// Wraps text in single quotes, doubling embedded quotes.
pub fn quote_text(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Result of normalizing one cell: a literal or SQL `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalizedField {
    Value(SqlLiteral),
    #[default]
    Null,
}

impl NormalizedField {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn literal(&self) -> Option<&SqlLiteral> {
        match self {
            Self::Value(literal) => Some(literal),
            Self::Null => None,
        }
    }

    /// Unescaped text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        self.literal().and_then(SqlLiteral::as_text)
    }
}

impl From<SqlLiteral> for NormalizedField {
    fn from(literal: SqlLiteral) -> Self {
        Self::Value(literal)
    }
}

impl From<Option<SqlLiteral>> for NormalizedField {
    fn from(literal: Option<SqlLiteral>) -> Self {
        literal.map_or(Self::Null, Self::Value)
    }
}

impl fmt::Display for NormalizedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(literal) => literal.fmt(f),
            Self::Null => f.write_str("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_literals() {
        assert_eq!(SqlLiteral::text("D'ÁVILA").to_string(), "'D''ÁVILA'");
        assert_eq!(SqlLiteral::Integer(2).to_string(), "2");
        assert_eq!(SqlLiteral::Boolean(false).to_string(), "false");
        let date = NaiveDate::from_ymd_opt(1990, 2, 1).unwrap();
        assert_eq!(SqlLiteral::Date(date).to_string(), "'1990-02-01'::date");
        assert_eq!(SqlLiteral::GeneratedId.to_string(), "gen_random_uuid()");
        assert_eq!(NormalizedField::Null.to_string(), "null");
    }

    #[test]
    fn option_conversion() {
        assert!(NormalizedField::from(None).is_null());
        let field = NormalizedField::from(Some(SqlLiteral::text("X")));
        assert_eq!(field.as_text(), Some("X"));
    }
}
