use crate::id::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;

///
/// Value
///
/// Scalar field values used by filter clauses and field projections.
/// Only the shapes the back-office entities actually expose.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    #[default]
    Unit,
    Text(String),
    Uint(u64),
    Int(i64),
    Bool(bool),
    Date(Date),
    Id(RecordId),
}

impl Value {
    /// Borrow the text payload, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "()"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

///
/// FieldValue
///
/// Conversion of plain Rust values into `Value` for filter building.
///

pub trait FieldValue {
    fn to_value(self) -> Value;
}

impl FieldValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl FieldValue for &str {
    fn to_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl FieldValue for String {
    fn to_value(self) -> Value {
        Value::Text(self)
    }
}

impl FieldValue for u64 {
    fn to_value(self) -> Value {
        Value::Uint(self)
    }
}

impl FieldValue for u32 {
    fn to_value(self) -> Value {
        Value::Uint(u64::from(self))
    }
}

impl FieldValue for i64 {
    fn to_value(self) -> Value {
        Value::Int(self)
    }
}

impl FieldValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FieldValue for Date {
    fn to_value(self) -> Value {
        Value::Date(self)
    }
}

impl FieldValue for RecordId {
    fn to_value(self) -> Value {
        Value::Id(self)
    }
}

impl FieldValue for () {
    fn to_value(self) -> Value {
        Value::Unit
    }
}

///
/// FieldValues
///
/// Field projection for filter evaluation: an entity exposes each
/// filterable field by name. Unknown fields return `None` and any clause
/// naming them evaluates false.
///

pub trait FieldValues {
    fn field_value(&self, field: &str) -> Option<Value>;
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn conversions_keep_shape() {
        assert_eq!("Casa".to_value(), Value::Text("Casa".to_string()));
        assert_eq!(4u32.to_value(), Value::Uint(4));
        assert_eq!(true.to_value(), Value::Bool(true));
        assert_eq!(
            date!(2024 - 01 - 15).to_value(),
            Value::Date(date!(2024 - 01 - 15))
        );
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(Value::Text("Venta".into()).to_string(), "Venta");
        assert_eq!(Value::Date(date!(2024 - 01 - 15)).to_string(), "2024-01-15");
    }
}
