use crate::value::{FieldValue, FieldValues, Value};
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, Not};

///
/// Cmp
///
/// Clause comparators. `_ci` variants use Unicode lowercase folding.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Cmp {
    Eq,
    Ne,
    Contains,
    ContainsCi,
}

///
/// FilterClause
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FilterClause {
    pub field: String,
    pub cmp: Cmp,
    pub value: Value,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, cmp: Cmp, value: impl FieldValue) -> Self {
        Self {
            field: field.into(),
            cmp,
            value: value.to_value(),
        }
    }

    fn eval(&self, row: &impl FieldValues) -> bool {
        let Some(actual) = row.field_value(&self.field) else {
            return false;
        };

        match self.cmp {
            Cmp::Eq => actual == self.value,
            Cmp::Ne => actual != self.value,
            Cmp::Contains => match (actual.as_text(), self.value.as_text()) {
                (Some(haystack), Some(needle)) => haystack.contains(needle),
                _ => false,
            },
            Cmp::ContainsCi => match (actual.as_text(), self.value.as_text()) {
                (Some(haystack), Some(needle)) => {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
        }
    }
}

///
/// FilterExpr
///
/// Represents logical expressions for filtering in-memory records.
///
/// Expressions can be:
/// - `True` or `False` constants
/// - Single clauses comparing a field with a value
/// - Composite expressions: `And`, `Or`, and negation `Not`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum FilterExpr {
    #[default]
    True,
    False,
    Clause(FilterClause),
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
}

impl FilterExpr {
    // --- Clause ---

    /// Create a single clause: `field cmp value`.
    pub fn clause(field: impl Into<String>, cmp: Cmp, value: impl FieldValue) -> Self {
        Self::Clause(FilterClause::new(field, cmp, value))
    }

    pub fn eq(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::clause(field, Cmp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::clause(field, Cmp::Ne, value)
    }

    pub fn contains(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::clause(field, Cmp::Contains, value)
    }

    pub fn contains_ci(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::clause(field, Cmp::ContainsCi, value)
    }

    // --- Composition ---

    /// Conjunction of every expression in the iterator.
    pub fn all(exprs: impl IntoIterator<Item = Self>) -> Self {
        Self::And(exprs.into_iter().collect())
    }

    /// Disjunction of every expression in the iterator.
    pub fn any(exprs: impl IntoIterator<Item = Self>) -> Self {
        Self::Or(exprs.into_iter().collect())
    }

    // --- Evaluation ---

    /// Evaluate against one record's field projection.
    ///
    /// Empty `And` is true, empty `Or` is false, matching the usual
    /// identity elements.
    pub fn eval(&self, row: &impl FieldValues) -> bool {
        match self {
            Self::True => true,
            Self::False => false,
            Self::Clause(clause) => clause.eval(row),
            Self::And(exprs) => exprs.iter().all(|e| e.eval(row)),
            Self::Or(exprs) => exprs.iter().any(|e| e.eval(row)),
            Self::Not(expr) => !expr.eval(row),
        }
    }
}

impl BitAnd for FilterExpr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::And(mut lhs), Self::And(rhs)) => {
                lhs.extend(rhs);
                Self::And(lhs)
            }
            (Self::And(mut lhs), rhs) => {
                lhs.push(rhs);
                Self::And(lhs)
            }
            (lhs, Self::And(mut rhs)) => {
                rhs.insert(0, lhs);
                Self::And(rhs)
            }
            (lhs, rhs) => Self::And(vec![lhs, rhs]),
        }
    }
}

impl BitOr for FilterExpr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Or(mut lhs), Self::Or(rhs)) => {
                lhs.extend(rhs);
                Self::Or(lhs)
            }
            (Self::Or(mut lhs), rhs) => {
                lhs.push(rhs);
                Self::Or(lhs)
            }
            (lhs, Self::Or(mut rhs)) => {
                rhs.insert(0, lhs);
                Self::Or(rhs)
            }
            (lhs, rhs) => Self::Or(vec![lhs, rhs]),
        }
    }
}

impl Not for FilterExpr {
    type Output = Self;

    fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct TestRow {
        fields: BTreeMap<&'static str, Value>,
    }

    impl TestRow {
        fn new(fields: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
            Self {
                fields: fields.into_iter().collect(),
            }
        }
    }

    impl FieldValues for TestRow {
        fn field_value(&self, field: &str) -> Option<Value> {
            self.fields.get(field).cloned()
        }
    }

    fn row() -> TestRow {
        TestRow::new([
            ("title", Value::Text("Casa Moderna en El Poblado".into())),
            ("status", Value::Text("Venta".into())),
            ("bedrooms", Value::Uint(4)),
        ])
    }

    #[test]
    fn eq_matches_exact_value() {
        assert!(FilterExpr::eq("status", "Venta").eval(&row()));
        assert!(!FilterExpr::eq("status", "Arriendo").eval(&row()));
    }

    #[test]
    fn contains_ci_folds_case() {
        assert!(FilterExpr::contains_ci("title", "moderna").eval(&row()));
        assert!(!FilterExpr::contains("title", "moderna").eval(&row()));
    }

    #[test]
    fn unknown_field_never_matches() {
        assert!(!FilterExpr::eq("missing", "x").eval(&row()));
        // negation of a missing-field clause still holds
        assert!((!FilterExpr::eq("missing", "x")).eval(&row()));
    }

    #[test]
    fn composition_short_forms() {
        let expr = FilterExpr::eq("status", "Venta") & FilterExpr::eq("bedrooms", 4u32);
        assert!(expr.eval(&row()));

        let expr = FilterExpr::eq("status", "Arriendo") | FilterExpr::contains_ci("title", "casa");
        assert!(expr.eval(&row()));
    }

    #[test]
    fn empty_groups_use_identity_elements() {
        assert!(FilterExpr::all([]).eval(&row()));
        assert!(!FilterExpr::any([]).eval(&row()));
    }
}
