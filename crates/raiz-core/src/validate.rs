use serde::Serialize;
use std::collections::BTreeMap;

///
/// Issues
///
/// Field-keyed validation messages for one form draft.
///
/// Validation is collect-all: every failing field gets its message in one
/// pass, and the caller renders them inline. An empty set means the draft
/// may be submitted.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Issues(BTreeMap<&'static str, String>);

impl Issues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any earlier one.
    pub fn put(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Record `message` for `field` when `cond` fails.
    pub fn require(&mut self, field: &'static str, cond: bool, message: impl Into<String>) {
        if !cond {
            self.put(field, message);
        }
    }

    /// Record `message` for `field` when `value` is blank after trimming.
    pub fn require_text(&mut self, field: &'static str, value: &str, message: impl Into<String>) {
        self.require(field, !value.trim().is_empty(), message);
    }

    /// Clear one field's message; editing a field dismisses its issue.
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(())` when empty, otherwise the collected issues.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

///
/// ValidateDraft
///
/// Form drafts validate as a whole and return every issue at once.
///

pub trait ValidateDraft {
    fn validate(&self) -> Result<(), Issues>;
}

/// Check the shape `local@domain.tld`: no whitespace, exactly one `@`, and a
/// dot inside the domain with characters on both sides. Mirrors the classic
/// permissive form-input pattern rather than full RFC 5322.
#[must_use]
pub fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = value.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_failing_field() {
        let mut issues = Issues::new();
        issues.require_text("title", "  ", "El título es requerido");
        issues.require_text("price", "$850,000", "El precio es requerido");
        issues.require("permissions", false, "Debe seleccionar al menos un permiso");

        assert_eq!(issues.len(), 2);
        assert_eq!(issues.get("title"), Some("El título es requerido"));
        assert_eq!(issues.get("price"), None);
        assert!(issues.clone().into_result().is_err());

        issues.clear("title");
        issues.clear("permissions");
        assert!(issues.into_result().is_ok());
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("ana.martinez@email.com"));
        assert!(looks_like_email("a@b.c"));

        assert!(!looks_like_email("ana martinez@email.com"));
        assert!(!looks_like_email("ana@email"));
        assert!(!looks_like_email("@email.com"));
        assert!(!looks_like_email("ana@.com"));
        assert!(!looks_like_email("ana@email."));
        assert!(!looks_like_email("ana@@email.com"));
        assert!(!looks_like_email("ana.martinez.email.com"));
    }
}
