//! Field-level validation errors.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Messages collected per form field.
///
/// # Example
///
/// ```
/// use hrms_engine::forms::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.add("reason", "Reason is required");
/// assert_eq!(errors.get("reason"), ["Reason is required".to_string()]);
/// assert!(errors.into_result().is_err());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[error("{}", self.summary())]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Records a message when `condition` is false.
    pub fn require(&mut self, condition: bool, field: &str, message: &str) {
        if !condition {
            self.add(field, message);
        }
    }

    /// Returns true when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the messages for `field`.
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true when `field` has at least one error.
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// All fields and their messages.
    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    /// Every message, one per line, in field order.
    pub fn summary(&self) -> String {
        self.fields
            .values()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub(crate) fn into_fields(self) -> BTreeMap<String, Vec<String>> {
        self.fields
    }
}

/// Returns true when `value` has non-whitespace content.
pub(crate) fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_messages_accumulate_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("amount", "Amount is required");
        errors.add("amount", "Amount must be positive");
        errors.require(false, "reason", "Reason is required");
        errors.require(true, "date", "Date is required");

        assert_eq!(errors.get("amount").len(), 2);
        assert!(errors.has("reason"));
        assert!(!errors.has("date"));
        assert_eq!(
            errors.to_string(),
            "Amount is required\nAmount must be positive\nReason is required"
        );
    }

    #[test]
    fn test_present() {
        assert!(present(Some("x")));
        assert!(!present(Some("   ")));
        assert!(!present(None));
    }
}
