//! Field-level validation error accumulation.
//!
//! Payload validation reports every failing field at once, so a caller can
//! fix a whole form in one round trip. Validation never panics and never
//! throws for expected input-shape problems: it returns this type inside a
//! `Result`.

use std::fmt;

use serde::Serialize;

/// A single failing field with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulates per-field validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// `Ok(())` when no failure was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_errors_resolve_to_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn collects_every_failure() {
        let mut errors = FieldErrors::new();
        errors.push("nom", "le nom est requis");
        errors.push("secteur", "secteur inconnu");

        let err = errors.into_result().unwrap_err();
        assert_eq!(err.errors().len(), 2);
        assert_eq!(err.errors()[0].field, "nom");
        assert_eq!(err.errors()[1].field, "secteur");
    }

    #[test]
    fn display_joins_fields() {
        let mut errors = FieldErrors::new();
        errors.push("nom", "requis");
        errors.push("secteur", "inconnu");
        assert_eq!(errors.to_string(), "nom: requis; secteur: inconnu");
    }

    #[test]
    fn serializes_as_a_flat_array() {
        let mut errors = FieldErrors::new();
        errors.push("nom", "requis");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "field": "nom", "message": "requis" }])
        );
    }
}
