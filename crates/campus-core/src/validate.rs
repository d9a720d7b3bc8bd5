//! Field-level validation support for request payloads.
//!
//! Each entity module defines a draft type (the unvalidated payload) that
//! converts into its validated counterpart via an `into_*` method returning
//! `Result<_, ValidationErrors>`. The API layer serialises the error map
//! into the `errors` object of the response envelope.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

// ─── Error map ───────────────────────────────────────────────────────────────

/// Field name → messages, accumulated across all fields of a payload so a
/// response reports every problem at once rather than the first one hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
  fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
  pub fn new() -> Self { Self::default() }

  pub fn add(&mut self, field: &str, message: impl Into<String>) {
    self
      .fields
      .entry(field.to_owned())
      .or_default()
      .push(message.into());
  }

  pub fn is_empty(&self) -> bool { self.fields.is_empty() }

  pub fn contains(&self, field: &str) -> bool {
    self.fields.contains_key(field)
  }

  /// `Err(self)` when any message was recorded, `Ok(())` otherwise.
  pub fn into_result(self) -> Result<(), Self> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, messages) in &self.fields {
      for message in messages {
        if !first {
          write!(f, "; ")?;
        }
        write!(f, "{field}: {message}")?;
        first = false;
      }
    }
    Ok(())
  }
}

// ─── Shared field rules ──────────────────────────────────────────────────────

/// Structural email check: one `@`, non-empty local part, and a dotted
/// domain. Deliverability is the notifier's problem, not validation's.
pub fn is_valid_email(value: &str) -> bool {
  match value.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
    }
    None => false,
  }
}

/// `name`: required, at most 255 characters.
pub(crate) fn required_name(
  errors: &mut ValidationErrors,
  value: Option<String>,
) -> Option<String> {
  match value {
    None => {
      errors.add("name", "name is required");
      None
    }
    Some(v) => checked_name(errors, v),
  }
}

pub(crate) fn checked_name(
  errors: &mut ValidationErrors,
  value: String,
) -> Option<String> {
  if value.is_empty() {
    errors.add("name", "name is required");
    None
  } else if value.chars().count() > 255 {
    errors.add("name", "name must be at most 255 characters");
    None
  } else {
    Some(value)
  }
}

/// `description`: required, non-empty.
pub(crate) fn required_description(
  errors: &mut ValidationErrors,
  value: Option<String>,
) -> Option<String> {
  match value {
    None => {
      errors.add("description", "description is required");
      None
    }
    Some(v) => checked_description(errors, v),
  }
}

pub(crate) fn checked_description(
  errors: &mut ValidationErrors,
  value: String,
) -> Option<String> {
  if value.is_empty() {
    errors.add("description", "description is required");
    None
  } else {
    Some(value)
  }
}

/// `workload`: required integer, at least 1.
pub(crate) fn required_workload(
  errors: &mut ValidationErrors,
  value: Option<i64>,
) -> Option<u32> {
  match value {
    None => {
      errors.add("workload", "workload is required");
      None
    }
    Some(v) => checked_workload(errors, v),
  }
}

pub(crate) fn checked_workload(
  errors: &mut ValidationErrors,
  value: i64,
) -> Option<u32> {
  match u32::try_from(value) {
    Ok(w) if w >= 1 => Some(w),
    _ => {
      errors.add("workload", "workload must be an integer of at least 1");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn email_shapes() {
    assert!(is_valid_email("alice@example.com"));
    assert!(is_valid_email("a.b+tag@sub.example.org"));
    assert!(!is_valid_email("no-at-sign"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("alice@nodot"));
    assert!(!is_valid_email("alice@.com"));
  }

  #[test]
  fn workload_bounds() {
    let mut errors = ValidationErrors::new();
    assert_eq!(checked_workload(&mut errors, 1), Some(1));
    assert_eq!(checked_workload(&mut errors, 360), Some(360));
    assert!(errors.is_empty());

    assert_eq!(checked_workload(&mut errors, 0), None);
    assert_eq!(checked_workload(&mut errors, -5), None);
    assert!(errors.contains("workload"));
  }

  #[test]
  fn errors_accumulate_per_field() {
    let mut errors = ValidationErrors::new();
    errors.add("name", "name is required");
    errors.add("workload", "workload is required");
    assert!(errors.contains("name"));
    assert!(errors.contains("workload"));
    assert!(errors.clone().into_result().is_err());
    assert_eq!(
      errors.to_string(),
      "name: name is required; workload: workload is required"
    );
  }
}
