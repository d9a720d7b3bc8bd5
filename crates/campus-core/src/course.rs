//! Course — the curriculum unit students enroll in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{
  ValidationErrors, checked_description, checked_name, checked_workload,
  required_description, required_name, required_workload,
};

/// A course as persisted. Owns subjects (via the `course_subject` join) and
/// enrollments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
  pub course_id:   i64,
  pub name:        String,
  pub description: String,
  /// Credit-hour load; always at least 1.
  pub workload:    u32,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Validated input for creating a course.
#[derive(Debug, Clone)]
pub struct NewCourse {
  pub name:        String,
  pub description: String,
  pub workload:    u32,
}

/// Validated partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
  pub name:        Option<String>,
  pub description: Option<String>,
  pub workload:    Option<u32>,
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Unvalidated request payload for course create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseDraft {
  pub name:        Option<String>,
  pub description: Option<String>,
  pub workload:    Option<i64>,
}

impl CourseDraft {
  /// Validate a create payload: every field is required.
  pub fn into_new(self) -> Result<NewCourse, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = required_name(&mut errors, self.name);
    let description = required_description(&mut errors, self.description);
    let workload = required_workload(&mut errors, self.workload);

    match (name, description, workload) {
      (Some(name), Some(description), Some(workload)) => Ok(NewCourse {
        name,
        description,
        workload,
      }),
      _ => Err(errors),
    }
  }

  /// Validate an update payload: fields are optional but constrained when
  /// present.
  pub fn into_update(self) -> Result<CourseUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = self.name.and_then(|v| checked_name(&mut errors, v));
    let description = self
      .description
      .and_then(|v| checked_description(&mut errors, v));
    let workload = self
      .workload
      .and_then(|v| checked_workload(&mut errors, v));

    errors.into_result()?;
    Ok(CourseUpdate {
      name,
      description,
      workload,
    })
  }
}

// ─── Attach payload ──────────────────────────────────────────────────────────

/// Unvalidated body of the `attach-course` endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttachCourseDraft {
  pub course_id: Option<i64>,
}

impl AttachCourseDraft {
  pub fn into_course_id(self) -> Result<i64, ValidationErrors> {
    match self.course_id {
      Some(id) => Ok(id),
      None => {
        let mut errors = ValidationErrors::new();
        errors.add("course_id", "course_id is required");
        Err(errors)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn create_requires_all_fields() {
    let errors = CourseDraft::default().into_new().unwrap_err();
    assert!(errors.contains("name"));
    assert!(errors.contains("description"));
    assert!(errors.contains("workload"));
  }

  #[test]
  fn create_accepts_valid_payload() {
    let new = CourseDraft {
      name:        Some("Computer Science".into()),
      description: Some("Four-year undergraduate program".into()),
      workload:    Some(3200),
    }
    .into_new()
    .unwrap();
    assert_eq!(new.workload, 3200);
  }

  #[test]
  fn update_allows_partial_payload() {
    let update = CourseDraft {
      workload: Some(40),
      ..Default::default()
    }
    .into_update()
    .unwrap();
    assert!(update.name.is_none());
    assert_eq!(update.workload, Some(40));
  }

  #[test]
  fn update_rejects_zero_workload() {
    let errors = CourseDraft {
      workload: Some(0),
      ..Default::default()
    }
    .into_update()
    .unwrap_err();
    assert!(errors.contains("workload"));
  }

  #[test]
  fn name_over_255_chars_rejected() {
    let errors = CourseDraft {
      name: Some("x".repeat(256)),
      ..Default::default()
    }
    .into_update()
    .unwrap_err();
    assert!(errors.contains("name"));
  }
}
