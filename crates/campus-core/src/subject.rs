//! Subject — a teaching unit attached to one or more courses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  course::Course,
  validate::{
    ValidationErrors, checked_description, checked_name, checked_workload,
    required_description, required_name, required_workload,
  },
};

/// A subject as persisted. Many-to-many with [`Course`] via the
/// `course_subject` join table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
  pub subject_id:  i64,
  pub name:        String,
  pub description: String,
  /// Credit-hour load; always at least 1.
  pub workload:    u32,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// A subject with the courses it is attached to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectDetail {
  #[serde(flatten)]
  pub subject: Subject,
  pub courses: Vec<Course>,
}

/// Validated input for creating a subject. `course_ids` may be empty; each
/// id present must reference an existing course.
#[derive(Debug, Clone)]
pub struct NewSubject {
  pub name:        String,
  pub description: String,
  pub workload:    u32,
  pub course_ids:  Vec<i64>,
}

/// Validated partial update; `course_ids = Some` replaces the course links.
#[derive(Debug, Clone, Default)]
pub struct SubjectUpdate {
  pub name:        Option<String>,
  pub description: Option<String>,
  pub workload:    Option<u32>,
  pub course_ids:  Option<Vec<i64>>,
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Unvalidated request payload for subject create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectDraft {
  pub name:        Option<String>,
  pub description: Option<String>,
  pub workload:    Option<i64>,
  pub course_ids:  Option<Vec<i64>>,
}

impl SubjectDraft {
  pub fn into_new(self) -> Result<NewSubject, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = required_name(&mut errors, self.name);
    let description = required_description(&mut errors, self.description);
    let workload = required_workload(&mut errors, self.workload);

    match (name, description, workload) {
      (Some(name), Some(description), Some(workload)) => Ok(NewSubject {
        name,
        description,
        workload,
        course_ids: self.course_ids.unwrap_or_default(),
      }),
      _ => Err(errors),
    }
  }

  pub fn into_update(self) -> Result<SubjectUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = self.name.and_then(|v| checked_name(&mut errors, v));
    let description = self
      .description
      .and_then(|v| checked_description(&mut errors, v));
    let workload = self
      .workload
      .and_then(|v| checked_workload(&mut errors, v));

    errors.into_result()?;
    Ok(SubjectUpdate {
      name,
      description,
      workload,
      course_ids: self.course_ids,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn create_defaults_to_no_courses() {
    let new = SubjectDraft {
      name:        Some("Algorithms".into()),
      description: Some("Sorting, searching, graphs".into()),
      workload:    Some(80),
      course_ids:  None,
    }
    .into_new()
    .unwrap();
    assert!(new.course_ids.is_empty());
  }

  #[test]
  fn update_keeps_course_ids_distinct_from_absent() {
    let update = SubjectDraft {
      course_ids: Some(vec![]),
      ..Default::default()
    }
    .into_update()
    .unwrap();
    // Some(vec![]) means "detach from every course", not "leave alone".
    assert_eq!(update.course_ids, Some(vec![]));
  }
}
