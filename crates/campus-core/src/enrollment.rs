//! Enrollment — the record linking a student to a course, with a lifecycle
//! status.
//!
//! Enrollments are created through
//! [`EnrollmentWorkflow::enroll`](crate::enroll::EnrollmentWorkflow::enroll)
//! (or the attach path, which skips the confirmation side effect), never by
//! ad-hoc insertion. Status changes go through the guarded transitions below
//! or the unguarded administrative update.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result, course::Course, student::Student, validate::ValidationErrors,
};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle status of an enrollment. Created `active`; `cancelled` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
  Active,
  Suspended,
  Cancelled,
}

impl EnrollmentStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Active => "active",
      Self::Suspended => "suspended",
      Self::Cancelled => "cancelled",
    }
  }

  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "active" => Some(Self::Active),
      "suspended" => Some(Self::Suspended),
      "cancelled" => Some(Self::Cancelled),
      _ => None,
    }
  }

  /// Guard for the `suspend` transition: only an active enrollment can be
  /// suspended. Suspending a cancelled enrollment is rejected outright.
  pub fn suspend(self) -> Result<Self> {
    match self {
      Self::Active => Ok(Self::Suspended),
      from => Err(Error::InvalidTransition {
        from,
        action: "suspend",
      }),
    }
  }

  /// Guard for the `reactivate` transition: only a suspended enrollment can
  /// be reactivated.
  pub fn reactivate(self) -> Result<Self> {
    match self {
      Self::Suspended => Ok(Self::Active),
      from => Err(Error::InvalidTransition {
        from,
        action: "reactivate",
      }),
    }
  }
}

impl fmt::Display for EnrollmentStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Enrollment ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
  pub enrollment_id: i64,
  pub student_id:    i64,
  pub course_id:     i64,
  pub status:        EnrollmentStatus,
  /// Server-assigned at creation.
  pub enrolled_at:   DateTime<Utc>,
  /// Stamped by `suspend`, cleared by `reactivate`. The administrative
  /// update path never touches it.
  pub suspended_at:  Option<DateTime<Utc>>,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

impl Enrollment {
  pub fn is_active(&self) -> bool { self.status == EnrollmentStatus::Active }

  pub fn is_suspended(&self) -> bool {
    self.status == EnrollmentStatus::Suspended
  }

  pub fn is_cancelled(&self) -> bool {
    self.status == EnrollmentStatus::Cancelled
  }
}

/// An enrollment with its related student and course attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentDetail {
  #[serde(flatten)]
  pub enrollment: Enrollment,
  pub student:    Student,
  pub course:     Course,
}

// ─── Drafts ──────────────────────────────────────────────────────────────────

/// Unvalidated body of `POST /enrollments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollDraft {
  pub student_id: Option<i64>,
  pub course_id:  Option<i64>,
}

impl EnrollDraft {
  pub fn into_ids(self) -> Result<(i64, i64), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if self.student_id.is_none() {
      errors.add("student_id", "student_id is required");
    }
    if self.course_id.is_none() {
      errors.add("course_id", "course_id is required");
    }
    match (self.student_id, self.course_id) {
      (Some(student_id), Some(course_id)) => Ok((student_id, course_id)),
      _ => Err(errors),
    }
  }
}

/// Validated administrative update; bypasses the transition guards by
/// design, as a correction path for operators.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentUpdate {
  pub status: Option<EnrollmentStatus>,
}

/// Unvalidated body of `PATCH /enrollments/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentDraft {
  pub status: Option<String>,
}

impl EnrollmentDraft {
  pub fn into_update(self) -> Result<EnrollmentUpdate, ValidationErrors> {
    let status = match self.status.as_deref() {
      None => None,
      Some(value) => match EnrollmentStatus::parse(value) {
        Some(status) => Some(status),
        None => {
          let mut errors = ValidationErrors::new();
          errors
            .add("status", "status must be one of active, suspended, cancelled");
          return Err(errors);
        }
      },
    };
    Ok(EnrollmentUpdate { status })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn suspend_only_from_active() {
    assert_eq!(
      EnrollmentStatus::Active.suspend().unwrap(),
      EnrollmentStatus::Suspended
    );
    assert!(matches!(
      EnrollmentStatus::Suspended.suspend(),
      Err(Error::InvalidTransition {
        from: EnrollmentStatus::Suspended,
        action: "suspend",
      })
    ));
    assert!(matches!(
      EnrollmentStatus::Cancelled.suspend(),
      Err(Error::InvalidTransition {
        from: EnrollmentStatus::Cancelled,
        ..
      })
    ));
  }

  #[test]
  fn reactivate_only_from_suspended() {
    assert_eq!(
      EnrollmentStatus::Suspended.reactivate().unwrap(),
      EnrollmentStatus::Active
    );
    assert!(EnrollmentStatus::Active.reactivate().is_err());
    assert!(EnrollmentStatus::Cancelled.reactivate().is_err());
  }

  #[test]
  fn status_parse_roundtrip() {
    for status in [
      EnrollmentStatus::Active,
      EnrollmentStatus::Suspended,
      EnrollmentStatus::Cancelled,
    ] {
      assert_eq!(EnrollmentStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(EnrollmentStatus::parse("dropped"), None);
  }

  #[test]
  fn patch_draft_accepts_any_status_without_guards() {
    let update = EnrollmentDraft {
      status: Some("cancelled".into()),
    }
    .into_update()
    .unwrap();
    assert_eq!(update.status, Some(EnrollmentStatus::Cancelled));
  }

  #[test]
  fn patch_draft_rejects_unknown_status() {
    let errors = EnrollmentDraft {
      status: Some("paused".into()),
    }
    .into_update()
    .unwrap_err();
    assert!(errors.contains("status"));
  }

  #[test]
  fn enroll_draft_requires_both_ids() {
    let errors = EnrollDraft::default().into_ids().unwrap_err();
    assert!(errors.contains("student_id"));
    assert!(errors.contains("course_id"));
  }
}
