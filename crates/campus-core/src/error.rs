//! Error types for `campus-core`.

use thiserror::Error;

use crate::{enrollment::EnrollmentStatus, validate::ValidationErrors};

/// The domain error taxonomy.
///
/// NotFound and conflict outcomes are part of the persistence-gateway
/// contract: backends map constraint violations onto the typed variants
/// instead of leaking raw storage errors, and the API layer maps each
/// variant onto an HTTP status.
#[derive(Debug, Error)]
pub enum Error {
  #[error("course not found: {0}")]
  CourseNotFound(i64),

  #[error("subject not found: {0}")]
  SubjectNotFound(i64),

  #[error("student not found: {0}")]
  StudentNotFound(i64),

  #[error("enrollment not found: {0}")]
  EnrollmentNotFound(i64),

  #[error("student {student_id} is already enrolled in course {course_id}")]
  AlreadyEnrolled { student_id: i64, course_id: i64 },

  #[error("subject {subject_id} is already attached to course {course_id}")]
  SubjectAlreadyAttached { subject_id: i64, course_id: i64 },

  #[error("course {0} has enrollments and cannot be deleted")]
  CourseHasEnrollments(i64),

  #[error("cpf {0:?} is already taken")]
  DuplicateCpf(String),

  #[error("email {0:?} is already taken")]
  DuplicateEmail(String),

  #[error("cannot {action} an enrollment with status {from}")]
  InvalidTransition {
    from:   EnrollmentStatus,
    action: &'static str,
  },

  #[error("validation failed: {0}")]
  Validation(ValidationErrors),

  #[error("storage error: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
