//! The `EnrollmentNotifier` trait — confirmation dispatch for new
//! enrollments.

use std::future::Future;

use crate::{course::Course, enrollment::Enrollment, student::Student};

/// Sends a confirmation for a freshly-created enrollment.
///
/// Delivery is best-effort: the enrollment workflow logs a failure and moves
/// on. Implementations are never retried and must not assume the caller does
/// anything with their error beyond logging it.
pub trait EnrollmentNotifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn send_confirmation<'a>(
    &'a self,
    enrollment: &'a Enrollment,
    student: &'a Student,
    course: &'a Course,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
