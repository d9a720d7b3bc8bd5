//! Enrollment orchestration: creation with its confirmation side effect,
//! plus the guarded suspend/reactivate transitions.

use std::sync::Arc;

use chrono::Utc;

use crate::{
  Error, Result,
  enrollment::{Enrollment, EnrollmentDetail},
  notify::EnrollmentNotifier,
  store::SchoolStore,
};

/// Orchestrates enrollment creation and status transitions.
///
/// Both collaborators are injected explicitly so tests can substitute fakes;
/// nothing in here reaches for ambient state.
pub struct EnrollmentWorkflow<S, N> {
  store:    Arc<S>,
  notifier: Arc<N>,
}

impl<S, N> EnrollmentWorkflow<S, N>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
    Self { store, notifier }
  }

  /// Enroll a student in a course and dispatch a confirmation.
  ///
  /// The existence checks, the insert, and the read-back of the populated
  /// enrollment are a single atomic storage operation. The confirmation is
  /// dispatched only after the enrollment is durable, and its failure is
  /// logged and swallowed — a returned `Ok` means the row is committed
  /// whatever happened to the notification.
  pub async fn enroll(
    &self,
    student_id: i64,
    course_id: i64,
  ) -> Result<EnrollmentDetail> {
    // Pre-check gives a clean conflict for the common case; under a race the
    // unique index inside create_enrollment is the final arbiter.
    if self.store.enrollment_exists(student_id, course_id).await? {
      return Err(Error::AlreadyEnrolled {
        student_id,
        course_id,
      });
    }

    let detail = self.store.create_enrollment(student_id, course_id).await?;

    if let Err(e) = self
      .notifier
      .send_confirmation(&detail.enrollment, &detail.student, &detail.course)
      .await
    {
      tracing::error!(
        enrollment_id = detail.enrollment.enrollment_id,
        student_email = %detail.student.email,
        error = %e,
        "failed to send enrollment confirmation",
      );
    }

    Ok(detail)
  }

  /// Suspend an active enrollment, stamping `suspended_at`.
  pub async fn suspend(&self, enrollment_id: i64) -> Result<Enrollment> {
    let enrollment = self
      .store
      .get_enrollment(enrollment_id)
      .await?
      .ok_or(Error::EnrollmentNotFound(enrollment_id))?;

    let next = enrollment.status.suspend()?;
    self
      .store
      .set_enrollment_status(enrollment_id, next, Some(Utc::now()))
      .await
  }

  /// Reactivate a suspended enrollment, clearing `suspended_at`.
  pub async fn reactivate(&self, enrollment_id: i64) -> Result<Enrollment> {
    let enrollment = self
      .store
      .get_enrollment(enrollment_id)
      .await?
      .ok_or(Error::EnrollmentNotFound(enrollment_id))?;

    let next = enrollment.status.reactivate()?;
    self.store.set_enrollment_status(enrollment_id, next, None).await
  }
}
