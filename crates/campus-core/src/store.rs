//! The `SchoolStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `campus-store-sqlite`).
//! Higher layers (`campus-api`, the enrollment workflow) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  Result,
  course::{Course, CourseUpdate, NewCourse},
  enrollment::{
    Enrollment, EnrollmentDetail, EnrollmentStatus, EnrollmentUpdate,
  },
  student::{NewStudent, StudentDetail, StudentUpdate},
  subject::{NewSubject, SubjectDetail, SubjectUpdate},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Equality filters for [`SchoolStore::list_enrollments`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrollmentFilter {
  pub student_id: Option<i64>,
  pub course_id:  Option<i64>,
  pub status:     Option<EnrollmentStatus>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the relational store backing the school domain.
///
/// Methods return the domain taxonomy in [`crate::Error`] directly: NotFound
/// and conflict outcomes are part of the contract, and backends must map
/// constraint violations onto them rather than leak raw storage errors.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with `axum`).
pub trait SchoolStore: Send + Sync {
  // ── Courses ───────────────────────────────────────────────────────────

  /// Create and persist a course. Timestamps are set by the store.
  fn add_course(
    &self,
    new: NewCourse,
  ) -> impl Future<Output = Result<Course>> + Send + '_;

  /// Retrieve a course by id. Returns `None` if not found.
  fn get_course(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Course>>> + Send + '_;

  fn list_courses(&self) -> impl Future<Output = Result<Vec<Course>>> + Send + '_;

  /// Apply a partial update and return the stored course.
  fn update_course(
    &self,
    id: i64,
    patch: CourseUpdate,
  ) -> impl Future<Output = Result<Course>> + Send + '_;

  /// Delete a course. Fails with [`crate::Error::CourseHasEnrollments`] when
  /// any enrollment still references it.
  fn delete_course(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Subjects ──────────────────────────────────────────────────────────

  /// Create a subject and attach it to each course in `new.course_ids`.
  fn add_subject(
    &self,
    new: NewSubject,
  ) -> impl Future<Output = Result<SubjectDetail>> + Send + '_;

  fn get_subject(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<SubjectDetail>>> + Send + '_;

  /// List subjects, optionally restricted to those attached to a course.
  fn list_subjects(
    &self,
    course_id: Option<i64>,
  ) -> impl Future<Output = Result<Vec<SubjectDetail>>> + Send + '_;

  /// Apply a partial update. `patch.course_ids = Some` replaces the course
  /// links wholesale.
  fn update_subject(
    &self,
    id: i64,
    patch: SubjectUpdate,
  ) -> impl Future<Output = Result<SubjectDetail>> + Send + '_;

  fn delete_subject(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Add one subject↔course link. Fails with
  /// [`crate::Error::SubjectAlreadyAttached`] when the link exists.
  fn attach_subject_to_course(
    &self,
    subject_id: i64,
    course_id: i64,
  ) -> impl Future<Output = Result<SubjectDetail>> + Send + '_;

  // ── Students ──────────────────────────────────────────────────────────

  /// Create a student and enroll them in each course in `new.course_ids`.
  /// Enforces cpf/email uniqueness and course existence.
  fn add_student(
    &self,
    new: NewStudent,
  ) -> impl Future<Output = Result<StudentDetail>> + Send + '_;

  fn get_student(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<StudentDetail>>> + Send + '_;

  fn find_student_by_cpf<'a>(
    &'a self,
    cpf: &'a str,
  ) -> impl Future<Output = Result<Option<StudentDetail>>> + Send + 'a;

  /// List students, optionally restricted to those enrolled in a course.
  fn list_students(
    &self,
    course_id: Option<i64>,
  ) -> impl Future<Output = Result<Vec<StudentDetail>>> + Send + '_;

  /// Apply a partial update. Uniqueness checks exclude the student being
  /// updated; `patch.course_ids = Some` replaces the enrollment links.
  fn update_student(
    &self,
    id: i64,
    patch: StudentUpdate,
  ) -> impl Future<Output = Result<StudentDetail>> + Send + '_;

  /// Delete a student; their enrollments cascade away.
  fn delete_student(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// The attach path: inserts an enrollment row directly (status `active`,
  /// `enrolled_at` now) without the workflow's confirmation side effect.
  /// Fails with [`crate::Error::AlreadyEnrolled`] on a duplicate link.
  fn attach_student_to_course(
    &self,
    student_id: i64,
    course_id: i64,
  ) -> impl Future<Output = Result<StudentDetail>> + Send + '_;

  // ── Enrollments ───────────────────────────────────────────────────────

  /// Atomically verify that the student and course exist, insert the
  /// enrollment (status `active`, `enrolled_at` now), and read it back with
  /// its relations attached. The whole operation is one storage
  /// transaction; a unique-index violation surfaces as
  /// [`crate::Error::AlreadyEnrolled`].
  fn create_enrollment(
    &self,
    student_id: i64,
    course_id: i64,
  ) -> impl Future<Output = Result<EnrollmentDetail>> + Send + '_;

  fn enrollment_exists(
    &self,
    student_id: i64,
    course_id: i64,
  ) -> impl Future<Output = Result<bool>> + Send + '_;

  fn get_enrollment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Enrollment>>> + Send + '_;

  fn get_enrollment_detail(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<EnrollmentDetail>>> + Send + '_;

  fn list_enrollments(
    &self,
    filter: EnrollmentFilter,
  ) -> impl Future<Output = Result<Vec<EnrollmentDetail>>> + Send + '_;

  /// Transition path: writes `status` and `suspended_at` together.
  fn set_enrollment_status(
    &self,
    id: i64,
    status: EnrollmentStatus,
    suspended_at: Option<DateTime<Utc>>,
  ) -> impl Future<Output = Result<Enrollment>> + Send + '_;

  /// Administrative path: writes only the fields present in `patch` and
  /// never touches `suspended_at`.
  fn update_enrollment(
    &self,
    id: i64,
    patch: EnrollmentUpdate,
  ) -> impl Future<Output = Result<Enrollment>> + Send + '_;

  /// Delete an enrollment unconditionally.
  fn delete_enrollment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;
}
