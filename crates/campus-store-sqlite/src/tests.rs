//! Integration tests for `SqliteStore` and the enrollment workflow against
//! an in-memory database.

use std::sync::{
  Arc,
  atomic::{AtomicUsize, Ordering},
};

use campus_core::{
  Error,
  course::{Course, CourseUpdate, NewCourse},
  enroll::EnrollmentWorkflow,
  enrollment::{Enrollment, EnrollmentStatus, EnrollmentUpdate},
  notify::EnrollmentNotifier,
  store::{EnrollmentFilter, SchoolStore},
  student::{NewStudent, Student, StudentDetail, StudentUpdate},
  subject::{NewSubject, SubjectUpdate},
};
use chrono::{NaiveDate, Utc};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Fakes ───────────────────────────────────────────────────────────────────

/// Notifier that counts the confirmations requested of it.
#[derive(Default)]
struct RecordingNotifier {
  sent: AtomicUsize,
}

impl EnrollmentNotifier for RecordingNotifier {
  type Error = std::convert::Infallible;

  async fn send_confirmation(
    &self,
    _enrollment: &Enrollment,
    _student: &Student,
    _course: &Course,
  ) -> Result<(), Self::Error> {
    self.sent.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }
}

/// Notifier whose delivery always fails.
struct FailingNotifier;

impl EnrollmentNotifier for FailingNotifier {
  type Error = std::io::Error;

  async fn send_confirmation(
    &self,
    _enrollment: &Enrollment,
    _student: &Student,
    _course: &Course,
  ) -> Result<(), Self::Error> {
    Err(std::io::Error::other("notification relay unreachable"))
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn new_course(name: &str) -> NewCourse {
  NewCourse {
    name:        name.into(),
    description: format!("{name} program"),
    workload:    3200,
  }
}

fn new_student(cpf: &str, email: &str, course_ids: Vec<i64>) -> NewStudent {
  NewStudent {
    name: "Ana Souza".into(),
    cpf: cpf.into(),
    birth_date: NaiveDate::from_ymd_opt(1998, 3, 20).unwrap(),
    email: email.into(),
    course_ids,
  }
}

async fn sample_course(s: &SqliteStore) -> Course {
  s.add_course(new_course("Computer Science")).await.unwrap()
}

async fn sample_student(s: &SqliteStore, course_id: i64) -> StudentDetail {
  s.add_student(new_student("12345678901", "ana@example.com", vec![course_id]))
    .await
    .unwrap()
}

// ─── Courses ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_course() {
  let s = store().await;

  let course = sample_course(&s).await;
  assert_eq!(course.name, "Computer Science");
  assert_eq!(course.workload, 3200);

  let fetched = s.get_course(course.course_id).await.unwrap().unwrap();
  assert_eq!(fetched.course_id, course.course_id);
  assert_eq!(fetched.description, course.description);
}

#[tokio::test]
async fn get_course_missing_returns_none() {
  let s = store().await;
  assert!(s.get_course(999).await.unwrap().is_none());
}

#[tokio::test]
async fn list_courses_in_id_order() {
  let s = store().await;
  let a = s.add_course(new_course("Mathematics")).await.unwrap();
  let b = s.add_course(new_course("Physics")).await.unwrap();

  let all = s.list_courses().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].course_id, a.course_id);
  assert_eq!(all[1].course_id, b.course_id);
}

#[tokio::test]
async fn update_course_applies_only_present_fields() {
  let s = store().await;
  let course = sample_course(&s).await;

  let updated = s
    .update_course(course.course_id, CourseUpdate {
      workload: Some(2800),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.workload, 2800);
  assert_eq!(updated.name, course.name);
  assert_eq!(updated.created_at, course.created_at);
}

#[tokio::test]
async fn update_course_missing_errors() {
  let s = store().await;
  let err = s
    .update_course(42, CourseUpdate::default())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CourseNotFound(42)));
}

#[tokio::test]
async fn delete_course_without_enrollments() {
  let s = store().await;
  let course = sample_course(&s).await;

  s.delete_course(course.course_id).await.unwrap();
  assert!(s.get_course(course.course_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_course_with_enrollments_conflicts() {
  let s = store().await;
  let course = sample_course(&s).await;
  sample_student(&s, course.course_id).await;

  let err = s.delete_course(course.course_id).await.unwrap_err();
  assert!(matches!(err, Error::CourseHasEnrollments(_)));

  // Still there.
  assert!(s.get_course(course.course_id).await.unwrap().is_some());
}

// ─── Subjects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_subject_attaches_courses() {
  let s = store().await;
  let course = sample_course(&s).await;

  let detail = s
    .add_subject(NewSubject {
      name:        "Algorithms".into(),
      description: "Sorting, searching, graphs".into(),
      workload:    80,
      course_ids:  vec![course.course_id],
    })
    .await
    .unwrap();

  assert_eq!(detail.courses.len(), 1);
  assert_eq!(detail.courses[0].course_id, course.course_id);
}

#[tokio::test]
async fn add_subject_unknown_course_errors() {
  let s = store().await;
  let err = s
    .add_subject(NewSubject {
      name:        "Algorithms".into(),
      description: "Sorting, searching, graphs".into(),
      workload:    80,
      course_ids:  vec![77],
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CourseNotFound(77)));
}

#[tokio::test]
async fn attach_subject_then_duplicate_conflicts() {
  let s = store().await;
  let course = sample_course(&s).await;
  let subject = s
    .add_subject(NewSubject {
      name:        "Calculus".into(),
      description: "Limits and derivatives".into(),
      workload:    60,
      course_ids:  vec![],
    })
    .await
    .unwrap();

  let detail = s
    .attach_subject_to_course(subject.subject.subject_id, course.course_id)
    .await
    .unwrap();
  assert_eq!(detail.courses.len(), 1);

  let err = s
    .attach_subject_to_course(subject.subject.subject_id, course.course_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::SubjectAlreadyAttached { .. }));
}

#[tokio::test]
async fn list_subjects_filtered_by_course() {
  let s = store().await;
  let course = sample_course(&s).await;
  let other = s.add_course(new_course("Philosophy")).await.unwrap();

  s.add_subject(NewSubject {
    name:        "Algorithms".into(),
    description: "In scope".into(),
    workload:    80,
    course_ids:  vec![course.course_id],
  })
  .await
  .unwrap();
  s.add_subject(NewSubject {
    name:        "Ethics".into(),
    description: "Out of scope".into(),
    workload:    40,
    course_ids:  vec![other.course_id],
  })
  .await
  .unwrap();

  let filtered = s.list_subjects(Some(course.course_id)).await.unwrap();
  assert_eq!(filtered.len(), 1);
  assert_eq!(filtered[0].subject.name, "Algorithms");

  let all = s.list_subjects(None).await.unwrap();
  assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn update_subject_replaces_course_links() {
  let s = store().await;
  let a = s.add_course(new_course("Mathematics")).await.unwrap();
  let b = s.add_course(new_course("Physics")).await.unwrap();

  let subject = s
    .add_subject(NewSubject {
      name:        "Linear Algebra".into(),
      description: "Vector spaces".into(),
      workload:    60,
      course_ids:  vec![a.course_id],
    })
    .await
    .unwrap();

  let updated = s
    .update_subject(subject.subject.subject_id, SubjectUpdate {
      course_ids: Some(vec![b.course_id]),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.courses.len(), 1);
  assert_eq!(updated.courses[0].course_id, b.course_id);
}

#[tokio::test]
async fn delete_subject_missing_errors() {
  let s = store().await;
  let err = s.delete_subject(11).await.unwrap_err();
  assert!(matches!(err, Error::SubjectNotFound(11)));
}

// ─── Students ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_student_enrolls_in_courses() {
  let s = store().await;
  let course = sample_course(&s).await;

  let detail = sample_student(&s, course.course_id).await;
  assert_eq!(detail.courses.len(), 1);
  assert_eq!(detail.courses[0].course_id, course.course_id);

  // The initial link is an enrollment row.
  assert!(
    s.enrollment_exists(detail.student.student_id, course.course_id)
      .await
      .unwrap()
  );
}

#[tokio::test]
async fn add_student_duplicate_cpf_errors() {
  let s = store().await;
  let course = sample_course(&s).await;
  sample_student(&s, course.course_id).await;

  let err = s
    .add_student(new_student(
      "12345678901",
      "other@example.com",
      vec![course.course_id],
    ))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateCpf(_)));
}

#[tokio::test]
async fn add_student_duplicate_email_errors() {
  let s = store().await;
  let course = sample_course(&s).await;
  sample_student(&s, course.course_id).await;

  let err = s
    .add_student(new_student(
      "10987654321",
      "ana@example.com",
      vec![course.course_id],
    ))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateEmail(_)));
}

#[tokio::test]
async fn add_student_unknown_course_errors() {
  let s = store().await;
  let err = s
    .add_student(new_student("12345678901", "ana@example.com", vec![5]))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CourseNotFound(5)));
}

#[tokio::test]
async fn find_student_by_cpf() {
  let s = store().await;
  let course = sample_course(&s).await;
  let created = sample_student(&s, course.course_id).await;

  let found = s
    .find_student_by_cpf("12345678901")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.student.student_id, created.student.student_id);
  assert_eq!(found.courses.len(), 1);

  assert!(s.find_student_by_cpf("00000000000").await.unwrap().is_none());
}

#[tokio::test]
async fn list_students_filtered_by_course() {
  let s = store().await;
  let a = s.add_course(new_course("Mathematics")).await.unwrap();
  let b = s.add_course(new_course("Physics")).await.unwrap();

  s.add_student(new_student("12345678901", "ana@example.com", vec![
    a.course_id,
  ]))
  .await
  .unwrap();
  s.add_student(new_student("10987654321", "bia@example.com", vec![
    b.course_id,
  ]))
  .await
  .unwrap();

  let in_a = s.list_students(Some(a.course_id)).await.unwrap();
  assert_eq!(in_a.len(), 1);
  assert_eq!(in_a[0].student.cpf, "12345678901");

  let all = s.list_students(None).await.unwrap();
  assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn update_student_uniqueness_excludes_self() {
  let s = store().await;
  let course = sample_course(&s).await;
  let detail = sample_student(&s, course.course_id).await;

  // Re-submitting the student's own cpf/email is not a conflict.
  let updated = s
    .update_student(detail.student.student_id, StudentUpdate {
      cpf: Some("12345678901".into()),
      email: Some("ana@example.com".into()),
      name: Some("Ana S. Souza".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.student.name, "Ana S. Souza");
}

#[tokio::test]
async fn update_student_duplicate_cpf_errors() {
  let s = store().await;
  let course = sample_course(&s).await;
  sample_student(&s, course.course_id).await;
  let other = s
    .add_student(new_student("10987654321", "bia@example.com", vec![
      course.course_id,
    ]))
    .await
    .unwrap();

  let err = s
    .update_student(other.student.student_id, StudentUpdate {
      cpf: Some("12345678901".into()),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateCpf(_)));
}

#[tokio::test]
async fn update_student_replaces_enrollment_links() {
  let s = store().await;
  let a = s.add_course(new_course("Mathematics")).await.unwrap();
  let b = s.add_course(new_course("Physics")).await.unwrap();
  let detail = sample_student(&s, a.course_id).await;

  let updated = s
    .update_student(detail.student.student_id, StudentUpdate {
      course_ids: Some(vec![b.course_id]),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.courses.len(), 1);
  assert_eq!(updated.courses[0].course_id, b.course_id);
  assert!(
    !s.enrollment_exists(detail.student.student_id, a.course_id)
      .await
      .unwrap()
  );
}

#[tokio::test]
async fn attach_student_then_duplicate_conflicts() {
  let s = store().await;
  let a = s.add_course(new_course("Mathematics")).await.unwrap();
  let b = s.add_course(new_course("Physics")).await.unwrap();
  let detail = sample_student(&s, a.course_id).await;

  let attached = s
    .attach_student_to_course(detail.student.student_id, b.course_id)
    .await
    .unwrap();
  assert_eq!(attached.courses.len(), 2);

  let err = s
    .attach_student_to_course(detail.student.student_id, b.course_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::AlreadyEnrolled { .. }));
}

#[tokio::test]
async fn delete_student_cascades_enrollments() {
  let s = store().await;
  let course = sample_course(&s).await;
  let detail = sample_student(&s, course.course_id).await;

  s.delete_student(detail.student.student_id).await.unwrap();

  assert!(s.get_student(detail.student.student_id).await.unwrap().is_none());
  assert!(
    !s.enrollment_exists(detail.student.student_id, course.course_id)
      .await
      .unwrap()
  );
}

// ─── Enrollment workflow ─────────────────────────────────────────────────────

fn workflow(
  s: &SqliteStore,
  notifier: Arc<RecordingNotifier>,
) -> EnrollmentWorkflow<SqliteStore, RecordingNotifier> {
  EnrollmentWorkflow::new(Arc::new(s.clone()), notifier)
}

/// A student plus a course they are not yet enrolled in. Students must
/// start with one course, so a scratch course holds the initial link.
async fn unenrolled_student(s: &SqliteStore) -> (i64, i64) {
  let scratch = s.add_course(new_course("Scratch")).await.unwrap();
  let target = s.add_course(new_course("Target")).await.unwrap();
  let student = s
    .add_student(new_student("12345678901", "ana@example.com", vec![
      scratch.course_id,
    ]))
    .await
    .unwrap();
  (student.student.student_id, target.course_id)
}

#[tokio::test]
async fn enroll_creates_active_enrollment_and_notifies() {
  let s = store().await;
  let (student_id, course_id) = unenrolled_student(&s).await;
  let notifier = Arc::new(RecordingNotifier::default());
  let wf = workflow(&s, notifier.clone());

  let detail = wf.enroll(student_id, course_id).await.unwrap();

  assert_eq!(detail.enrollment.status, EnrollmentStatus::Active);
  assert_eq!(detail.enrollment.student_id, student_id);
  assert_eq!(detail.enrollment.course_id, course_id);
  assert!(detail.enrollment.suspended_at.is_none());
  assert!(
    (Utc::now() - detail.enrollment.enrolled_at).num_seconds().abs() < 5
  );

  // Relations come back populated.
  assert_eq!(detail.student.student_id, student_id);
  assert_eq!(detail.course.course_id, course_id);

  assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn enroll_persists_even_when_notification_fails() {
  let s = store().await;
  let (student_id, course_id) = unenrolled_student(&s).await;
  let wf = EnrollmentWorkflow::new(Arc::new(s.clone()), Arc::new(FailingNotifier));

  // The call still reports success…
  let detail = wf.enroll(student_id, course_id).await.unwrap();

  // …and the row is durably committed.
  let stored = s
    .get_enrollment_detail(detail.enrollment.enrollment_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(stored.enrollment.status, EnrollmentStatus::Active);
}

#[tokio::test]
async fn enroll_twice_conflicts_without_second_row() {
  let s = store().await;
  let (student_id, course_id) = unenrolled_student(&s).await;
  let notifier = Arc::new(RecordingNotifier::default());
  let wf = workflow(&s, notifier.clone());

  wf.enroll(student_id, course_id).await.unwrap();
  let err = wf.enroll(student_id, course_id).await.unwrap_err();
  assert!(matches!(
    err,
    Error::AlreadyEnrolled { student_id: sid, course_id: cid }
      if sid == student_id && cid == course_id
  ));

  let rows = s
    .list_enrollments(EnrollmentFilter {
      student_id: Some(student_id),
      course_id: Some(course_id),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);

  // No confirmation for the rejected attempt.
  assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn enroll_unknown_student_or_course_errors() {
  let s = store().await;
  let course = sample_course(&s).await;
  let student = sample_student(&s, course.course_id).await;
  let wf = workflow(&s, Arc::new(RecordingNotifier::default()));

  let err = wf.enroll(404, course.course_id).await.unwrap_err();
  assert!(matches!(err, Error::StudentNotFound(404)));

  let err = wf
    .enroll(student.student.student_id, 404)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CourseNotFound(404)));
}

#[tokio::test]
async fn create_enrollment_maps_unique_violation_to_conflict() {
  let s = store().await;
  let (student_id, course_id) = unenrolled_student(&s).await;

  // Call the store directly, skipping the workflow's pre-check, so the
  // unique index itself rejects the duplicate.
  s.create_enrollment(student_id, course_id).await.unwrap();
  let err = s.create_enrollment(student_id, course_id).await.unwrap_err();
  assert!(matches!(err, Error::AlreadyEnrolled { .. }));
}

#[tokio::test]
async fn suspend_stamps_suspended_at() {
  let s = store().await;
  let (student_id, course_id) = unenrolled_student(&s).await;
  let wf = workflow(&s, Arc::new(RecordingNotifier::default()));

  let detail = wf.enroll(student_id, course_id).await.unwrap();
  let suspended = wf.suspend(detail.enrollment.enrollment_id).await.unwrap();

  assert_eq!(suspended.status, EnrollmentStatus::Suspended);
  assert!(suspended.suspended_at.is_some());
}

#[tokio::test]
async fn suspend_twice_is_invalid() {
  let s = store().await;
  let (student_id, course_id) = unenrolled_student(&s).await;
  let wf = workflow(&s, Arc::new(RecordingNotifier::default()));

  let detail = wf.enroll(student_id, course_id).await.unwrap();
  wf.suspend(detail.enrollment.enrollment_id).await.unwrap();

  let err = wf
    .suspend(detail.enrollment.enrollment_id)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::InvalidTransition {
      from: EnrollmentStatus::Suspended,
      action: "suspend",
    }
  ));
}

#[tokio::test]
async fn suspend_cancelled_is_invalid() {
  let s = store().await;
  let (student_id, course_id) = unenrolled_student(&s).await;
  let wf = workflow(&s, Arc::new(RecordingNotifier::default()));

  let detail = wf.enroll(student_id, course_id).await.unwrap();
  s.update_enrollment(detail.enrollment.enrollment_id, EnrollmentUpdate {
    status: Some(EnrollmentStatus::Cancelled),
  })
  .await
  .unwrap();

  let err = wf
    .suspend(detail.enrollment.enrollment_id)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::InvalidTransition {
      from: EnrollmentStatus::Cancelled,
      ..
    }
  ));
}

#[tokio::test]
async fn suspend_then_reactivate_roundtrip() {
  let s = store().await;
  let (student_id, course_id) = unenrolled_student(&s).await;
  let wf = workflow(&s, Arc::new(RecordingNotifier::default()));

  let detail = wf.enroll(student_id, course_id).await.unwrap();
  let id = detail.enrollment.enrollment_id;

  wf.suspend(id).await.unwrap();
  let restored = wf.reactivate(id).await.unwrap();

  assert_eq!(restored.status, EnrollmentStatus::Active);
  assert!(restored.suspended_at.is_none());
}

#[tokio::test]
async fn reactivate_active_is_invalid() {
  let s = store().await;
  let (student_id, course_id) = unenrolled_student(&s).await;
  let wf = workflow(&s, Arc::new(RecordingNotifier::default()));

  let detail = wf.enroll(student_id, course_id).await.unwrap();
  let err = wf
    .reactivate(detail.enrollment.enrollment_id)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::InvalidTransition {
      from: EnrollmentStatus::Active,
      action: "reactivate",
    }
  ));
}

#[tokio::test]
async fn direct_update_never_touches_suspended_at() {
  let s = store().await;
  let (student_id, course_id) = unenrolled_student(&s).await;
  let wf = workflow(&s, Arc::new(RecordingNotifier::default()));

  let detail = wf.enroll(student_id, course_id).await.unwrap();
  let id = detail.enrollment.enrollment_id;

  // Administrative path can set `suspended` without a timestamp…
  let updated = s
    .update_enrollment(id, EnrollmentUpdate {
      status: Some(EnrollmentStatus::Suspended),
    })
    .await
    .unwrap();
  assert_eq!(updated.status, EnrollmentStatus::Suspended);
  assert!(updated.suspended_at.is_none());

  // …and a no-op patch changes nothing.
  let unchanged = s
    .update_enrollment(id, EnrollmentUpdate::default())
    .await
    .unwrap();
  assert_eq!(unchanged.status, EnrollmentStatus::Suspended);
}

#[tokio::test]
async fn list_enrollments_applies_equality_filters() {
  let s = store().await;
  let a = s.add_course(new_course("Mathematics")).await.unwrap();
  let b = s.add_course(new_course("Physics")).await.unwrap();
  let ana = s
    .add_student(new_student("12345678901", "ana@example.com", vec![
      a.course_id,
    ]))
    .await
    .unwrap();
  let bia = s
    .add_student(new_student("10987654321", "bia@example.com", vec![
      b.course_id,
    ]))
    .await
    .unwrap();
  let wf = workflow(&s, Arc::new(RecordingNotifier::default()));

  let cross = wf
    .enroll(ana.student.student_id, b.course_id)
    .await
    .unwrap();
  wf.suspend(cross.enrollment.enrollment_id).await.unwrap();

  let for_ana = s
    .list_enrollments(EnrollmentFilter {
      student_id: Some(ana.student.student_id),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(for_ana.len(), 2);

  let in_b = s
    .list_enrollments(EnrollmentFilter {
      course_id: Some(b.course_id),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(in_b.len(), 2);
  assert!(
    in_b
      .iter()
      .any(|d| d.student.student_id == bia.student.student_id)
  );

  let suspended = s
    .list_enrollments(EnrollmentFilter {
      status: Some(EnrollmentStatus::Suspended),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(suspended.len(), 1);
  assert_eq!(
    suspended[0].enrollment.enrollment_id,
    cross.enrollment.enrollment_id
  );
}

#[tokio::test]
async fn delete_enrollment_is_unconditional() {
  let s = store().await;
  let (student_id, course_id) = unenrolled_student(&s).await;
  let wf = workflow(&s, Arc::new(RecordingNotifier::default()));

  let detail = wf.enroll(student_id, course_id).await.unwrap();
  wf.suspend(detail.enrollment.enrollment_id).await.unwrap();

  s.delete_enrollment(detail.enrollment.enrollment_id)
    .await
    .unwrap();
  assert!(
    s.get_enrollment(detail.enrollment.enrollment_id)
      .await
      .unwrap()
      .is_none()
  );

  let err = s
    .delete_enrollment(detail.enrollment.enrollment_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::EnrollmentNotFound(_)));
}
