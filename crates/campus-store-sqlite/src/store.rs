//! [`SqliteStore`] — the SQLite implementation of [`SchoolStore`].

use std::{collections::BTreeSet, path::Path};

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use campus_core::{
  Error, Result,
  course::{Course, CourseUpdate, NewCourse},
  enrollment::{
    Enrollment, EnrollmentDetail, EnrollmentStatus, EnrollmentUpdate,
  },
  store::{EnrollmentFilter, SchoolStore},
  student::{NewStudent, StudentDetail, StudentUpdate},
  subject::{NewSubject, SubjectDetail, SubjectUpdate},
};

use crate::{
  encode::{
    RawCourse, RawEnrollment, RawStudent, RawSubject, encode_date, encode_dt,
  },
  error,
  schema::SCHEMA,
};

// ─── Column lists ────────────────────────────────────────────────────────────

const COURSE_COLS: &str =
  "course_id, name, description, workload, created_at, updated_at";
const SUBJECT_COLS: &str =
  "subject_id, name, description, workload, created_at, updated_at";
const STUDENT_COLS: &str =
  "student_id, name, cpf, birth_date, email, created_at, updated_at";
const ENROLLMENT_COLS: &str = "enrollment_id, student_id, course_id, status, \
   enrolled_at, suspended_at, created_at, updated_at";

/// Enrollment + student + course columns for the detail joins. Offsets:
/// enrollment at 0, student at 8, course at 15.
const ENROLLMENT_JOIN_COLS: &str = "\
   e.enrollment_id, e.student_id, e.course_id, e.status, e.enrolled_at, \
   e.suspended_at, e.created_at, e.updated_at, \
   s.student_id, s.name, s.cpf, s.birth_date, s.email, s.created_at, \
   s.updated_at, \
   c.course_id, c.name, c.description, c.workload, c.created_at, c.updated_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A campus store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// run serially on the connection's thread, so each `call` closure is a unit
/// of isolation on top of the explicit transactions used by multi-statement
/// writes.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(error::storage)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(error::storage)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(error::storage)
  }
}

// ─── SchoolStore impl ────────────────────────────────────────────────────────

impl SchoolStore for SqliteStore {
  // ── Courses ───────────────────────────────────────────────────────────────

  async fn add_course(&self, new: NewCourse) -> Result<Course> {
    let now_str = encode_dt(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO courses (name, description, workload, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![new.name, new.description, new.workload, now_str, now_str],
        )?;
        let id = conn.last_insert_rowid();
        Ok(conn.query_row(
          &format!("SELECT {COURSE_COLS} FROM courses WHERE course_id = ?1"),
          rusqlite::params![id],
          |row| RawCourse::from_row(row, 0),
        )?)
      })
      .await
      .map_err(error::storage)?;

    raw.into_course()
  }

  async fn get_course(&self, id: i64) -> Result<Option<Course>> {
    let raw = self
      .conn
      .call(move |conn| Ok(course_row(conn, id)?))
      .await
      .map_err(error::storage)?;

    raw.map(RawCourse::into_course).transpose()
  }

  async fn list_courses(&self) -> Result<Vec<Course>> {
    let raws = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COURSE_COLS} FROM courses ORDER BY course_id"
        ))?;
        let rows = stmt
          .query_map([], |row| RawCourse::from_row(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(error::storage)?;

    raws.into_iter().map(RawCourse::into_course).collect()
  }

  async fn update_course(&self, id: i64, patch: CourseUpdate) -> Result<Course> {
    let now_str = encode_dt(Utc::now());

    let result = self
      .conn
      .call(move |conn| {
        let Some(current) = course_row(conn, id)? else {
          return Ok(Err(Error::CourseNotFound(id)));
        };

        let name = patch.name.unwrap_or(current.name);
        let description = patch.description.unwrap_or(current.description);
        let workload = patch.workload.map(i64::from).unwrap_or(current.workload);

        conn.execute(
          "UPDATE courses SET name = ?1, description = ?2, workload = ?3, updated_at = ?4
           WHERE course_id = ?5",
          rusqlite::params![name, description, workload, now_str, id],
        )?;

        Ok(Ok(RawCourse {
          course_id: id,
          name,
          description,
          workload,
          created_at: current.created_at,
          updated_at: now_str,
        }))
      })
      .await
      .map_err(error::storage)?;

    result?.into_course()
  }

  async fn delete_course(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        if course_row(conn, id)?.is_none() {
          return Ok(Err(Error::CourseNotFound(id)));
        }
        let enrolled: bool = conn
          .query_row(
            "SELECT 1 FROM enrollments WHERE course_id = ?1 LIMIT 1",
            rusqlite::params![id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if enrolled {
          return Ok(Err(Error::CourseHasEnrollments(id)));
        }
        conn.execute(
          "DELETE FROM courses WHERE course_id = ?1",
          rusqlite::params![id],
        )?;
        Ok(Ok(()))
      })
      .await
      .map_err(error::storage)?
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn add_subject(&self, new: NewSubject) -> Result<SubjectDetail> {
    let now_str = encode_dt(Utc::now());

    let result = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let course_ids: BTreeSet<i64> = new.course_ids.iter().copied().collect();
        for &course_id in &course_ids {
          if !course_exists(&tx, course_id)? {
            return Ok(Err(Error::CourseNotFound(course_id)));
          }
        }

        tx.execute(
          "INSERT INTO subjects (name, description, workload, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![new.name, new.description, new.workload, now_str, now_str],
        )?;
        let id = tx.last_insert_rowid();

        for &course_id in &course_ids {
          tx.execute(
            "INSERT INTO course_subject (course_id, subject_id, created_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![course_id, id, now_str],
          )?;
        }

        let subject = tx.query_row(
          &format!("SELECT {SUBJECT_COLS} FROM subjects WHERE subject_id = ?1"),
          rusqlite::params![id],
          |row| RawSubject::from_row(row, 0),
        )?;
        let courses = courses_of_subject(&tx, id)?;
        tx.commit()?;
        Ok(Ok((subject, courses)))
      })
      .await
      .map_err(error::storage)?;

    let (subject, courses) = result?;
    subject_detail(subject, courses)
  }

  async fn get_subject(&self, id: i64) -> Result<Option<SubjectDetail>> {
    let found = self
      .conn
      .call(move |conn| {
        let Some(subject) = subject_row(conn, id)? else {
          return Ok(None);
        };
        let courses = courses_of_subject(conn, id)?;
        Ok(Some((subject, courses)))
      })
      .await
      .map_err(error::storage)?;

    found.map(|(s, c)| subject_detail(s, c)).transpose()
  }

  async fn list_subjects(
    &self,
    course_id: Option<i64>,
  ) -> Result<Vec<SubjectDetail>> {
    let found = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT s.subject_id, s.name, s.description, s.workload,
                  s.created_at, s.updated_at
           FROM subjects s
           LEFT JOIN course_subject cs ON cs.subject_id = s.subject_id
           WHERE ?1 IS NULL OR cs.course_id = ?1
           ORDER BY s.subject_id",
        )?;
        let subjects = stmt
          .query_map(rusqlite::params![course_id], |row| {
            RawSubject::from_row(row, 0)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut out = Vec::with_capacity(subjects.len());
        for subject in subjects {
          let courses = courses_of_subject(conn, subject.subject_id)?;
          out.push((subject, courses));
        }
        Ok(out)
      })
      .await
      .map_err(error::storage)?;

    found
      .into_iter()
      .map(|(s, c)| subject_detail(s, c))
      .collect()
  }

  async fn update_subject(
    &self,
    id: i64,
    patch: SubjectUpdate,
  ) -> Result<SubjectDetail> {
    let now_str = encode_dt(Utc::now());

    let result = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let Some(current) = subject_row(&tx, id)? else {
          return Ok(Err(Error::SubjectNotFound(id)));
        };

        let name = patch.name.unwrap_or(current.name);
        let description = patch.description.unwrap_or(current.description);
        let workload = patch.workload.map(i64::from).unwrap_or(current.workload);

        tx.execute(
          "UPDATE subjects SET name = ?1, description = ?2, workload = ?3, updated_at = ?4
           WHERE subject_id = ?5",
          rusqlite::params![name, description, workload, now_str, id],
        )?;

        if let Some(course_ids) = patch.course_ids {
          let wanted: BTreeSet<i64> = course_ids.into_iter().collect();
          for &course_id in &wanted {
            if !course_exists(&tx, course_id)? {
              return Ok(Err(Error::CourseNotFound(course_id)));
            }
          }
          tx.execute(
            "DELETE FROM course_subject WHERE subject_id = ?1",
            rusqlite::params![id],
          )?;
          for &course_id in &wanted {
            tx.execute(
              "INSERT INTO course_subject (course_id, subject_id, created_at)
               VALUES (?1, ?2, ?3)",
              rusqlite::params![course_id, id, now_str],
            )?;
          }
        }

        let subject = tx.query_row(
          &format!("SELECT {SUBJECT_COLS} FROM subjects WHERE subject_id = ?1"),
          rusqlite::params![id],
          |row| RawSubject::from_row(row, 0),
        )?;
        let courses = courses_of_subject(&tx, id)?;
        tx.commit()?;
        Ok(Ok((subject, courses)))
      })
      .await
      .map_err(error::storage)?;

    let (subject, courses) = result?;
    subject_detail(subject, courses)
  }

  async fn delete_subject(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM subjects WHERE subject_id = ?1",
          rusqlite::params![id],
        )?;
        if n == 0 {
          return Ok(Err(Error::SubjectNotFound(id)));
        }
        Ok(Ok(()))
      })
      .await
      .map_err(error::storage)?
  }

  async fn attach_subject_to_course(
    &self,
    subject_id: i64,
    course_id: i64,
  ) -> Result<SubjectDetail> {
    let now_str = encode_dt(Utc::now());

    let result = self
      .conn
      .call(move |conn| {
        if subject_row(conn, subject_id)?.is_none() {
          return Ok(Err(Error::SubjectNotFound(subject_id)));
        }
        if !course_exists(conn, course_id)? {
          return Ok(Err(Error::CourseNotFound(course_id)));
        }
        let linked: bool = conn
          .query_row(
            "SELECT 1 FROM course_subject WHERE subject_id = ?1 AND course_id = ?2",
            rusqlite::params![subject_id, course_id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if linked {
          return Ok(Err(Error::SubjectAlreadyAttached {
            subject_id,
            course_id,
          }));
        }

        conn.execute(
          "INSERT INTO course_subject (course_id, subject_id, created_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![course_id, subject_id, now_str],
        )?;

        let subject = conn.query_row(
          &format!("SELECT {SUBJECT_COLS} FROM subjects WHERE subject_id = ?1"),
          rusqlite::params![subject_id],
          |row| RawSubject::from_row(row, 0),
        )?;
        let courses = courses_of_subject(conn, subject_id)?;
        Ok(Ok((subject, courses)))
      })
      .await
      .map_err(error::storage)?;

    let (subject, courses) = result?;
    subject_detail(subject, courses)
  }

  // ── Students ──────────────────────────────────────────────────────────────

  async fn add_student(&self, new: NewStudent) -> Result<StudentDetail> {
    let now_str = encode_dt(Utc::now());
    let birth_str = encode_date(new.birth_date);

    let result = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let cpf_taken: bool = tx
          .query_row(
            "SELECT 1 FROM students WHERE cpf = ?1",
            rusqlite::params![new.cpf],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if cpf_taken {
          return Ok(Err(Error::DuplicateCpf(new.cpf.clone())));
        }

        let email_taken: bool = tx
          .query_row(
            "SELECT 1 FROM students WHERE email = ?1",
            rusqlite::params![new.email],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if email_taken {
          return Ok(Err(Error::DuplicateEmail(new.email.clone())));
        }

        let course_ids: BTreeSet<i64> = new.course_ids.iter().copied().collect();
        for &course_id in &course_ids {
          if !course_exists(&tx, course_id)? {
            return Ok(Err(Error::CourseNotFound(course_id)));
          }
        }

        tx.execute(
          "INSERT INTO students (name, cpf, birth_date, email, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![new.name, new.cpf, birth_str, new.email, now_str, now_str],
        )?;
        let id = tx.last_insert_rowid();

        // Initial course links are enrollment rows on the attach path: no
        // confirmation is dispatched for them.
        for &course_id in &course_ids {
          tx.execute(
            "INSERT INTO enrollments
               (student_id, course_id, status, enrolled_at, created_at, updated_at)
             VALUES (?1, ?2, 'active', ?3, ?3, ?3)",
            rusqlite::params![id, course_id, now_str],
          )?;
        }

        let student = tx.query_row(
          &format!("SELECT {STUDENT_COLS} FROM students WHERE student_id = ?1"),
          rusqlite::params![id],
          |row| RawStudent::from_row(row, 0),
        )?;
        let courses = courses_of_student(&tx, id)?;
        tx.commit()?;
        Ok(Ok((student, courses)))
      })
      .await
      .map_err(error::storage)?;

    let (student, courses) = result?;
    student_detail(student, courses)
  }

  async fn get_student(&self, id: i64) -> Result<Option<StudentDetail>> {
    let found = self
      .conn
      .call(move |conn| {
        let Some(student) = student_row(conn, id)? else {
          return Ok(None);
        };
        let courses = courses_of_student(conn, id)?;
        Ok(Some((student, courses)))
      })
      .await
      .map_err(error::storage)?;

    found.map(|(s, c)| student_detail(s, c)).transpose()
  }

  async fn find_student_by_cpf(&self, cpf: &str) -> Result<Option<StudentDetail>> {
    let cpf = cpf.to_owned();

    let found = self
      .conn
      .call(move |conn| {
        let student: Option<RawStudent> = conn
          .query_row(
            &format!("SELECT {STUDENT_COLS} FROM students WHERE cpf = ?1"),
            rusqlite::params![cpf],
            |row| RawStudent::from_row(row, 0),
          )
          .optional()?;
        let Some(student) = student else {
          return Ok(None);
        };
        let courses = courses_of_student(conn, student.student_id)?;
        Ok(Some((student, courses)))
      })
      .await
      .map_err(error::storage)?;

    found.map(|(s, c)| student_detail(s, c)).transpose()
  }

  async fn list_students(
    &self,
    course_id: Option<i64>,
  ) -> Result<Vec<StudentDetail>> {
    let found = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT s.student_id, s.name, s.cpf, s.birth_date, s.email,
                  s.created_at, s.updated_at
           FROM students s
           LEFT JOIN enrollments e ON e.student_id = s.student_id
           WHERE ?1 IS NULL OR e.course_id = ?1
           ORDER BY s.student_id",
        )?;
        let students = stmt
          .query_map(rusqlite::params![course_id], |row| {
            RawStudent::from_row(row, 0)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut out = Vec::with_capacity(students.len());
        for student in students {
          let courses = courses_of_student(conn, student.student_id)?;
          out.push((student, courses));
        }
        Ok(out)
      })
      .await
      .map_err(error::storage)?;

    found
      .into_iter()
      .map(|(s, c)| student_detail(s, c))
      .collect()
  }

  async fn update_student(
    &self,
    id: i64,
    patch: StudentUpdate,
  ) -> Result<StudentDetail> {
    let now_str = encode_dt(Utc::now());

    let result = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let Some(current) = student_row(&tx, id)? else {
          return Ok(Err(Error::StudentNotFound(id)));
        };

        // Uniqueness checks exclude the student being updated.
        if let Some(cpf) = &patch.cpf {
          let taken: bool = tx
            .query_row(
              "SELECT 1 FROM students WHERE cpf = ?1 AND student_id != ?2",
              rusqlite::params![cpf, id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
          if taken {
            return Ok(Err(Error::DuplicateCpf(cpf.clone())));
          }
        }
        if let Some(email) = &patch.email {
          let taken: bool = tx
            .query_row(
              "SELECT 1 FROM students WHERE email = ?1 AND student_id != ?2",
              rusqlite::params![email, id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
          if taken {
            return Ok(Err(Error::DuplicateEmail(email.clone())));
          }
        }

        let name = patch.name.unwrap_or(current.name);
        let cpf = patch.cpf.unwrap_or(current.cpf);
        let birth_date = patch
          .birth_date
          .map(encode_date)
          .unwrap_or(current.birth_date);
        let email = patch.email.unwrap_or(current.email);

        tx.execute(
          "UPDATE students SET name = ?1, cpf = ?2, birth_date = ?3, email = ?4, updated_at = ?5
           WHERE student_id = ?6",
          rusqlite::params![name, cpf, birth_date, email, now_str, id],
        )?;

        if let Some(course_ids) = patch.course_ids {
          let wanted: BTreeSet<i64> = course_ids.into_iter().collect();
          for &course_id in &wanted {
            if !course_exists(&tx, course_id)? {
              return Ok(Err(Error::CourseNotFound(course_id)));
            }
          }

          // Replace the links: drop enrollments outside the new set, add
          // enrollment rows for courses not yet linked.
          let existing: Vec<i64> = {
            let mut stmt = tx.prepare(
              "SELECT course_id FROM enrollments WHERE student_id = ?1",
            )?;
            stmt
              .query_map(rusqlite::params![id], |row| row.get(0))?
              .collect::<rusqlite::Result<Vec<_>>>()?
          };
          let existing: BTreeSet<i64> = existing.into_iter().collect();

          for &course_id in existing.difference(&wanted) {
            tx.execute(
              "DELETE FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
              rusqlite::params![id, course_id],
            )?;
          }
          for &course_id in wanted.difference(&existing) {
            tx.execute(
              "INSERT INTO enrollments
                 (student_id, course_id, status, enrolled_at, created_at, updated_at)
               VALUES (?1, ?2, 'active', ?3, ?3, ?3)",
              rusqlite::params![id, course_id, now_str],
            )?;
          }
        }

        let student = tx.query_row(
          &format!("SELECT {STUDENT_COLS} FROM students WHERE student_id = ?1"),
          rusqlite::params![id],
          |row| RawStudent::from_row(row, 0),
        )?;
        let courses = courses_of_student(&tx, id)?;
        tx.commit()?;
        Ok(Ok((student, courses)))
      })
      .await
      .map_err(error::storage)?;

    let (student, courses) = result?;
    student_detail(student, courses)
  }

  async fn delete_student(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM students WHERE student_id = ?1",
          rusqlite::params![id],
        )?;
        if n == 0 {
          return Ok(Err(Error::StudentNotFound(id)));
        }
        Ok(Ok(()))
      })
      .await
      .map_err(error::storage)?
  }

  async fn attach_student_to_course(
    &self,
    student_id: i64,
    course_id: i64,
  ) -> Result<StudentDetail> {
    let now_str = encode_dt(Utc::now());

    let result = self
      .conn
      .call(move |conn| {
        let Some(student) = student_row(conn, student_id)? else {
          return Ok(Err(Error::StudentNotFound(student_id)));
        };
        if !course_exists(conn, course_id)? {
          return Ok(Err(Error::CourseNotFound(course_id)));
        }
        let linked: bool = conn
          .query_row(
            "SELECT 1 FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
            rusqlite::params![student_id, course_id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if linked {
          return Ok(Err(Error::AlreadyEnrolled {
            student_id,
            course_id,
          }));
        }

        conn.execute(
          "INSERT INTO enrollments
             (student_id, course_id, status, enrolled_at, created_at, updated_at)
           VALUES (?1, ?2, 'active', ?3, ?3, ?3)",
          rusqlite::params![student_id, course_id, now_str],
        )?;

        let courses = courses_of_student(conn, student_id)?;
        Ok(Ok((student, courses)))
      })
      .await
      .map_err(error::storage)?;

    let (student, courses) = result?;
    student_detail(student, courses)
  }

  // ── Enrollments ───────────────────────────────────────────────────────────

  async fn create_enrollment(
    &self,
    student_id: i64,
    course_id: i64,
  ) -> Result<EnrollmentDetail> {
    let now_str = encode_dt(Utc::now());

    let result = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let Some(student) = student_row(&tx, student_id)? else {
          return Ok(Err(Error::StudentNotFound(student_id)));
        };
        let Some(course) = course_row(&tx, course_id)? else {
          return Ok(Err(Error::CourseNotFound(course_id)));
        };

        if let Err(e) = tx.execute(
          "INSERT INTO enrollments
             (student_id, course_id, status, enrolled_at, created_at, updated_at)
           VALUES (?1, ?2, 'active', ?3, ?3, ?3)",
          rusqlite::params![student_id, course_id, now_str],
        ) {
          // The unique index is the final arbiter; surface a race as a
          // conflict, not a storage fault.
          if error::is_unique_violation(&e, "enrollments.student_id") {
            return Ok(Err(Error::AlreadyEnrolled {
              student_id,
              course_id,
            }));
          }
          return Err(e.into());
        }
        let id = tx.last_insert_rowid();

        let enrollment = tx.query_row(
          &format!(
            "SELECT {ENROLLMENT_COLS} FROM enrollments WHERE enrollment_id = ?1"
          ),
          rusqlite::params![id],
          |row| RawEnrollment::from_row(row, 0),
        )?;
        tx.commit()?;
        Ok(Ok((enrollment, student, course)))
      })
      .await
      .map_err(error::storage)?;

    let (enrollment, student, course) = result?;
    Ok(EnrollmentDetail {
      enrollment: enrollment.into_enrollment()?,
      student:    student.into_student()?,
      course:     course.into_course()?,
    })
  }

  async fn enrollment_exists(
    &self,
    student_id: i64,
    course_id: i64,
  ) -> Result<bool> {
    self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
              rusqlite::params![student_id, course_id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await
      .map_err(error::storage)
  }

  async fn get_enrollment(&self, id: i64) -> Result<Option<Enrollment>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ENROLLMENT_COLS} FROM enrollments WHERE enrollment_id = ?1"
              ),
              rusqlite::params![id],
              |row| RawEnrollment::from_row(row, 0),
            )
            .optional()?,
        )
      })
      .await
      .map_err(error::storage)?;

    raw.map(RawEnrollment::into_enrollment).transpose()
  }

  async fn get_enrollment_detail(
    &self,
    id: i64,
  ) -> Result<Option<EnrollmentDetail>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ENROLLMENT_JOIN_COLS}
                 FROM enrollments e
                 JOIN students s ON s.student_id = e.student_id
                 JOIN courses c ON c.course_id = e.course_id
                 WHERE e.enrollment_id = ?1"
              ),
              rusqlite::params![id],
              |row| {
                Ok((
                  RawEnrollment::from_row(row, 0)?,
                  RawStudent::from_row(row, 8)?,
                  RawCourse::from_row(row, 15)?,
                ))
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(error::storage)?;

    raw.map(enrollment_detail).transpose()
  }

  async fn list_enrollments(
    &self,
    filter: EnrollmentFilter,
  ) -> Result<Vec<EnrollmentDetail>> {
    let status = filter.status.map(EnrollmentStatus::as_str);

    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ENROLLMENT_JOIN_COLS}
           FROM enrollments e
           JOIN students s ON s.student_id = e.student_id
           JOIN courses c ON c.course_id = e.course_id
           WHERE (?1 IS NULL OR e.student_id = ?1)
             AND (?2 IS NULL OR e.course_id = ?2)
             AND (?3 IS NULL OR e.status = ?3)
           ORDER BY e.enrollment_id"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![filter.student_id, filter.course_id, status],
            |row| {
              Ok((
                RawEnrollment::from_row(row, 0)?,
                RawStudent::from_row(row, 8)?,
                RawCourse::from_row(row, 15)?,
              ))
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(error::storage)?;

    raws.into_iter().map(enrollment_detail).collect()
  }

  async fn set_enrollment_status(
    &self,
    id: i64,
    status: EnrollmentStatus,
    suspended_at: Option<DateTime<Utc>>,
  ) -> Result<Enrollment> {
    let now_str = encode_dt(Utc::now());
    let suspended_str = suspended_at.map(encode_dt);

    let result = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE enrollments SET status = ?1, suspended_at = ?2, updated_at = ?3
           WHERE enrollment_id = ?4",
          rusqlite::params![status.as_str(), suspended_str, now_str, id],
        )?;
        if n == 0 {
          return Ok(Err(Error::EnrollmentNotFound(id)));
        }
        let raw = conn.query_row(
          &format!(
            "SELECT {ENROLLMENT_COLS} FROM enrollments WHERE enrollment_id = ?1"
          ),
          rusqlite::params![id],
          |row| RawEnrollment::from_row(row, 0),
        )?;
        Ok(Ok(raw))
      })
      .await
      .map_err(error::storage)?;

    result?.into_enrollment()
  }

  async fn update_enrollment(
    &self,
    id: i64,
    patch: EnrollmentUpdate,
  ) -> Result<Enrollment> {
    let now_str = encode_dt(Utc::now());

    let result = self
      .conn
      .call(move |conn| {
        if let Some(status) = patch.status {
          // Administrative path: status only; suspended_at is deliberately
          // left as-is.
          let n = conn.execute(
            "UPDATE enrollments SET status = ?1, updated_at = ?2
             WHERE enrollment_id = ?3",
            rusqlite::params![status.as_str(), now_str, id],
          )?;
          if n == 0 {
            return Ok(Err(Error::EnrollmentNotFound(id)));
          }
        }
        let raw: Option<RawEnrollment> = conn
          .query_row(
            &format!(
              "SELECT {ENROLLMENT_COLS} FROM enrollments WHERE enrollment_id = ?1"
            ),
            rusqlite::params![id],
            |row| RawEnrollment::from_row(row, 0),
          )
          .optional()?;
        match raw {
          Some(raw) => Ok(Ok(raw)),
          None => Ok(Err(Error::EnrollmentNotFound(id))),
        }
      })
      .await
      .map_err(error::storage)?;

    result?.into_enrollment()
  }

  async fn delete_enrollment(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM enrollments WHERE enrollment_id = ?1",
          rusqlite::params![id],
        )?;
        if n == 0 {
          return Ok(Err(Error::EnrollmentNotFound(id)));
        }
        Ok(Ok(()))
      })
      .await
      .map_err(error::storage)?
  }
}

// ─── Row helpers (run inside `call` closures) ────────────────────────────────

fn course_row(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawCourse>> {
  conn
    .query_row(
      &format!("SELECT {COURSE_COLS} FROM courses WHERE course_id = ?1"),
      rusqlite::params![id],
      |row| RawCourse::from_row(row, 0),
    )
    .optional()
}

fn subject_row(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawSubject>> {
  conn
    .query_row(
      &format!("SELECT {SUBJECT_COLS} FROM subjects WHERE subject_id = ?1"),
      rusqlite::params![id],
      |row| RawSubject::from_row(row, 0),
    )
    .optional()
}

fn student_row(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawStudent>> {
  conn
    .query_row(
      &format!("SELECT {STUDENT_COLS} FROM students WHERE student_id = ?1"),
      rusqlite::params![id],
      |row| RawStudent::from_row(row, 0),
    )
    .optional()
}

fn course_exists(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM courses WHERE course_id = ?1",
        rusqlite::params![id],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

fn courses_of_subject(
  conn: &rusqlite::Connection,
  subject_id: i64,
) -> rusqlite::Result<Vec<RawCourse>> {
  let mut stmt = conn.prepare(
    "SELECT c.course_id, c.name, c.description, c.workload, c.created_at,
            c.updated_at
     FROM courses c
     JOIN course_subject cs ON cs.course_id = c.course_id
     WHERE cs.subject_id = ?1
     ORDER BY c.course_id",
  )?;
  stmt
    .query_map(rusqlite::params![subject_id], |row| {
      RawCourse::from_row(row, 0)
    })?
    .collect()
}

fn courses_of_student(
  conn: &rusqlite::Connection,
  student_id: i64,
) -> rusqlite::Result<Vec<RawCourse>> {
  let mut stmt = conn.prepare(
    "SELECT c.course_id, c.name, c.description, c.workload, c.created_at,
            c.updated_at
     FROM courses c
     JOIN enrollments e ON e.course_id = c.course_id
     WHERE e.student_id = ?1
     ORDER BY c.course_id",
  )?;
  stmt
    .query_map(rusqlite::params![student_id], |row| {
      RawCourse::from_row(row, 0)
    })?
    .collect()
}

// ─── Detail assembly ─────────────────────────────────────────────────────────

fn subject_detail(
  subject: RawSubject,
  courses: Vec<RawCourse>,
) -> Result<SubjectDetail> {
  Ok(SubjectDetail {
    subject: subject.into_subject()?,
    courses: courses
      .into_iter()
      .map(RawCourse::into_course)
      .collect::<Result<_>>()?,
  })
}

fn student_detail(
  student: RawStudent,
  courses: Vec<RawCourse>,
) -> Result<StudentDetail> {
  Ok(StudentDetail {
    student: student.into_student()?,
    courses: courses
      .into_iter()
      .map(RawCourse::into_course)
      .collect::<Result<_>>()?,
  })
}

fn enrollment_detail(
  (enrollment, student, course): (RawEnrollment, RawStudent, RawCourse),
) -> Result<EnrollmentDetail> {
  Ok(EnrollmentDetail {
    enrollment: enrollment.into_enrollment()?,
    student:    student.into_student()?,
    course:     course.into_course()?,
  })
}
