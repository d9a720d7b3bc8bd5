//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, dates as `YYYY-MM-DD`, and
//! the enrollment status as its lowercase name.

use campus_core::{
  Result,
  course::Course,
  enrollment::{Enrollment, EnrollmentStatus},
  student::Student,
  subject::Subject,
};
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::decode;

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(column: &str, s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|_| decode(column, s))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(column: &str, s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| decode(column, s))
}

// ─── EnrollmentStatus ────────────────────────────────────────────────────────

pub fn decode_status(s: &str) -> Result<EnrollmentStatus> {
  EnrollmentStatus::parse(s).ok_or_else(|| decode("status", s))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `courses` row.
pub struct RawCourse {
  pub course_id:   i64,
  pub name:        String,
  pub description: String,
  pub workload:    i64,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawCourse {
  /// Read the six course columns starting at index `at`.
  pub fn from_row(row: &rusqlite::Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      course_id:   row.get(at)?,
      name:        row.get(at + 1)?,
      description: row.get(at + 2)?,
      workload:    row.get(at + 3)?,
      created_at:  row.get(at + 4)?,
      updated_at:  row.get(at + 5)?,
    })
  }

  pub fn into_course(self) -> Result<Course> {
    Ok(Course {
      course_id:   self.course_id,
      name:        self.name,
      description: self.description,
      workload:    u32::try_from(self.workload)
        .map_err(|_| decode("workload", &self.workload.to_string()))?,
      created_at:  decode_dt("created_at", &self.created_at)?,
      updated_at:  decode_dt("updated_at", &self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `subjects` row.
pub struct RawSubject {
  pub subject_id:  i64,
  pub name:        String,
  pub description: String,
  pub workload:    i64,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawSubject {
  pub fn from_row(row: &rusqlite::Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      subject_id:  row.get(at)?,
      name:        row.get(at + 1)?,
      description: row.get(at + 2)?,
      workload:    row.get(at + 3)?,
      created_at:  row.get(at + 4)?,
      updated_at:  row.get(at + 5)?,
    })
  }

  pub fn into_subject(self) -> Result<Subject> {
    Ok(Subject {
      subject_id:  self.subject_id,
      name:        self.name,
      description: self.description,
      workload:    u32::try_from(self.workload)
        .map_err(|_| decode("workload", &self.workload.to_string()))?,
      created_at:  decode_dt("created_at", &self.created_at)?,
      updated_at:  decode_dt("updated_at", &self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `students` row.
pub struct RawStudent {
  pub student_id: i64,
  pub name:       String,
  pub cpf:        String,
  pub birth_date: String,
  pub email:      String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawStudent {
  /// Read the seven student columns starting at index `at`.
  pub fn from_row(row: &rusqlite::Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      student_id: row.get(at)?,
      name:       row.get(at + 1)?,
      cpf:        row.get(at + 2)?,
      birth_date: row.get(at + 3)?,
      email:      row.get(at + 4)?,
      created_at: row.get(at + 5)?,
      updated_at: row.get(at + 6)?,
    })
  }

  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      student_id: self.student_id,
      name:       self.name,
      cpf:        self.cpf,
      birth_date: decode_date("birth_date", &self.birth_date)?,
      email:      self.email,
      created_at: decode_dt("created_at", &self.created_at)?,
      updated_at: decode_dt("updated_at", &self.updated_at)?,
    })
  }
}

/// Raw strings read directly from an `enrollments` row.
pub struct RawEnrollment {
  pub enrollment_id: i64,
  pub student_id:    i64,
  pub course_id:     i64,
  pub status:        String,
  pub enrolled_at:   String,
  pub suspended_at:  Option<String>,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawEnrollment {
  /// Read the eight enrollment columns starting at index `at`.
  pub fn from_row(row: &rusqlite::Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      enrollment_id: row.get(at)?,
      student_id:    row.get(at + 1)?,
      course_id:     row.get(at + 2)?,
      status:        row.get(at + 3)?,
      enrolled_at:   row.get(at + 4)?,
      suspended_at:  row.get(at + 5)?,
      created_at:    row.get(at + 6)?,
      updated_at:    row.get(at + 7)?,
    })
  }

  pub fn into_enrollment(self) -> Result<Enrollment> {
    Ok(Enrollment {
      enrollment_id: self.enrollment_id,
      student_id:    self.student_id,
      course_id:     self.course_id,
      status:        decode_status(&self.status)?,
      enrolled_at:   decode_dt("enrolled_at", &self.enrolled_at)?,
      suspended_at:  self
        .suspended_at
        .as_deref()
        .map(|s| decode_dt("suspended_at", s))
        .transpose()?,
      created_at:    decode_dt("created_at", &self.created_at)?,
      updated_at:    decode_dt("updated_at", &self.updated_at)?,
    })
  }
}
