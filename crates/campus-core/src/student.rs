//! Student — the person enrolling in courses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  course::Course,
  validate::{ValidationErrors, checked_name, is_valid_email, required_name},
};

/// A student as persisted. Related to courses through enrollments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
  pub student_id: i64,
  pub name:       String,
  /// National register number; exactly 11 characters, unique.
  pub cpf:        String,
  pub birth_date: NaiveDate,
  pub email:      String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// A student with the courses they are enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDetail {
  #[serde(flatten)]
  pub student: Student,
  pub courses: Vec<Course>,
}

/// Validated input for creating a student. `course_ids` carries at least one
/// id; each must reference an existing course.
#[derive(Debug, Clone)]
pub struct NewStudent {
  pub name:       String,
  pub cpf:        String,
  pub birth_date: NaiveDate,
  pub email:      String,
  pub course_ids: Vec<i64>,
}

/// Validated partial update; `course_ids = Some` replaces the enrollment
/// links.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
  pub name:       Option<String>,
  pub cpf:        Option<String>,
  pub birth_date: Option<NaiveDate>,
  pub email:      Option<String>,
  pub course_ids: Option<Vec<i64>>,
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Unvalidated request payload for student create and update.
///
/// `birth_date` is accepted as a string so a malformed date lands in the
/// validation error map instead of failing JSON deserialisation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentDraft {
  pub name:       Option<String>,
  pub cpf:        Option<String>,
  pub birth_date: Option<String>,
  pub email:      Option<String>,
  pub course_ids: Option<Vec<i64>>,
}

impl StudentDraft {
  pub fn into_new(self) -> Result<NewStudent, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = required_name(&mut errors, self.name);

    let cpf = match self.cpf {
      None => {
        errors.add("cpf", "cpf is required");
        None
      }
      Some(v) => checked_cpf(&mut errors, v),
    };

    let birth_date = match self.birth_date.as_deref() {
      None => {
        errors.add("birth_date", "birth_date is required");
        None
      }
      Some(v) => checked_birth_date(&mut errors, v),
    };

    let email = match self.email {
      None => {
        errors.add("email", "email is required");
        None
      }
      Some(v) => checked_email(&mut errors, v),
    };

    let course_ids = match self.course_ids {
      Some(ids) if !ids.is_empty() => Some(ids),
      _ => {
        errors.add("course_ids", "course_ids must contain at least one course");
        None
      }
    };

    match (name, cpf, birth_date, email, course_ids) {
      (Some(name), Some(cpf), Some(birth_date), Some(email), Some(course_ids)) => {
        Ok(NewStudent {
          name,
          cpf,
          birth_date,
          email,
          course_ids,
        })
      }
      _ => Err(errors),
    }
  }

  pub fn into_update(self) -> Result<StudentUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = self.name.and_then(|v| checked_name(&mut errors, v));
    let cpf = self.cpf.and_then(|v| checked_cpf(&mut errors, v));
    let birth_date = self
      .birth_date
      .and_then(|v| checked_birth_date(&mut errors, &v));
    let email = self.email.and_then(|v| checked_email(&mut errors, v));

    errors.into_result()?;
    Ok(StudentUpdate {
      name,
      cpf,
      birth_date,
      email,
      course_ids: self.course_ids,
    })
  }
}

fn checked_cpf(errors: &mut ValidationErrors, value: String) -> Option<String> {
  if value.chars().count() == 11 {
    Some(value)
  } else {
    errors.add("cpf", "cpf must be exactly 11 characters");
    None
  }
}

fn checked_birth_date(
  errors: &mut ValidationErrors,
  value: &str,
) -> Option<NaiveDate> {
  match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
    Ok(date) if date < Utc::now().date_naive() => Some(date),
    Ok(_) => {
      errors.add("birth_date", "birth_date must be before today");
      None
    }
    Err(_) => {
      errors.add("birth_date", "birth_date must be a date in YYYY-MM-DD format");
      None
    }
  }
}

fn checked_email(errors: &mut ValidationErrors, value: String) -> Option<String> {
  if is_valid_email(&value) {
    Some(value)
  } else {
    errors.add("email", "email must be a valid email address");
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn full_draft() -> StudentDraft {
    StudentDraft {
      name:       Some("Ana Souza".into()),
      cpf:        Some("12345678901".into()),
      birth_date: Some("1998-03-20".into()),
      email:      Some("ana.souza@example.com".into()),
      course_ids: Some(vec![1]),
    }
  }

  #[test]
  fn create_accepts_valid_payload() {
    let new = full_draft().into_new().unwrap();
    assert_eq!(new.cpf, "12345678901");
    assert_eq!(new.course_ids, vec![1]);
  }

  #[test]
  fn create_requires_at_least_one_course() {
    let mut draft = full_draft();
    draft.course_ids = Some(vec![]);
    let errors = draft.into_new().unwrap_err();
    assert!(errors.contains("course_ids"));
  }

  #[test]
  fn cpf_must_be_eleven_chars() {
    let mut draft = full_draft();
    draft.cpf = Some("123".into());
    assert!(draft.into_new().unwrap_err().contains("cpf"));
  }

  #[test]
  fn birth_date_must_be_in_the_past() {
    let mut draft = full_draft();
    draft.birth_date = Some("2999-01-01".into());
    assert!(draft.into_new().unwrap_err().contains("birth_date"));
  }

  #[test]
  fn birth_date_must_parse() {
    let mut draft = full_draft();
    draft.birth_date = Some("20/03/1998".into());
    assert!(draft.into_new().unwrap_err().contains("birth_date"));
  }

  #[test]
  fn update_is_fully_optional() {
    let update = StudentDraft::default().into_update().unwrap();
    assert!(update.name.is_none());
    assert!(update.course_ids.is_none());
  }

  #[test]
  fn update_still_checks_present_fields() {
    let errors = StudentDraft {
      email: Some("not-an-email".into()),
      ..Default::default()
    }
    .into_update()
    .unwrap_err();
    assert!(errors.contains("email"));
  }
}
