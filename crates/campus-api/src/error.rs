//! API error type mapping the domain taxonomy onto HTTP statuses and the
//! failure side of the response envelope.
//!
//! Statuses: 404 for missing entities, 422 for validation failures,
//! conflicts and invalid transitions, 500 for storage faults.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use campus_core::{Error, validate::ValidationErrors};
use serde_json::json;
use thiserror::Error as ThisError;

pub const FIND_NOTFOUND: &str = "FIND_NOTFOUND";
pub const CREATE_FAILED: &str = "CREATE_FAILED";
pub const UPDATE_FAILED: &str = "UPDATE_FAILED";
pub const DELETE_FAILED: &str = "DELETE_FAILED";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// An error ready to be rendered as an envelope response.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct ApiError {
  status:  StatusCode,
  message: &'static str,
  errors:  Option<ValidationErrors>,
}

impl ApiError {
  /// Payload validation failed before any domain call was made.
  pub fn validation(message: &'static str, errors: ValidationErrors) -> Self {
    Self {
      status: StatusCode::UNPROCESSABLE_ENTITY,
      message,
      errors: Some(errors),
    }
  }

  pub fn not_found() -> Self {
    Self {
      status:  StatusCode::NOT_FOUND,
      message: FIND_NOTFOUND,
      errors:  None,
    }
  }

  /// Domain failure during a create; conflicts report `CREATE_FAILED`.
  pub fn on_create(e: Error) -> Self { Self::from_domain(e, CREATE_FAILED) }

  /// Domain failure during an update, transition or attach.
  pub fn on_update(e: Error) -> Self { Self::from_domain(e, UPDATE_FAILED) }

  /// Domain failure during a delete.
  pub fn on_delete(e: Error) -> Self { Self::from_domain(e, DELETE_FAILED) }

  /// Domain failure on a read path (storage faults are the only 5xx here).
  pub fn on_find(e: Error) -> Self { Self::from_domain(e, FIND_NOTFOUND) }

  fn from_domain(e: Error, failed: &'static str) -> Self {
    let conflict = |errors| Self {
      status: StatusCode::UNPROCESSABLE_ENTITY,
      message: failed,
      errors,
    };

    match e {
      Error::CourseNotFound(_)
      | Error::SubjectNotFound(_)
      | Error::StudentNotFound(_)
      | Error::EnrollmentNotFound(_) => Self::not_found(),

      Error::AlreadyEnrolled { .. }
      | Error::SubjectAlreadyAttached { .. }
      | Error::CourseHasEnrollments(_)
      | Error::InvalidTransition { .. } => conflict(None),

      Error::DuplicateCpf(_) => {
        let mut errors = ValidationErrors::new();
        errors.add("cpf", "cpf has already been taken");
        conflict(Some(errors))
      }
      Error::DuplicateEmail(_) => {
        let mut errors = ValidationErrors::new();
        errors.add("email", "email has already been taken");
        conflict(Some(errors))
      }
      Error::Validation(errors) => conflict(Some(errors)),

      Error::Storage(detail) => {
        tracing::error!(%detail, "storage failure");
        Self {
          status:  StatusCode::INTERNAL_SERVER_ERROR,
          message: INTERNAL_ERROR,
          errors:  None,
        }
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let mut body = json!({ "success": false, "message": self.message });
    if let Some(errors) = &self.errors {
      body["errors"] = json!(errors);
    }
    (self.status, Json(body)).into_response()
  }
}
