//! Handlers for `/students` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/students` | Optional `?course_id=` filter |
//! | `POST`   | `/students` | Body: [`StudentDraft`]; requires ≥1 course id |
//! | `GET`    | `/students/:id` | 404 if not found |
//! | `GET`    | `/students/cpf/:cpf` | Lookup by national register number |
//! | `PATCH`  | `/students/:id` | `course_ids` present replaces the links |
//! | `DELETE` | `/students/:id` | Enrollments cascade away |
//! | `POST`   | `/students/:id/attach-course` | 422 when already enrolled |

use axum::{
  Json,
  extract::{Path, Query, State},
  response::Response,
};
use campus_core::{
  course::AttachCourseDraft, notify::EnrollmentNotifier, store::SchoolStore,
  student::StudentDraft,
};
use serde::Deserialize;

use crate::{
  AppState,
  error::{ApiError, CREATE_FAILED, UPDATE_FAILED},
  response,
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub course_id: Option<i64>,
}

/// `GET /students[?course_id=<id>]`
pub async fn list<S, N>(
  State(state): State<AppState<S, N>>,
  Query(params): Query<ListParams>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let students = state
    .store
    .list_students(params.course_id)
    .await
    .map_err(ApiError::on_find)?;
  Ok(response::ok(response::FIND_SUCCESS, students))
}

/// `POST /students`
pub async fn create<S, N>(
  State(state): State<AppState<S, N>>,
  Json(draft): Json<StudentDraft>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let new = draft
    .into_new()
    .map_err(|e| ApiError::validation(CREATE_FAILED, e))?;
  let student = state
    .store
    .add_student(new)
    .await
    .map_err(ApiError::on_create)?;
  Ok(response::created(student))
}

/// `GET /students/:id`
pub async fn get_one<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let student = state
    .store
    .get_student(id)
    .await
    .map_err(ApiError::on_find)?
    .ok_or_else(ApiError::not_found)?;
  Ok(response::ok(response::FIND_SUCCESS, student))
}

/// `GET /students/cpf/:cpf`
pub async fn get_by_cpf<S, N>(
  State(state): State<AppState<S, N>>,
  Path(cpf): Path<String>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let student = state
    .store
    .find_student_by_cpf(&cpf)
    .await
    .map_err(ApiError::on_find)?
    .ok_or_else(ApiError::not_found)?;
  Ok(response::ok(response::FIND_SUCCESS, student))
}

/// `PATCH /students/:id`
pub async fn update<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
  Json(draft): Json<StudentDraft>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let patch = draft
    .into_update()
    .map_err(|e| ApiError::validation(UPDATE_FAILED, e))?;
  let student = state
    .store
    .update_student(id, patch)
    .await
    .map_err(ApiError::on_update)?;
  Ok(response::ok(response::UPDATE_SUCCESS, student))
}

/// `DELETE /students/:id`
pub async fn delete_one<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  state
    .store
    .delete_student(id)
    .await
    .map_err(ApiError::on_delete)?;
  Ok(response::deleted())
}

/// `POST /students/:id/attach-course`
///
/// Inserts the enrollment link directly; no confirmation is dispatched for
/// this path.
pub async fn attach_course<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
  Json(draft): Json<AttachCourseDraft>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let course_id = draft
    .into_course_id()
    .map_err(|e| ApiError::validation(UPDATE_FAILED, e))?;
  let student = state
    .store
    .attach_student_to_course(id, course_id)
    .await
    .map_err(ApiError::on_update)?;
  Ok(response::ok(response::UPDATE_SUCCESS, student))
}
