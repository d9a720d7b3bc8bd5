//! Handlers for `/enrollments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/enrollments` | Optional `student_id`, `course_id`, `status` filters |
//! | `POST`   | `/enrollments` | The enrollment workflow; 201 + detail on success |
//! | `GET`    | `/enrollments/:id` | Detail with student and course attached |
//! | `PATCH`  | `/enrollments/:id` | Administrative status update, no guards |
//! | `DELETE` | `/enrollments/:id` | Unconditional |
//! | `POST`   | `/enrollments/:id/suspend` | 422 unless currently active |
//! | `POST`   | `/enrollments/:id/reactivate` | 422 unless currently suspended |

use axum::{
  Json,
  extract::{Path, Query, State},
  response::Response,
};
use campus_core::{
  enrollment::{EnrollDraft, EnrollmentDraft, EnrollmentStatus},
  notify::EnrollmentNotifier,
  store::{EnrollmentFilter, SchoolStore},
};
use serde::Deserialize;

use crate::{
  AppState,
  error::{ApiError, CREATE_FAILED, UPDATE_FAILED},
  response,
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub student_id: Option<i64>,
  pub course_id:  Option<i64>,
  pub status:     Option<EnrollmentStatus>,
}

/// `GET /enrollments[?student_id=...][&course_id=...][&status=...]`
pub async fn list<S, N>(
  State(state): State<AppState<S, N>>,
  Query(params): Query<ListParams>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let enrollments = state
    .store
    .list_enrollments(EnrollmentFilter {
      student_id: params.student_id,
      course_id:  params.course_id,
      status:     params.status,
    })
    .await
    .map_err(ApiError::on_find)?;
  Ok(response::ok(response::FIND_SUCCESS, enrollments))
}

/// `POST /enrollments` — runs the enrollment workflow.
pub async fn create<S, N>(
  State(state): State<AppState<S, N>>,
  Json(draft): Json<EnrollDraft>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let (student_id, course_id) = draft
    .into_ids()
    .map_err(|e| ApiError::validation(CREATE_FAILED, e))?;
  let detail = state
    .workflow()
    .enroll(student_id, course_id)
    .await
    .map_err(ApiError::on_create)?;
  Ok(response::created(detail))
}

/// `GET /enrollments/:id`
pub async fn get_one<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let detail = state
    .store
    .get_enrollment_detail(id)
    .await
    .map_err(ApiError::on_find)?
    .ok_or_else(ApiError::not_found)?;
  Ok(response::ok(response::FIND_SUCCESS, detail))
}

/// `PATCH /enrollments/:id` — administrative status correction; bypasses the
/// transition guards and leaves `suspended_at` untouched.
pub async fn update<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
  Json(draft): Json<EnrollmentDraft>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let patch = draft
    .into_update()
    .map_err(|e| ApiError::validation(UPDATE_FAILED, e))?;
  let enrollment = state
    .store
    .update_enrollment(id, patch)
    .await
    .map_err(ApiError::on_update)?;
  Ok(response::ok(response::UPDATE_SUCCESS, enrollment))
}

/// `DELETE /enrollments/:id`
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
    .delete_enrollment(id)
    .await
    .map_err(ApiError::on_delete)?;
  Ok(response::deleted())
}

/// `POST /enrollments/:id/suspend`
pub async fn suspend<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let enrollment = state
    .workflow()
    .suspend(id)
    .await
    .map_err(ApiError::on_update)?;
  Ok(response::ok(response::UPDATE_SUCCESS, enrollment))
}

/// `POST /enrollments/:id/reactivate`
pub async fn reactivate<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let enrollment = state
    .workflow()
    .reactivate(id)
    .await
    .map_err(ApiError::on_update)?;
  Ok(response::ok(response::UPDATE_SUCCESS, enrollment))
}
