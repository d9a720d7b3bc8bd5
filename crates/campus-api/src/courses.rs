//! Handlers for `/courses` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/courses` | All courses |
//! | `POST`   | `/courses` | Body: [`CourseDraft`]; 201 on success |
//! | `GET`    | `/courses/:id` | 404 if not found |
//! | `PATCH`  | `/courses/:id` | Partial update |
//! | `DELETE` | `/courses/:id` | 422 while enrollments reference the course |

use axum::{
  Json,
  extract::{Path, State},
  response::Response,
};
use campus_core::{
  course::CourseDraft, notify::EnrollmentNotifier, store::SchoolStore,
};

use crate::{
  AppState,
  error::{ApiError, CREATE_FAILED, UPDATE_FAILED},
  response,
};

/// `GET /courses`
pub async fn list<S, N>(
  State(state): State<AppState<S, N>>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let courses = state.store.list_courses().await.map_err(ApiError::on_find)?;
  Ok(response::ok(response::FIND_SUCCESS, courses))
}

/// `POST /courses`
pub async fn create<S, N>(
  State(state): State<AppState<S, N>>,
  Json(draft): Json<CourseDraft>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let new = draft
    .into_new()
    .map_err(|e| ApiError::validation(CREATE_FAILED, e))?;
  let course = state
    .store
    .add_course(new)
    .await
    .map_err(ApiError::on_create)?;
  Ok(response::created(course))
}

/// `GET /courses/:id`
pub async fn get_one<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let course = state
    .store
    .get_course(id)
    .await
    .map_err(ApiError::on_find)?
    .ok_or_else(ApiError::not_found)?;
  Ok(response::ok(response::FIND_SUCCESS, course))
}

/// `PATCH /courses/:id`
pub async fn update<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
  Json(draft): Json<CourseDraft>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let patch = draft
    .into_update()
    .map_err(|e| ApiError::validation(UPDATE_FAILED, e))?;
  let course = state
    .store
    .update_course(id, patch)
    .await
    .map_err(ApiError::on_update)?;
  Ok(response::ok(response::UPDATE_SUCCESS, course))
}

/// `DELETE /courses/:id`
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
    .delete_course(id)
    .await
    .map_err(ApiError::on_delete)?;
  Ok(response::deleted())
}
