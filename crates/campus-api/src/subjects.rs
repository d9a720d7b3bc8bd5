//! Handlers for `/subjects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/subjects` | Optional `?course_id=` filter |
//! | `POST`   | `/subjects` | Body: [`SubjectDraft`]; optional `course_ids` attach |
//! | `GET`    | `/subjects/:id` | 404 if not found |
//! | `PATCH`  | `/subjects/:id` | `course_ids` present replaces the links |
//! | `DELETE` | `/subjects/:id` | |
//! | `POST`   | `/subjects/:id/attach-course` | Body: `{"course_id": 1}`; 422 on duplicate link |

use axum::{
  Json,
  extract::{Path, Query, State},
  response::Response,
};
use campus_core::{
  course::AttachCourseDraft, notify::EnrollmentNotifier, store::SchoolStore,
  subject::SubjectDraft,
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

/// `GET /subjects[?course_id=<id>]`
pub async fn list<S, N>(
  State(state): State<AppState<S, N>>,
  Query(params): Query<ListParams>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let subjects = state
    .store
    .list_subjects(params.course_id)
    .await
    .map_err(ApiError::on_find)?;
  Ok(response::ok(response::FIND_SUCCESS, subjects))
}

/// `POST /subjects`
pub async fn create<S, N>(
  State(state): State<AppState<S, N>>,
  Json(draft): Json<SubjectDraft>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let new = draft
    .into_new()
    .map_err(|e| ApiError::validation(CREATE_FAILED, e))?;
  let subject = state
    .store
    .add_subject(new)
    .await
    .map_err(ApiError::on_create)?;
  Ok(response::created(subject))
}

/// `GET /subjects/:id`
pub async fn get_one<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let subject = state
    .store
    .get_subject(id)
    .await
    .map_err(ApiError::on_find)?
    .ok_or_else(ApiError::not_found)?;
  Ok(response::ok(response::FIND_SUCCESS, subject))
}

/// `PATCH /subjects/:id`
pub async fn update<S, N>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<i64>,
  Json(draft): Json<SubjectDraft>,
) -> Result<Response, ApiError>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  let patch = draft
    .into_update()
    .map_err(|e| ApiError::validation(UPDATE_FAILED, e))?;
  let subject = state
    .store
    .update_subject(id, patch)
    .await
    .map_err(ApiError::on_update)?;
  Ok(response::ok(response::UPDATE_SUCCESS, subject))
}

/// `DELETE /subjects/:id`
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
    .delete_subject(id)
    .await
    .map_err(ApiError::on_delete)?;
  Ok(response::deleted())
}

/// `POST /subjects/:id/attach-course`
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
  let subject = state
    .store
    .attach_subject_to_course(id, course_id)
    .await
    .map_err(ApiError::on_update)?;
  Ok(response::ok(response::UPDATE_SUCCESS, subject))
}
