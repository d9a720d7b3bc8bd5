//! JSON REST API for the campus service.
//!
//! Exposes an axum [`Router`] backed by any [`SchoolStore`] plus an
//! [`EnrollmentNotifier`]. Transport concerns (TLS, listeners) are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", campus_api::api_router(state))
//! ```

pub mod courses;
pub mod enrollments;
pub mod error;
pub mod response;
pub mod students;
pub mod subjects;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use campus_core::{
  enroll::EnrollmentWorkflow, notify::EnrollmentNotifier, store::SchoolStore,
};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, N> {
  pub store:    Arc<S>,
  pub notifier: Arc<N>,
}

// Manual impl so `S`/`N` need not be `Clone` themselves.
impl<S, N> Clone for AppState<S, N> {
  fn clone(&self) -> Self {
    Self {
      store:    self.store.clone(),
      notifier: self.notifier.clone(),
    }
  }
}

impl<S, N> AppState<S, N>
where
  S: SchoolStore,
  N: EnrollmentNotifier,
{
  pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
    Self { store, notifier }
  }

  /// Build the enrollment workflow over this state's collaborators.
  pub fn workflow(&self) -> EnrollmentWorkflow<S, N> {
    EnrollmentWorkflow::new(self.store.clone(), self.notifier.clone())
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, N>(state: AppState<S, N>) -> Router<()>
where
  S: SchoolStore + 'static,
  N: EnrollmentNotifier + 'static,
{
  Router::new()
    // Courses
    .route(
      "/courses",
      get(courses::list::<S, N>).post(courses::create::<S, N>),
    )
    .route(
      "/courses/{id}",
      get(courses::get_one::<S, N>)
        .patch(courses::update::<S, N>)
        .delete(courses::delete_one::<S, N>),
    )
    // Subjects
    .route(
      "/subjects",
      get(subjects::list::<S, N>).post(subjects::create::<S, N>),
    )
    .route(
      "/subjects/{id}",
      get(subjects::get_one::<S, N>)
        .patch(subjects::update::<S, N>)
        .delete(subjects::delete_one::<S, N>),
    )
    .route(
      "/subjects/{id}/attach-course",
      post(subjects::attach_course::<S, N>),
    )
    // Students
    .route(
      "/students",
      get(students::list::<S, N>).post(students::create::<S, N>),
    )
    .route(
      "/students/{id}",
      get(students::get_one::<S, N>)
        .patch(students::update::<S, N>)
        .delete(students::delete_one::<S, N>),
    )
    .route("/students/cpf/{cpf}", get(students::get_by_cpf::<S, N>))
    .route(
      "/students/{id}/attach-course",
      post(students::attach_course::<S, N>),
    )
    // Enrollments
    .route(
      "/enrollments",
      get(enrollments::list::<S, N>).post(enrollments::create::<S, N>),
    )
    .route(
      "/enrollments/{id}",
      get(enrollments::get_one::<S, N>)
        .patch(enrollments::update::<S, N>)
        .delete(enrollments::delete_one::<S, N>),
    )
    .route(
      "/enrollments/{id}/suspend",
      post(enrollments::suspend::<S, N>),
    )
    .route(
      "/enrollments/{id}/reactivate",
      post(enrollments::reactivate::<S, N>),
    )
    .with_state(state)
}
