//! Success-side JSON envelope shared by every handler.
//!
//! Every response has the shape `{success, message, data?, errors?}`; the
//! failure side lives in [`crate::error`].

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

pub const FIND_SUCCESS: &str = "FIND_SUCCESS";
pub const CREATE_SUCCESS: &str = "CREATE_SUCCESS";
pub const UPDATE_SUCCESS: &str = "UPDATE_SUCCESS";
pub const DELETE_SUCCESS: &str = "DELETE_SUCCESS";

/// `200 OK` envelope carrying `data`.
pub fn ok<T: Serialize>(message: &'static str, data: T) -> Response {
  (
    StatusCode::OK,
    Json(json!({ "success": true, "message": message, "data": data })),
  )
    .into_response()
}

/// `201 Created` envelope carrying `data`.
pub fn created<T: Serialize>(data: T) -> Response {
  (
    StatusCode::CREATED,
    Json(json!({ "success": true, "message": CREATE_SUCCESS, "data": data })),
  )
    .into_response()
}

/// Success envelope with no payload (deletes).
pub fn deleted() -> Response {
  (
    StatusCode::OK,
    Json(json!({ "success": true, "message": DELETE_SUCCESS })),
  )
    .into_response()
}
