//! Webhook-backed implementation of [`EnrollmentNotifier`].
//!
//! Posts a JSON confirmation payload to a configured HTTP endpoint (a mail
//! relay, typically). With no URL configured every send is a no-op, which
//! keeps local development quiet.

use std::time::Duration;

use anyhow::Context as _;
use campus_core::{
  course::Course, enrollment::Enrollment, notify::EnrollmentNotifier,
  student::Student,
};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
  #[error("POST {url} failed: {source}")]
  Request {
    url:    String,
    #[source]
    source: reqwest::Error,
  },

  #[error("POST {url} → {status}")]
  Status {
    url:    String,
    status: reqwest::StatusCode,
  },
}

/// Confirmation payload; carries the fields a mail template needs.
#[derive(Debug, Serialize)]
struct ConfirmationPayload<'a> {
  to:              &'a str,
  subject:         String,
  student_name:    &'a str,
  course_name:     &'a str,
  course_workload: u32,
  enrollment_id:   i64,
  status:          &'static str,
  enrolled_at:     DateTime<Utc>,
}

/// Sends enrollment confirmations as JSON webhooks.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct WebhookNotifier {
  client: Client,
  url:    Option<String>,
}

impl WebhookNotifier {
  /// `url = None` disables delivery; sends become no-ops.
  pub fn new(url: Option<String>) -> anyhow::Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, url })
  }
}

impl EnrollmentNotifier for WebhookNotifier {
  type Error = NotifyError;

  async fn send_confirmation(
    &self,
    enrollment: &Enrollment,
    student: &Student,
    course: &Course,
  ) -> Result<(), Self::Error> {
    let Some(url) = &self.url else {
      tracing::debug!(
        enrollment_id = enrollment.enrollment_id,
        "no notification endpoint configured, skipping confirmation"
      );
      return Ok(());
    };

    let payload = ConfirmationPayload {
      to:              &student.email,
      subject:         format!("Enrollment confirmation - {}", course.name),
      student_name:    &student.name,
      course_name:     &course.name,
      course_workload: course.workload,
      enrollment_id:   enrollment.enrollment_id,
      status:          enrollment.status.as_str(),
      enrolled_at:     enrollment.enrolled_at,
    };

    let resp = self
      .client
      .post(url)
      .json(&payload)
      .send()
      .await
      .map_err(|source| NotifyError::Request {
        url: url.clone(),
        source,
      })?;

    if !resp.status().is_success() {
      return Err(NotifyError::Status {
        url:    url.clone(),
        status: resp.status(),
      });
    }

    tracing::info!(
      enrollment_id = enrollment.enrollment_id,
      student_email = %student.email,
      "enrollment confirmation dispatched"
    );
    Ok(())
  }
}
