// src/types/response.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::types::models::{
    Application, ApplicationStatus, Interview, Job, JobApplication, User,
};

const OK_MARKER: &str = "ok";
const FETCHED_MARKER: &str = "fetched all Data";

// ===== Envelope =====

/// Every backend payload is wrapped as `{ success?, message?, response? }`.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub response: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_ok(&self) -> bool {
        self.success.as_deref() == Some(OK_MARKER)
            || self.message.as_deref() == Some(FETCHED_MARKER)
    }

    /// Unwrap the payload, rejecting anything that is not a confirmed success
    pub fn into_response(self) -> ClientResult<T> {
        if !self.is_ok() {
            return Err(ClientError::UnexpectedResponse);
        }
        self.response.ok_or(ClientError::UnexpectedResponse)
    }
}

/// Error body shape, only `message` is ever read
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ===== Account =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct UserProfileResponse {
    #[serde(default)]
    pub applications: Vec<Application>,
}

// ===== Applications =====

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub resume_url: String,
}

/// Application detail as served by `/application/apd/{id}` and the admin list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetailResponse {
    pub id: i64,
    pub job_id: i64,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: ApplicantSummary,
    pub job: Job,
}

impl ApplicationDetailResponse {
    pub fn into_parts(self) -> (JobApplication, Job) {
        let application = JobApplication {
            id: self.id,
            job_id: self.job_id,
            user_id: self.user.id,
            applicant_name: self.user.name,
            applicant_email: self.user.email,
            applicant_phone: self.user.phone_number,
            resume_url: self.user.resume_url,
            status: self.status,
            submitted_at: self.applied_at,
            updated_at: self.updated_at,
        };
        (application, self.job)
    }
}

/// One entry of `/application/interview/user/{userId}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicantInterviews {
    pub id: i64,
    #[serde(rename = "Interview", default)]
    pub interviews: Vec<Interview>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusRef {
    pub id: i64,
    pub status: ApplicationStatus,
}

/// Schedule and reschedule both answer with the interview, sometimes with
/// the owning application attached.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResponse {
    #[serde(flatten)]
    pub interview: Interview,
    #[serde(default)]
    pub job_application: Option<ApplicationStatusRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResultResponse {
    pub updated_interview_data: Interview,
    pub job_application: ApplicationStatusRef,
}
