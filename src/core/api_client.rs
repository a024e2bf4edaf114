// src/core/api_client.rs
//! HTTP client for the job board backend

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::forms::JobPayload;
use crate::signup::SignupForm;
use crate::types::models::{
    Application, ApplicationStatus, ApplicationWithJob, Interview, InterviewResult,
    InterviewStatus, Job, JobApplication,
};
use crate::types::response::{
    ApiEnvelope, ApplicantInterviews, ApplicationDetailResponse, AuthPayload, ErrorBody,
    InterviewResponse, InterviewResultResponse, UserProfileResponse,
};
use crate::workflow::InterviewPlan;

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

const JOBS_ENDPOINT: &str = "/job";
const USERS_ENDPOINT: &str = "/user";
const LOGIN_ENDPOINT: &str = "/user/login";
const ADMIN_LOGIN_ENDPOINT: &str = "/admin/login";
const APPLICATIONS_ENDPOINT: &str = "/application";
const APPLICATION_DETAIL_ENDPOINT: &str = "/application/apd";
const APPLICANT_INTERVIEWS_ENDPOINT: &str = "/application/interview/user";
const CHANGE_STATUS_ENDPOINT: &str = "/application/change-status";
const SCHEDULE_INTERVIEW_ENDPOINT: &str = "/application/schedule-interview/cutm";
const INTERVIEW_RESULT_ENDPOINT: &str = "/application/interview-result";
const INTERVIEWS_ENDPOINT: &str = "/api/interview";

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(endpoint));
        match &self.token {
            Some(token) => builder.header(ACCESS_TOKEN_HEADER, token),
            None => builder,
        }
    }

    /// Send, classify the status, decode the envelope and unwrap the payload
    async fn execute<R>(&self, request: RequestBuilder, resource: &'static str) -> ClientResult<R>
    where
        R: DeserializeOwned,
    {
        let response = request.send().await.map_err(|err| {
            app_log!(error, "Request to backend failed: {}", err);
            ClientError::Network(err)
        })?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        let body = response.text().await.map_err(ClientError::Network)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|error| error.message);
            app_log!(warn, "Backend returned {} for {}: {}", status, resource, body);
            return Err(ClientError::from_status(status.as_u16(), message, resource));
        }

        let envelope: ApiEnvelope<R> = serde_json::from_str(&body).map_err(|err| {
            app_log!(
                error,
                "Failed to parse {} response: {}. Raw response: {}",
                resource,
                err,
                body
            );
            ClientError::UnexpectedResponse
        })?;

        envelope.into_response()
    }

    // ===== Jobs =====

    pub async fn list_jobs(&self) -> ClientResult<Vec<Job>> {
        app_log!(info, "Fetching jobs from {}", self.url(JOBS_ENDPOINT));
        self.execute(self.request(Method::GET, JOBS_ENDPOINT), "Job")
            .await
    }

    pub async fn get_job(&self, job_id: i64) -> ClientResult<Job> {
        let endpoint = format!("{}/{}", JOBS_ENDPOINT, job_id);
        self.execute(self.request(Method::GET, &endpoint), "Job").await
    }

    pub async fn create_job(&self, payload: &JobPayload) -> ClientResult<Job> {
        let request = self.request(Method::POST, JOBS_ENDPOINT).json(payload);
        self.execute(request, "Job").await
    }

    pub async fn update_job(&self, job_id: i64, payload: &JobPayload) -> ClientResult<Job> {
        let endpoint = format!("{}/{}", JOBS_ENDPOINT, job_id);
        let request = self.request(Method::PUT, &endpoint).json(payload);
        self.execute(request, "Job").await
    }

    pub async fn delete_job(&self, job_id: i64) -> ClientResult<()> {
        let endpoint = format!("{}/{}", JOBS_ENDPOINT, job_id);
        let _: serde_json::Value = self
            .execute(self.request(Method::DELETE, &endpoint), "Job")
            .await?;
        Ok(())
    }

    // ===== Accounts =====

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthPayload> {
        self.post_credentials(LOGIN_ENDPOINT, email, password).await
    }

    pub async fn admin_login(&self, email: &str, password: &str) -> ClientResult<AuthPayload> {
        self.post_credentials(ADMIN_LOGIN_ENDPOINT, email, password)
            .await
    }

    async fn post_credentials(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthPayload> {
        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        let request = self.request(Method::POST, endpoint).json(&payload);
        self.execute(request, "User").await
    }

    /// Multipart signup: resume file, basic information and education as JSON
    pub async fn signup(&self, form: &SignupForm) -> ClientResult<AuthPayload> {
        let basic_information = serde_json::json!({
            "name": form.name,
            "email": form.email,
            "password": form.password,
            "phoneNumber": form.phone_number,
            "experience": form.experience,
        });
        let education = serde_json::to_string(&form.education)
            .map_err(|err| ClientError::validation(format!("Invalid education entries: {}", err)))?;

        let mut multipart = Form::new()
            .text("basicInformation", basic_information.to_string())
            .text("educationArray", education);

        if let Some(resume) = &form.resume {
            multipart = multipart.part("resume", resume_part(resume).await?);
        }

        app_log!(info, "Submitting signup for {}", form.email);

        let request = self.request(Method::POST, USERS_ENDPOINT).multipart(multipart);
        self.execute(request, "User").await
    }

    pub async fn user_applications(&self, user_id: i64) -> ClientResult<Vec<Application>> {
        let endpoint = format!("{}/{}", USERS_ENDPOINT, user_id);
        let profile: UserProfileResponse = self
            .execute(self.request(Method::GET, &endpoint), "User")
            .await?;
        Ok(profile.applications)
    }

    // ===== Applications =====

    pub async fn apply(
        &self,
        job_id: i64,
        user_id: i64,
        cover_letter: Option<&str>,
    ) -> ClientResult<Application> {
        let payload = serde_json::json!({
            "jobId": job_id,
            "userId": user_id,
            "coverLetter": cover_letter,
        });
        let request = self.request(Method::POST, APPLICATIONS_ENDPOINT).json(&payload);
        self.execute(request, "Job").await
    }

    pub async fn list_applications(&self) -> ClientResult<Vec<ApplicationWithJob>> {
        let rows: Vec<ApplicationDetailResponse> = self
            .execute(self.request(Method::GET, APPLICATIONS_ENDPOINT), "Application")
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let (application, job) = row.into_parts();
                ApplicationWithJob { application, job }
            })
            .collect())
    }

    pub async fn application_detail(
        &self,
        application_id: i64,
    ) -> ClientResult<(JobApplication, Job)> {
        let endpoint = format!("{}/{}", APPLICATION_DETAIL_ENDPOINT, application_id);
        let detail: ApplicationDetailResponse = self
            .execute(self.request(Method::GET, &endpoint), "Application")
            .await?;
        Ok(detail.into_parts())
    }

    pub async fn applicant_interviews(
        &self,
        user_id: i64,
    ) -> ClientResult<Vec<ApplicantInterviews>> {
        let endpoint = format!("{}/{}", APPLICANT_INTERVIEWS_ENDPOINT, user_id);
        self.execute(self.request(Method::GET, &endpoint), "Application")
            .await
    }

    pub async fn change_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
        job_title: &str,
    ) -> ClientResult<()> {
        let endpoint = format!("{}/{}", CHANGE_STATUS_ENDPOINT, application_id);
        let payload = serde_json::json!({
            "applicationId": application_id,
            "status": status,
            "jobTitle": job_title,
        });

        app_log!(info, "Changing application {} status to {}", application_id, status);

        let updated: bool = self
            .execute(self.request(Method::PUT, &endpoint).json(&payload), "Application")
            .await?;
        if updated {
            Ok(())
        } else {
            Err(ClientError::UnexpectedResponse)
        }
    }

    // ===== Interviews =====

    pub async fn list_interviews(&self) -> ClientResult<Vec<Interview>> {
        self.execute(self.request(Method::GET, INTERVIEWS_ENDPOINT), "Interview")
            .await
    }

    pub async fn schedule_interview(
        &self,
        plan: &InterviewPlan,
    ) -> ClientResult<InterviewResponse> {
        let payload = serde_json::json!({
            "interviewerName": plan.interviewer_name,
            "interviewerEmail": plan.interviewer_email,
            "interviewerPhone": plan.interviewer_phone,
            "jobApplicationId": plan.application_id,
            "modeOfInterview": plan.mode,
            "scheduleDate": plan.scheduled_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        });

        app_log!(info, "Scheduling interview for application {}", plan.application_id);

        let request = self
            .request(Method::POST, SCHEDULE_INTERVIEW_ENDPOINT)
            .json(&payload);
        self.execute(request, "Application").await
    }

    pub async fn reschedule_interview(
        &self,
        interview_id: i64,
        plan: &InterviewPlan,
    ) -> ClientResult<InterviewResponse> {
        let endpoint = format!("{}/{}", INTERVIEWS_ENDPOINT, interview_id);
        let payload = serde_json::json!({
            "interviewerName": plan.interviewer_name,
            "interviewerEmail": plan.interviewer_email,
            "interviewerPhone": plan.interviewer_phone,
            "jobApplicationId": plan.application_id,
            "modeOfInterview": plan.mode,
            "scheduledAt": plan.scheduled_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "status": InterviewStatus::Scheduled,
        });

        app_log!(info, "Rescheduling interview {}", interview_id);

        let request = self.request(Method::PUT, &endpoint).json(&payload);
        self.execute(request, "Interview").await
    }

    pub async fn record_interview_result(
        &self,
        interview_id: i64,
        result: InterviewResult,
    ) -> ClientResult<InterviewResultResponse> {
        let endpoint = format!("{}/{}", INTERVIEW_RESULT_ENDPOINT, interview_id);
        let payload = serde_json::json!({ "status": result });

        app_log!(info, "Recording result {} for interview {}", result, interview_id);

        let request = self.request(Method::PUT, &endpoint).json(&payload);
        self.execute(request, "Interview").await
    }
}

async fn resume_part(path: &Path) -> ClientResult<Part> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ClientError::validation(format!("Invalid resume path: {}", path.display())))?
        .to_string();
    let content_type = resume_content_type(&file_name)?;

    let content = tokio::fs::read(path).await.map_err(|err| {
        ClientError::validation(format!("Failed to read resume {}: {}", path.display(), err))
    })?;

    Part::bytes(content)
        .file_name(file_name)
        .mime_str(content_type)
        .map_err(ClientError::Network)
}

/// Resumes are accepted as PDF or Word documents
pub fn resume_content_type(file_name: &str) -> ClientResult<&'static str> {
    let lower_name = file_name.to_lowercase();
    if lower_name.ends_with(".pdf") {
        Ok("application/pdf")
    } else if lower_name.ends_with(".docx") {
        Ok("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
    } else if lower_name.ends_with(".doc") {
        Ok("application/msword")
    } else {
        Err(ClientError::validation(format!(
            "Unsupported resume format: {}",
            file_name
        )))
    }
}
