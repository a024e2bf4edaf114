// src/forms.rs
//! Admin job create/edit form

use serde::Serialize;

use crate::error::{ClientError, ClientResult};
use crate::types::models::{Job, JobStatus, JobType};

pub const DEFAULT_COMPANY: &str = "Centurion University";

/// Editable job posting; blank optional fields are dropped on submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobForm {
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub campus: String,
    pub department: String,
    pub qualification: String,
    pub salary_range: String,
    pub image_url: String,
    pub job_type: JobType,
    pub status: JobStatus,
    pub admin_id: i64,
    pub application_deadline: String,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            company_name: DEFAULT_COMPANY.to_string(),
            campus: String::new(),
            department: String::new(),
            qualification: String::new(),
            salary_range: String::new(),
            image_url: String::new(),
            job_type: JobType::default(),
            status: JobStatus::default(),
            admin_id: 1,
            application_deadline: String::new(),
        }
    }
}

impl From<&Job> for JobForm {
    fn from(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            description: job.description.clone(),
            company_name: job.company_name.clone(),
            campus: job.campus.clone(),
            department: job.department.clone(),
            qualification: job.qualification.clone(),
            salary_range: job.salary_range.clone().unwrap_or_default(),
            image_url: job.image_url.clone().unwrap_or_default(),
            job_type: job.job_type,
            status: job.status,
            admin_id: job.admin_id,
            application_deadline: job.application_deadline.clone(),
        }
    }
}

/// Body of `POST /job` and `PUT /job/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub campus: String,
    pub department: String,
    #[serde(rename = "Qualification")]
    pub qualification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(rename = "imageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub job_type: JobType,
    pub status: JobStatus,
    pub admin_id: i64,
    pub application_deadline: String,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl JobForm {
    /// Names of required fields that are still blank, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("campus", &self.campus),
            ("department", &self.department),
            ("description", &self.description),
            ("qualification", &self.qualification),
            ("application deadline", &self.application_deadline),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn validate(&self) -> ClientResult<JobPayload> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::validation(format!(
                "Please fill in all required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(JobPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            company_name: non_blank(&self.company_name)
                .unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            campus: self.campus.trim().to_string(),
            department: self.department.trim().to_string(),
            qualification: self.qualification.trim().to_string(),
            salary_range: non_blank(&self.salary_range),
            image_url: non_blank(&self.image_url),
            job_type: self.job_type,
            status: self.status,
            admin_id: self.admin_id,
            application_deadline: self.application_deadline.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> JobForm {
        JobForm {
            title: "Software Engineer".into(),
            description: "Build and maintain campus systems".into(),
            campus: "Main Campus".into(),
            department: "Computer Science".into(),
            qualification: "B.Tech in Computer Science".into(),
            application_deadline: "2025-07-31".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_form_lists_every_required_field() {
        let form = JobForm::default();
        assert_eq!(
            form.missing_fields(),
            vec![
                "title",
                "campus",
                "department",
                "description",
                "qualification",
                "application deadline"
            ]
        );
        assert!(matches!(form.validate(), Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_whitespace_does_not_satisfy_required() {
        let mut form = filled();
        form.qualification = "   ".into();
        let err = form.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: qualification"
        );
    }

    #[test]
    fn test_payload_uses_backend_field_names() {
        let mut form = filled();
        form.image_url = "https://example.com/se.jpg".into();
        form.job_type = JobType::Contract;

        let payload = form.validate().unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["Qualification"], "B.Tech in Computer Science");
        assert_eq!(value["imageURL"], "https://example.com/se.jpg");
        assert_eq!(value["jobType"], "CONTRACT");
        assert_eq!(value["status"], "ACTIVE");
        assert_eq!(value["companyName"], DEFAULT_COMPANY);
        assert_eq!(value["adminId"], 1);
        assert!(value.get("salaryRange").is_none());
    }

    #[test]
    fn test_edit_form_round_trips_existing_job() {
        let payload = filled().validate().unwrap();
        let job = Job {
            id: 4,
            title: payload.title.clone(),
            description: payload.description.clone(),
            company_name: payload.company_name.clone(),
            campus: payload.campus.clone(),
            department: payload.department.clone(),
            qualification: payload.qualification.clone(),
            salary_range: Some("₹8-12 LPA".into()),
            image_url: None,
            job_type: JobType::FullTime,
            status: JobStatus::Closed,
            admin_id: 2,
            application_deadline: payload.application_deadline.clone(),
            created_at: None,
            updated_at: None,
        };

        let edited = JobForm::from(&job).validate().unwrap();
        assert_eq!(edited.status, JobStatus::Closed);
        assert_eq!(edited.admin_id, 2);
        assert_eq!(edited.salary_range.as_deref(), Some("₹8-12 LPA"));
    }
}
