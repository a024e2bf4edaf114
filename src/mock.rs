// src/mock.rs
//! In-memory backend seeded with the demo data set

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{ClientError, ClientResult};
use crate::types::models::{
    ApplicationStatus, ApplicationWithJob, Interview, InterviewResult, InterviewStatus, Job,
    JobApplication, JobStatus, JobType, ModeOfInterview,
};
use crate::types::response::{
    ApplicantInterviews, ApplicationStatusRef, InterviewResponse, InterviewResultResponse,
};
use crate::workflow::{InterviewPlan, WorkflowBackend};

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn job(
    id: i64,
    title: &str,
    description: &str,
    campus: &str,
    salary: &str,
    image: &str,
    job_type: JobType,
    created: &str,
) -> Job {
    Job {
        id,
        title: title.to_string(),
        description: description.to_string(),
        company_name: "Centurion University".to_string(),
        campus: campus.to_string(),
        department: String::new(),
        qualification: String::new(),
        salary_range: Some(salary.to_string()),
        image_url: Some(image.to_string()),
        job_type,
        status: JobStatus::Active,
        admin_id: 1,
        application_deadline: String::new(),
        created_at: Some(at(created)),
        updated_at: Some(at(created)),
    }
}

pub fn jobs() -> Vec<Job> {
    vec![
        job(
            1,
            "Software Engineer",
            "We are looking for a skilled software engineer to join our development team. The ideal candidate will have experience with React, Node.js, and TypeScript.",
            "Main Campus",
            "₹8,00,000 - ₹12,00,000 per annum",
            "https://images.pexels.com/photos/3183150/pexels-photo-3183150.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1",
            JobType::FullTime,
            "2023-09-15T10:30:00Z",
        ),
        job(
            2,
            "Data Scientist",
            "Join our data science team to analyze and interpret complex data sets. Experience with Python, R, and machine learning required.",
            "Tech Campus",
            "₹10,00,000 - ₹15,00,000 per annum",
            "https://images.pexels.com/photos/7413915/pexels-photo-7413915.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1",
            JobType::FullTime,
            "2023-09-16T14:45:00Z",
        ),
        job(
            3,
            "UX/UI Designer",
            "Design intuitive and engaging user experiences for our products. Proficiency in Figma, Adobe XD, and user research methodologies required.",
            "Design Campus",
            "₹7,00,000 - ₹11,00,000 per annum",
            "https://images.pexels.com/photos/3194518/pexels-photo-3194518.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1",
            JobType::FullTime,
            "2023-09-17T09:15:00Z",
        ),
        job(
            4,
            "Marketing Intern",
            "Support our marketing team in creating engaging content and managing social media campaigns.",
            "Business Campus",
            "₹15,000 - ₹20,000 per month",
            "https://images.pexels.com/photos/3184291/pexels-photo-3184291.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1",
            JobType::Internship,
            "2023-09-18T11:30:00Z",
        ),
        job(
            5,
            "Remote Content Writer",
            "Create engaging content for our blog and social media platforms. Strong writing skills and SEO knowledge required.",
            "Virtual",
            "₹5,00,000 - ₹7,00,000 per annum",
            "https://images.pexels.com/photos/3059747/pexels-photo-3059747.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1",
            JobType::Remote,
            "2023-09-19T13:45:00Z",
        ),
    ]
}

fn application(
    id: i64,
    job_id: i64,
    name: &str,
    status: ApplicationStatus,
    submitted: &str,
    updated: &str,
) -> JobApplication {
    let slug = name.to_lowercase().replace(' ', ".");
    JobApplication {
        id,
        job_id,
        // each demo applicant owns exactly one application
        user_id: 100 + id,
        applicant_name: name.to_string(),
        applicant_email: format!("{}@example.com", slug),
        applicant_phone: format!("+91 98765432{:02}", 9 + id),
        resume_url: format!("https://example.com/resumes/{}.pdf", slug.replace('.', "_")),
        status,
        submitted_at: at(submitted),
        updated_at: at(updated),
    }
}

pub fn applications() -> Vec<JobApplication> {
    vec![
        application(
            1,
            1,
            "Rahul Sharma",
            ApplicationStatus::InterviewScheduled,
            "2023-09-20T09:30:00Z",
            "2023-09-22T14:15:00Z",
        ),
        application(
            2,
            1,
            "Priya Patel",
            ApplicationStatus::UnderReview,
            "2023-09-21T10:45:00Z",
            "2023-09-23T11:30:00Z",
        ),
        application(
            3,
            2,
            "Amit Kumar",
            ApplicationStatus::Pending,
            "2023-09-22T08:15:00Z",
            "2023-09-22T08:15:00Z",
        ),
        application(
            4,
            3,
            "Sneha Gupta",
            ApplicationStatus::Accepted,
            "2023-09-23T16:20:00Z",
            "2023-09-28T13:45:00Z",
        ),
        application(
            5,
            4,
            "Vikram Singh",
            ApplicationStatus::Rejected,
            "2023-09-24T11:10:00Z",
            "2023-09-29T10:30:00Z",
        ),
        application(
            6,
            5,
            "Neha Verma",
            ApplicationStatus::InterviewScheduled,
            "2023-09-25T14:30:00Z",
            "2023-09-27T09:45:00Z",
        ),
    ]
}

pub fn interviews() -> Vec<Interview> {
    vec![
        Interview {
            id: 1,
            job_application_id: 1,
            scheduled_at: at("2023-09-25T10:00:00Z"),
            status: InterviewStatus::Completed,
            interviewer_name: Some("Dr. Rajesh Kumar".to_string()),
            interviewer_email: Some("rajesh.kumar@centurion.edu".to_string()),
            interviewer_phone: Some("+91 9876543220".to_string()),
            mode_of_interview: ModeOfInterview::Online,
            interview_result: Some(InterviewResult::Selected),
            created_at: Some(at("2023-09-22T14:15:00Z")),
            updated_at: Some(at("2023-09-25T11:30:00Z")),
        },
        Interview {
            id: 2,
            job_application_id: 6,
            scheduled_at: at("2023-09-30T14:30:00Z"),
            status: InterviewStatus::Scheduled,
            interviewer_name: Some("Prof. Anita Desai".to_string()),
            interviewer_email: Some("anita.desai@centurion.edu".to_string()),
            interviewer_phone: Some("+91 9876543221".to_string()),
            mode_of_interview: ModeOfInterview::Offline,
            interview_result: None,
            created_at: Some(at("2023-09-27T09:45:00Z")),
            updated_at: Some(at("2023-09-27T09:45:00Z")),
        },
    ]
}

/// Applications joined with their jobs, as the admin list shows them
pub fn applications_with_jobs() -> Vec<ApplicationWithJob> {
    let jobs = jobs();
    applications()
        .into_iter()
        .filter_map(|application| {
            jobs.iter()
                .find(|job| job.id == application.job_id)
                .map(|job| ApplicationWithJob {
                    application,
                    job: job.clone(),
                })
        })
        .collect()
}

#[derive(Default)]
struct MockState {
    jobs: Vec<Job>,
    applications: Vec<JobApplication>,
    interviews: Vec<Interview>,
    failures: HashMap<&'static str, ClientError>,
    calls: Vec<String>,
}

/// Stand-in for the REST backend. Schedule updates the application status
/// server-side; recording a result does not.
#[derive(Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    pub fn seeded() -> Self {
        Self {
            state: Mutex::new(MockState {
                jobs: jobs(),
                applications: applications(),
                interviews: interviews(),
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make the next call to `operation` fail with `error`
    pub fn fail_on(&self, operation: &'static str, error: ClientError) {
        self.lock().failures.insert(operation, error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn application(&self, id: i64) -> Option<JobApplication> {
        self.lock().applications.iter().find(|a| a.id == id).cloned()
    }

    pub fn interview(&self, id: i64) -> Option<Interview> {
        self.lock().interviews.iter().find(|i| i.id == id).cloned()
    }

    fn begin(
        &self,
        operation: &'static str,
        call: String,
    ) -> ClientResult<MutexGuard<'_, MockState>> {
        let mut state = self.lock();
        if let Some(error) = state.failures.remove(operation) {
            return Err(error);
        }
        state.calls.push(call);
        Ok(state)
    }
}

fn status_ref(state: &MockState, application_id: i64) -> ClientResult<ApplicationStatusRef> {
    state
        .applications
        .iter()
        .find(|a| a.id == application_id)
        .map(|a| ApplicationStatusRef {
            id: a.id,
            status: a.status,
        })
        .ok_or(ClientError::NotFound {
            resource: "Application",
        })
}

#[async_trait]
impl WorkflowBackend for MockBackend {
    async fn fetch_application(&self, application_id: i64) -> ClientResult<(JobApplication, Job)> {
        let state = self.begin(
            "fetch_application",
            format!("fetch_application:{}", application_id),
        )?;
        let application = state
            .applications
            .iter()
            .find(|a| a.id == application_id)
            .cloned()
            .ok_or(ClientError::NotFound {
                resource: "Application",
            })?;
        let job = state
            .jobs
            .iter()
            .find(|j| j.id == application.job_id)
            .cloned()
            .ok_or(ClientError::NotFound { resource: "Job" })?;
        Ok((application, job))
    }

    async fn fetch_applicant_interviews(
        &self,
        user_id: i64,
    ) -> ClientResult<Vec<ApplicantInterviews>> {
        let state = self.begin(
            "fetch_applicant_interviews",
            format!("fetch_applicant_interviews:{}", user_id),
        )?;
        Ok(state
            .applications
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| ApplicantInterviews {
                id: a.id,
                interviews: state
                    .interviews
                    .iter()
                    .filter(|i| i.job_application_id == a.id)
                    .cloned()
                    .collect(),
            })
            .collect())
    }

    async fn change_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
        _job_title: &str,
    ) -> ClientResult<()> {
        let mut state = self.begin(
            "change_status",
            format!("change_status:{}:{}", application_id, status),
        )?;
        let application = state
            .applications
            .iter_mut()
            .find(|a| a.id == application_id)
            .ok_or(ClientError::NotFound {
                resource: "Application",
            })?;
        application.status = status;
        Ok(())
    }

    async fn schedule_interview(&self, plan: &InterviewPlan) -> ClientResult<InterviewResponse> {
        let mut state = self.begin(
            "schedule_interview",
            format!("schedule_interview:{}", plan.application_id),
        )?;

        let application = state
            .applications
            .iter_mut()
            .find(|a| a.id == plan.application_id)
            .ok_or(ClientError::NotFound {
                resource: "Application",
            })?;
        application.status = ApplicationStatus::InterviewScheduled;

        let id = state.interviews.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let interview = Interview {
            id,
            job_application_id: plan.application_id,
            scheduled_at: plan.scheduled_at,
            status: InterviewStatus::Scheduled,
            interviewer_name: Some(plan.interviewer_name.clone()),
            interviewer_email: Some(plan.interviewer_email.clone()),
            interviewer_phone: Some(plan.interviewer_phone.clone()),
            mode_of_interview: plan.mode,
            interview_result: None,
            created_at: None,
            updated_at: None,
        };
        state.interviews.push(interview.clone());

        Ok(InterviewResponse {
            interview,
            job_application: Some(status_ref(&state, plan.application_id)?),
        })
    }

    async fn reschedule_interview(
        &self,
        interview_id: i64,
        plan: &InterviewPlan,
    ) -> ClientResult<InterviewResponse> {
        let mut state = self.begin(
            "reschedule_interview",
            format!("reschedule_interview:{}", interview_id),
        )?;
        let interview = state
            .interviews
            .iter_mut()
            .find(|i| i.id == interview_id)
            .ok_or(ClientError::NotFound {
                resource: "Interview",
            })?;

        interview.scheduled_at = plan.scheduled_at;
        interview.status = InterviewStatus::Scheduled;
        interview.interviewer_name = Some(plan.interviewer_name.clone());
        interview.interviewer_email = Some(plan.interviewer_email.clone());
        interview.interviewer_phone = Some(plan.interviewer_phone.clone());
        interview.mode_of_interview = plan.mode;

        Ok(InterviewResponse {
            interview: interview.clone(),
            job_application: None,
        })
    }

    async fn record_result(
        &self,
        interview_id: i64,
        result: InterviewResult,
    ) -> ClientResult<InterviewResultResponse> {
        let mut state = self.begin("record_result", format!("record_result:{}", interview_id))?;
        let interview = state
            .interviews
            .iter_mut()
            .find(|i| i.id == interview_id)
            .ok_or(ClientError::NotFound {
                resource: "Interview",
            })?;

        interview.interview_result = Some(result);
        interview.status = InterviewStatus::Completed;
        let updated = interview.clone();

        Ok(InterviewResultResponse {
            job_application: status_ref(&state, updated.job_application_id)?,
            updated_interview_data: updated,
        })
    }
}
