// src/workflow.rs
//! Admin application workflow: status transitions and interview scheduling

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;

use crate::app_log;
use crate::core::api_client::ApiClient;
use crate::error::{ClientError, ClientResult, Notice};
use crate::types::models::{
    ApplicationStatus, Interview, InterviewResult, InterviewStatus, Job, JobApplication,
    ModeOfInterview,
};
use crate::types::response::{ApplicantInterviews, InterviewResponse, InterviewResultResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowAction {
    MarkUnderReview,
    ScheduleInterview,
    RescheduleInterview,
    RecordResult,
    Accept,
    Reject,
}

impl WorkflowAction {
    pub fn verb(&self) -> &'static str {
        match self {
            WorkflowAction::MarkUnderReview => "review",
            WorkflowAction::ScheduleInterview => "schedule an interview for",
            WorkflowAction::RescheduleInterview => "reschedule an interview for",
            WorkflowAction::RecordResult => "record an interview result for",
            WorkflowAction::Accept => "accept",
            WorkflowAction::Reject => "reject",
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkflowAction::MarkUnderReview => "Mark as under review",
            WorkflowAction::ScheduleInterview => "Schedule interview",
            WorkflowAction::RescheduleInterview => "Reschedule interview",
            WorkflowAction::RecordResult => "Record interview result",
            WorkflowAction::Accept => "Accept",
            WorkflowAction::Reject => "Reject",
        };
        f.write_str(label)
    }
}

/// Target status of `action` taken from `from`, or `None` when the
/// transition does not exist. `RecordResult` needs the result.
pub fn next_status(
    from: ApplicationStatus,
    action: WorkflowAction,
    result: Option<InterviewResult>,
) -> Option<ApplicationStatus> {
    use ApplicationStatus::*;
    use WorkflowAction::*;

    if from.is_terminal() {
        return None;
    }

    match (from, action) {
        (Pending, MarkUnderReview) => Some(UnderReview),
        (UnderReview | InterviewScheduled, ScheduleInterview) => Some(InterviewScheduled),
        (InterviewScheduled, RescheduleInterview) => Some(InterviewScheduled),
        (InterviewScheduled, RecordResult) => result.map(|result| match result {
            InterviewResult::Selected => Accepted,
            InterviewResult::Rejected => Rejected,
            InterviewResult::Waitlisted => InterviewScheduled,
        }),
        // InterviewScheduled only when a recorded result never reached the application
        (Pending | UnderReview | InterviewScheduled, Accept) => Some(Accepted),
        (Pending | UnderReview | InterviewScheduled, Reject) => Some(Rejected),
        _ => None,
    }
}

fn has_scheduled(interviews: &[Interview]) -> bool {
    interviews
        .iter()
        .any(|interview| interview.status == InterviewStatus::Scheduled)
}

/// Result of the most recent completed interview
fn last_result(interviews: &[Interview]) -> Option<InterviewResult> {
    interviews
        .iter()
        .filter(|interview| interview.status == InterviewStatus::Completed)
        .max_by_key(|interview| (interview.scheduled_at, interview.id))
        .and_then(|interview| interview.interview_result)
}

/// Actions the detail screen offers for an application in `status`
pub fn available_actions(
    status: ApplicationStatus,
    interviews: &[Interview],
) -> Vec<WorkflowAction> {
    if status.is_terminal() {
        return Vec::new();
    }

    match status {
        ApplicationStatus::Pending => vec![
            WorkflowAction::MarkUnderReview,
            WorkflowAction::Accept,
            WorkflowAction::Reject,
        ],
        ApplicationStatus::UnderReview => vec![
            WorkflowAction::ScheduleInterview,
            WorkflowAction::Accept,
            WorkflowAction::Reject,
        ],
        ApplicationStatus::InterviewScheduled if has_scheduled(interviews) => vec![
            WorkflowAction::RescheduleInterview,
            WorkflowAction::RecordResult,
        ],
        // result recorded but the status change never landed
        ApplicationStatus::InterviewScheduled => match last_result(interviews) {
            Some(InterviewResult::Selected) => vec![WorkflowAction::Accept],
            Some(InterviewResult::Rejected) => vec![WorkflowAction::Reject],
            // waitlisted, nothing on the calendar yet
            _ => vec![WorkflowAction::ScheduleInterview],
        },
        ApplicationStatus::Accepted | ApplicationStatus::Rejected => Vec::new(),
    }
}

/// Raw schedule form as typed by the admin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterviewForm {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, interpreted as UTC
    pub time: String,
    pub interviewer_name: String,
    pub interviewer_email: String,
    pub interviewer_phone: String,
    pub mode: ModeOfInterview,
}

/// Validated schedule ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewPlan {
    pub application_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub interviewer_name: String,
    pub interviewer_email: String,
    pub interviewer_phone: String,
    pub mode: ModeOfInterview,
}

impl InterviewForm {
    /// Prefill from an existing interview, for rescheduling
    pub fn from_interview(interview: &Interview) -> Self {
        Self {
            date: interview.scheduled_at.format("%Y-%m-%d").to_string(),
            time: interview.scheduled_at.format("%H:%M").to_string(),
            interviewer_name: interview.interviewer_name.clone().unwrap_or_default(),
            interviewer_email: interview.interviewer_email.clone().unwrap_or_default(),
            interviewer_phone: interview.interviewer_phone.clone().unwrap_or_default(),
            mode: interview.mode_of_interview,
        }
    }

    pub fn scheduled_at(&self) -> ClientResult<DateTime<Utc>> {
        let date = self.date.trim();
        let time = self.time.trim();
        if date.is_empty() || time.is_empty() {
            return Err(ClientError::validation("Please fill in all required fields"));
        }

        let invalid = || ClientError::validation("Invalid date or time");
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
        let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| invalid())?;
        Ok(date.and_time(time).and_utc())
    }

    pub fn to_plan(&self, application_id: i64, now: DateTime<Utc>) -> ClientResult<InterviewPlan> {
        let scheduled_at = self.scheduled_at()?;
        if scheduled_at <= now {
            return Err(ClientError::validation(
                "Interview must be scheduled in the future",
            ));
        }

        Ok(InterviewPlan {
            application_id,
            scheduled_at,
            interviewer_name: self.interviewer_name.trim().to_string(),
            interviewer_email: self.interviewer_email.trim().to_string(),
            interviewer_phone: self.interviewer_phone.trim().to_string(),
            mode: self.mode,
        })
    }
}

/// Backend calls the workflow depends on
#[async_trait]
pub trait WorkflowBackend: Send + Sync {
    async fn fetch_application(&self, application_id: i64) -> ClientResult<(JobApplication, Job)>;

    async fn fetch_applicant_interviews(
        &self,
        user_id: i64,
    ) -> ClientResult<Vec<ApplicantInterviews>>;

    async fn change_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
        job_title: &str,
    ) -> ClientResult<()>;

    async fn schedule_interview(&self, plan: &InterviewPlan) -> ClientResult<InterviewResponse>;

    async fn reschedule_interview(
        &self,
        interview_id: i64,
        plan: &InterviewPlan,
    ) -> ClientResult<InterviewResponse>;

    async fn record_result(
        &self,
        interview_id: i64,
        result: InterviewResult,
    ) -> ClientResult<InterviewResultResponse>;
}

#[async_trait]
impl WorkflowBackend for ApiClient {
    async fn fetch_application(&self, application_id: i64) -> ClientResult<(JobApplication, Job)> {
        self.application_detail(application_id).await
    }

    async fn fetch_applicant_interviews(
        &self,
        user_id: i64,
    ) -> ClientResult<Vec<ApplicantInterviews>> {
        self.applicant_interviews(user_id).await
    }

    async fn change_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
        job_title: &str,
    ) -> ClientResult<()> {
        ApiClient::change_status(self, application_id, status, job_title).await
    }

    async fn schedule_interview(&self, plan: &InterviewPlan) -> ClientResult<InterviewResponse> {
        ApiClient::schedule_interview(self, plan).await
    }

    async fn reschedule_interview(
        &self,
        interview_id: i64,
        plan: &InterviewPlan,
    ) -> ClientResult<InterviewResponse> {
        ApiClient::reschedule_interview(self, interview_id, plan).await
    }

    async fn record_result(
        &self,
        interview_id: i64,
        result: InterviewResult,
    ) -> ClientResult<InterviewResultResponse> {
        self.record_interview_result(interview_id, result).await
    }
}

/// Snapshot the detail screen works on
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDetail {
    pub application: JobApplication,
    pub job: Job,
    pub interviews: Vec<Interview>,
}

impl ApplicationDetail {
    pub fn available_actions(&self) -> Vec<WorkflowAction> {
        available_actions(self.application.status, &self.interviews)
    }

    /// The named interview, or the latest one still on the calendar
    pub fn scheduled_interview(&self, interview_id: Option<i64>) -> Option<&Interview> {
        let mut scheduled = self
            .interviews
            .iter()
            .filter(|interview| interview.status == InterviewStatus::Scheduled);
        match interview_id {
            Some(id) => scheduled.find(|interview| interview.id == id),
            None => scheduled.max_by_key(|interview| (interview.scheduled_at, interview.id)),
        }
    }

    fn upsert_interview(&mut self, interview: Interview) {
        match self.interviews.iter_mut().find(|i| i.id == interview.id) {
            Some(existing) => *existing = interview,
            None => self.interviews.push(interview),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowCommand {
    MarkUnderReview,
    ScheduleInterview(InterviewForm),
    RescheduleInterview {
        interview_id: Option<i64>,
        form: InterviewForm,
    },
    RecordResult {
        interview_id: Option<i64>,
        result: InterviewResult,
    },
    Accept,
    Reject,
}

impl WorkflowCommand {
    pub fn action(&self) -> WorkflowAction {
        match self {
            WorkflowCommand::MarkUnderReview => WorkflowAction::MarkUnderReview,
            WorkflowCommand::ScheduleInterview(_) => WorkflowAction::ScheduleInterview,
            WorkflowCommand::RescheduleInterview { .. } => WorkflowAction::RescheduleInterview,
            WorkflowCommand::RecordResult { .. } => WorkflowAction::RecordResult,
            WorkflowCommand::Accept => WorkflowAction::Accept,
            WorkflowCommand::Reject => WorkflowAction::Reject,
        }
    }
}

pub struct ApplicationWorkflow<'a, B: WorkflowBackend + ?Sized> {
    backend: &'a B,
    clock: fn() -> DateTime<Utc>,
}

impl<'a, B: WorkflowBackend + ?Sized> ApplicationWorkflow<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self::with_clock(backend, Utc::now)
    }

    pub fn with_clock(backend: &'a B, clock: fn() -> DateTime<Utc>) -> Self {
        Self { backend, clock }
    }

    /// Fetch the application and its interviews. Losing the interviews is
    /// not fatal: the detail comes back with an empty list and a warning.
    pub async fn load(
        &self,
        application_id: i64,
    ) -> ClientResult<(ApplicationDetail, Option<Notice>)> {
        let (application, job) = self.backend.fetch_application(application_id).await?;

        let (interviews, notice) = match self
            .backend
            .fetch_applicant_interviews(application.user_id)
            .await
        {
            Ok(entries) => match entries.into_iter().find(|entry| entry.id == application.id) {
                Some(entry) => (entry.interviews, None),
                None => (
                    Vec::new(),
                    Some(Notice::warning("Application not found in user interviews")),
                ),
            },
            Err(err) => {
                app_log!(
                    warn,
                    "Interviews for application {} unavailable: {}",
                    application_id,
                    err
                );
                (Vec::new(), Some(Notice::warning(err.to_string())))
            }
        };

        Ok((
            ApplicationDetail {
                application,
                job,
                interviews,
            },
            notice,
        ))
    }

    /// Run one transition. `detail` is only touched once the backend has
    /// accepted every call the transition needs.
    pub async fn apply(
        &self,
        detail: &mut ApplicationDetail,
        command: WorkflowCommand,
    ) -> ClientResult<Notice> {
        let from = detail.application.status;
        let action = command.action();
        if !detail.available_actions().contains(&action) {
            return Err(ClientError::InvalidTransition {
                from,
                action: action.verb(),
            });
        }

        let application_id = detail.application.id;
        let now = (self.clock)();

        app_log!(info, "Application {}: {} from {}", application_id, action, from);

        match command {
            WorkflowCommand::MarkUnderReview
            | WorkflowCommand::Accept
            | WorkflowCommand::Reject => {
                let target = self.target(from, action, None)?;
                self.backend
                    .change_status(application_id, target, &detail.job.title)
                    .await?;
                self.commit_status(detail, target, now);
                Ok(Notice::success("Application status updated successfully!"))
            }

            WorkflowCommand::ScheduleInterview(form) => {
                let target = self.target(from, action, None)?;
                let plan = form.to_plan(application_id, now)?;
                let response = self.backend.schedule_interview(&plan).await?;

                let reported = response.job_application.as_ref().map(|app| app.status);
                if reported != Some(target) {
                    self.backend
                        .change_status(application_id, target, &detail.job.title)
                        .await?;
                }

                detail.upsert_interview(response.interview);
                self.commit_status(detail, target, now);
                Ok(Notice::success("Interview scheduled successfully!"))
            }

            WorkflowCommand::RescheduleInterview { interview_id, form } => {
                let interview_id = self.pick_interview(detail, interview_id)?;
                let plan = form.to_plan(application_id, now)?;
                let response = self.backend.reschedule_interview(interview_id, &plan).await?;

                detail.upsert_interview(response.interview);
                detail.application.updated_at = now;
                Ok(Notice::success("Interview rescheduled successfully!"))
            }

            WorkflowCommand::RecordResult {
                interview_id,
                result,
            } => {
                let interview_id = self.pick_interview(detail, interview_id)?;
                let target = self.target(from, action, Some(result))?;
                let response = self.backend.record_result(interview_id, result).await?;

                if response.job_application.status != target {
                    self.backend
                        .change_status(application_id, target, &detail.job.title)
                        .await?;
                }

                detail.upsert_interview(response.updated_interview_data);
                self.commit_status(detail, target, now);
                Ok(Notice::success("Interview result updated successfully!"))
            }
        }
    }

    fn target(
        &self,
        from: ApplicationStatus,
        action: WorkflowAction,
        result: Option<InterviewResult>,
    ) -> ClientResult<ApplicationStatus> {
        next_status(from, action, result).ok_or(ClientError::InvalidTransition {
            from,
            action: action.verb(),
        })
    }

    fn pick_interview(
        &self,
        detail: &ApplicationDetail,
        interview_id: Option<i64>,
    ) -> ClientResult<i64> {
        detail
            .scheduled_interview(interview_id)
            .map(|interview| interview.id)
            .ok_or_else(|| ClientError::validation("No interview selected"))
    }

    fn commit_status(
        &self,
        detail: &mut ApplicationDetail,
        status: ApplicationStatus,
        now: DateTime<Utc>,
    ) {
        detail.application.status = status;
        detail.application.updated_at = now;
    }
}
