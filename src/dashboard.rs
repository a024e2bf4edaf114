// src/dashboard.rs
//! Admin dashboard figures over already-fetched lists

use serde::Serialize;

use crate::types::models::{
    ApplicationStatus, ApplicationWithJob, Interview, InterviewStatus, Job, JobStatus,
};

pub const RECENT_APPLICATIONS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub total_applications: usize,
    /// Not yet decided on: PENDING or UNDER_REVIEW
    pub pending_applications: usize,
    pub scheduled_interviews: usize,
}

impl DashboardMetrics {
    pub fn compute(
        jobs: &[Job],
        applications: &[ApplicationWithJob],
        interviews: &[Interview],
    ) -> Self {
        Self {
            total_jobs: jobs.len(),
            active_jobs: jobs.iter().filter(|j| j.status == JobStatus::Active).count(),
            total_applications: applications.len(),
            pending_applications: applications
                .iter()
                .filter(|row| {
                    matches!(
                        row.application.status,
                        ApplicationStatus::Pending | ApplicationStatus::UnderReview
                    )
                })
                .count(),
            scheduled_interviews: interviews
                .iter()
                .filter(|i| i.status == InterviewStatus::Scheduled)
                .count(),
        }
    }
}

/// The `limit` most recently submitted applications, newest first
pub fn recent_applications(
    applications: &[ApplicationWithJob],
    limit: usize,
) -> Vec<&ApplicationWithJob> {
    let mut rows: Vec<&ApplicationWithJob> = applications.iter().collect();
    rows.sort_by(|a, b| b.application.submitted_at.cmp(&a.application.submitted_at));
    rows.truncate(limit);
    rows
}
