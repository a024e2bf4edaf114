// src/filter.rs
//! Client-side narrowing of already-fetched lists

use crate::catalog::JobListing;
use crate::types::models::{
    ApplicationStatus, ApplicationWithJob, InterviewRow, InterviewStatus, Job, JobStatus, JobType,
    ModeOfInterview,
};

pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;

    /// Matching items, input order preserved
    fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    fn apply_cloned(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

/// Case-insensitive substring over any field; an empty query matches all
pub fn text_matches(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Empty selection is a wildcard
pub fn selector_matches(selected: &str, value: &str) -> bool {
    selected.is_empty() || selected == value
}

fn option_matches<V: PartialEq>(selected: &Option<V>, value: &V) -> bool {
    selected.as_ref().map_or(true, |wanted| wanted == value)
}

/// Distinct values in first-seen order, for populating a selector
pub fn facet<'a, T, F>(items: &'a [T], key: F) -> Vec<&'a str>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut values: Vec<&str> = Vec::new();
    for item in items {
        let value = key(item);
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

/// Public job listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub query: String,
    pub department: String,
    pub location: String,
    pub job_type: String,
}

impl ListingFilter {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ListFilter<JobListing> for ListingFilter {
    fn matches(&self, job: &JobListing) -> bool {
        text_matches(&self.query, &[&job.title, &job.department])
            && selector_matches(&self.department, &job.department)
            && selector_matches(&self.location, &job.location)
            && selector_matches(&self.job_type, &job.job_type)
    }
}

/// Admin jobs table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub query: String,
    pub department: String,
    pub campus: String,
    pub job_type: Option<JobType>,
    pub status: Option<JobStatus>,
}

impl ListFilter<Job> for JobFilter {
    fn matches(&self, job: &Job) -> bool {
        text_matches(
            &self.query,
            &[&job.title, &job.department, &job.description, &job.campus],
        ) && selector_matches(&self.department, &job.department)
            && selector_matches(&self.campus, &job.campus)
            && option_matches(&self.job_type, &job.job_type)
            && option_matches(&self.status, &job.status)
    }
}

/// Admin applications table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub query: String,
    pub status: Option<ApplicationStatus>,
}

impl ListFilter<ApplicationWithJob> for ApplicationFilter {
    fn matches(&self, row: &ApplicationWithJob) -> bool {
        text_matches(
            &self.query,
            &[
                &row.application.applicant_name,
                &row.application.applicant_email,
                &row.job.title,
            ],
        ) && option_matches(&self.status, &row.application.status)
    }
}

/// Admin interviews table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterviewFilter {
    pub query: String,
    pub status: Option<InterviewStatus>,
    pub mode: Option<ModeOfInterview>,
}

impl ListFilter<InterviewRow> for InterviewFilter {
    fn matches(&self, row: &InterviewRow) -> bool {
        let interviewer = row.interview.interviewer_name.as_deref().unwrap_or_default();
        text_matches(
            &self.query,
            &[&row.applicant_name, &row.job_title, interviewer],
        ) && option_matches(&self.status, &row.interview.status)
            && option_matches(&self.mode, &row.interview.mode_of_interview)
    }
}
