// src/types/mod.rs
pub mod models;
pub mod response;

pub use models::{
    Application, ApplicationStatus, ApplicationWithJob, EducationEntry, Interview,
    InterviewResult, InterviewRow, InterviewStatus, Job, JobApplication, JobStatus, JobType,
    ModeOfInterview, Role, User,
};
