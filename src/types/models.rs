// src/types/models.rs
//! Backend entities as the job board client sees them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Declares a backend enum that travels as an upper-case string.
///
/// Parsing with `FromStr` is strict. Deserialization is lenient: an unknown
/// string falls back to the declared default, which is how the admin screens
/// have always treated unexpected values from the backend.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (default $default:ident) {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Lenient conversion used for payloads coming off the wire
            pub fn from_wire(value: &str) -> Self {
                value.parse().unwrap_or($name::$default)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
                match normalized.as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(format!(
                        "unknown {}: {} (expected one of {})",
                        stringify!($name),
                        s,
                        [$($wire),+].join(", ")
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok($name::from_wire(&raw))
            }
        }
    };
}

wire_enum! {
    /// Lifecycle of a job application
    pub enum ApplicationStatus (default Pending) {
        Pending => "PENDING",
        UnderReview => "UNDER_REVIEW",
        InterviewScheduled => "INTERVIEW_SCHEDULED",
        Accepted => "ACCEPTED",
        Rejected => "REJECTED",
    }
}

wire_enum! {
    pub enum InterviewStatus (default Scheduled) {
        Scheduled => "SCHEDULED",
        Completed => "COMPLETED",
        Canceled => "CANCELED",
    }
}

wire_enum! {
    pub enum InterviewResult (default Selected) {
        Selected => "SELECTED",
        Rejected => "REJECTED",
        Waitlisted => "WAITLISTED",
    }
}

wire_enum! {
    pub enum ModeOfInterview (default Online) {
        Online => "ONLINE",
        Offline => "OFFLINE",
    }
}

wire_enum! {
    pub enum JobStatus (default Active) {
        Active => "ACTIVE",
        Closed => "CLOSED",
    }
}

wire_enum! {
    pub enum JobType (default FullTime) {
        FullTime => "FULL_TIME",
        PartTime => "PART_TIME",
        Contract => "CONTRACT",
        Internship => "INTERNSHIP",
        Remote => "REMOTE",
    }
}

impl ApplicationStatus {
    /// Accepted and rejected applications never move again
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }

    /// Human label, e.g. "UNDER REVIEW"
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl JobType {
    /// Label used on public listing cards
    pub fn label(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
            JobType::Remote => "Remote",
        }
    }
}

/// Capabilities are decided by role; the backend sends a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Applicant,
    Admin,
}

impl Role {
    pub fn from_wire(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Applicant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Applicant => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub department: String,
    #[serde(rename = "Qualification", default)]
    pub qualification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(rename = "imageURL", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub admin_id: i64,
    #[serde(default)]
    pub application_deadline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Application as the admin screens hold it, applicant details flattened in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub resume_url: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: i64,
    pub job_application_id: i64,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub status: InterviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interviewer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interviewer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interviewer_phone: Option<String>,
    #[serde(default)]
    pub mode_of_interview: ModeOfInterview,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_result: Option<InterviewResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub role: String,
    // Signup responses spell it "exprience"
    #[serde(default, alias = "exprience")]
    pub experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_wire(&self.role)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(rename = "educationName", default)]
    pub education_name: String,
    #[serde(rename = "timeLine", default)]
    pub time_line: String,
    #[serde(rename = "Percentage", default)]
    pub percentage: String,
    #[serde(rename = "InstituteName", default)]
    pub institute_name: String,
}

impl EducationEntry {
    pub fn is_complete(&self) -> bool {
        [
            &self.education_name,
            &self.time_line,
            &self.percentage,
            &self.institute_name,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// Applicant-side view of an application, from the user profile endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    #[serde(default)]
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: i64,
    pub job_id: i64,
}

/// Admin list row: an application joined with its job
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationWithJob {
    pub application: JobApplication,
    pub job: Job,
}

/// Admin interview row: an interview joined with who and what it is for
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewRow {
    pub interview: Interview,
    pub applicant_name: String,
    pub job_title: String,
}

impl InterviewRow {
    /// Join interviews against the already-fetched application list.
    /// Interviews whose application is unknown are kept with blank labels.
    pub fn join(
        interviews: &[Interview],
        applications: &[ApplicationWithJob],
    ) -> Vec<InterviewRow> {
        interviews
            .iter()
            .map(|interview| {
                let owner = applications
                    .iter()
                    .find(|row| row.application.id == interview.job_application_id);
                InterviewRow {
                    interview: interview.clone(),
                    applicant_name: owner
                        .map(|row| row.application.applicant_name.clone())
                        .unwrap_or_default(),
                    job_title: owner.map(|row| row.job.title.clone()).unwrap_or_default(),
                }
            })
            .collect()
    }
}
