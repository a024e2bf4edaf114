//! Client for the university job board backend: typed API access, session and
//! draft persistence, the signup wizard, list filtering, the admin
//! application workflow and page routing.

pub mod logging;

pub mod catalog;
pub mod cli;
pub mod core;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod filter;
pub mod forms;
pub mod mock;
pub mod routes;
pub mod session;
pub mod signup;
pub mod types;
pub mod workflow;

pub use crate::core::{ApiClient, ConfigManager};
pub use catalog::JobListing;
pub use dashboard::DashboardMetrics;
pub use draft::DraftStore;
pub use error::{ClientError, ClientResult, Notice, NoticeLevel};
pub use filter::ListFilter;
pub use routes::{navigate, Navigation, Route};
pub use session::Session;
pub use signup::{SignupForm, SignupWizard};
pub use workflow::{ApplicationWorkflow, WorkflowAction, WorkflowBackend, WorkflowCommand};
