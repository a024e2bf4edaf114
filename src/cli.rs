// src/cli.rs
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_log;
use crate::catalog::{listings_from_jobs, sample_listings, JobListing};
use crate::core::{ApiClient, ConfigManager, SharedStore, SqliteStore};
use crate::dashboard::{recent_applications, DashboardMetrics, RECENT_APPLICATIONS};
use crate::draft::DraftStore;
use crate::error::{ClientError, Notice};
use crate::filter::{
    facet, ApplicationFilter, InterviewFilter, JobFilter, ListFilter, ListingFilter,
};
use crate::forms::JobForm;
use crate::routes::{navigate, Navigation, Route};
use crate::session::Session;
use crate::signup::{EducationField, SignupForm, SignupWizard};
use crate::types::models::{
    ApplicationStatus, InterviewResult, InterviewRow, InterviewStatus, JobStatus, JobType,
    ModeOfInterview,
};
use crate::workflow::{ApplicationDetail, ApplicationWorkflow, InterviewForm, WorkflowCommand};

#[derive(Parser)]
#[command(name = "job-board")]
#[command(about = "Browse, apply to and manage university job postings")]
pub struct JobBoardCli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the configured backend URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Browse open positions
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Log in as an applicant, or as an admin with --admin
    Login {
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        admin: bool,
        /// Keep the session after this command exits
        #[arg(long)]
        remember: bool,
    },
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Multi-step account creation
    Signup {
        #[command(subcommand)]
        command: SignupCommand,
    },
    /// Apply to a job as the logged-in applicant
    Apply {
        job_id: i64,
        #[arg(long)]
        cover_letter: Option<String>,
    },
    /// List the logged-in applicant's applications
    MyApplications,
    /// Admin panel
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Resolve a page path for the current session
    Route { path: String },
}

#[derive(Subcommand)]
pub enum JobsCommand {
    List {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "")]
        department: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Card label, e.g. "Full-time"
        #[arg(long = "type", default_value = "")]
        job_type: String,
        /// Use the built-in catalog instead of the backend
        #[arg(long)]
        sample: bool,
    },
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum SignupCommand {
    /// Set personal information (step 1)
    Personal {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        experience: Option<String>,
    },
    /// Edit education entries (step 2)
    Education {
        /// Append an empty entry first
        #[arg(long)]
        add: bool,
        /// Remove the entry at this 1-based position
        #[arg(long)]
        remove: Option<usize>,
        /// 1-based entry to edit
        #[arg(long, default_value_t = 1)]
        entry: usize,
        #[arg(long)]
        degree: Option<String>,
        #[arg(long)]
        timeline: Option<String>,
        #[arg(long)]
        percentage: Option<String>,
        #[arg(long)]
        institute: Option<String>,
    },
    /// Pick the resume and accept or withdraw the terms (step 3)
    Resume {
        path: Option<PathBuf>,
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        agree_terms: Option<bool>,
    },
    Status,
    Next,
    Back,
    Submit,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    Jobs {
        #[command(subcommand)]
        command: AdminJobsCommand,
    },
    Applications {
        #[command(subcommand)]
        command: AdminApplicationsCommand,
    },
    Interviews {
        #[command(subcommand)]
        command: AdminInterviewsCommand,
    },
    Dashboard,
}

#[derive(Args, Default)]
pub struct JobArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub campus: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub qualification: Option<String>,
    #[arg(long)]
    pub salary_range: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub job_type: Option<JobType>,
    #[arg(long)]
    pub status: Option<JobStatus>,
    #[arg(long)]
    pub deadline: Option<String>,
}

impl JobArgs {
    fn apply_to(self, form: &mut JobForm) {
        let text_fields = [
            (self.title, &mut form.title),
            (self.description, &mut form.description),
            (self.campus, &mut form.campus),
            (self.department, &mut form.department),
            (self.qualification, &mut form.qualification),
            (self.salary_range, &mut form.salary_range),
            (self.image_url, &mut form.image_url),
            (self.deadline, &mut form.application_deadline),
        ];
        for (value, slot) in text_fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(job_type) = self.job_type {
            form.job_type = job_type;
        }
        if let Some(status) = self.status {
            form.status = status;
        }
    }
}

#[derive(Subcommand)]
pub enum AdminJobsCommand {
    List {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "")]
        department: String,
        #[arg(long, default_value = "")]
        campus: String,
        #[arg(long)]
        job_type: Option<JobType>,
        #[arg(long)]
        status: Option<JobStatus>,
    },
    Create(JobArgs),
    Update {
        id: i64,
        #[command(flatten)]
        fields: JobArgs,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum AdminApplicationsCommand {
    List {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        status: Option<ApplicationStatus>,
    },
    Show { id: i64 },
    /// Mark a pending application as under review
    Review { id: i64 },
    Accept { id: i64 },
    Reject { id: i64 },
}

#[derive(Args)]
pub struct InterviewArgs {
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// HH:MM, UTC
    #[arg(long)]
    pub time: String,
    #[arg(long, default_value = "")]
    pub interviewer_name: String,
    #[arg(long, default_value = "")]
    pub interviewer_email: String,
    #[arg(long, default_value = "")]
    pub interviewer_phone: String,
    #[arg(long, default_value = "ONLINE")]
    pub mode: ModeOfInterview,
}

impl From<InterviewArgs> for InterviewForm {
    fn from(args: InterviewArgs) -> Self {
        Self {
            date: args.date,
            time: args.time,
            interviewer_name: args.interviewer_name,
            interviewer_email: args.interviewer_email,
            interviewer_phone: args.interviewer_phone,
            mode: args.mode,
        }
    }
}

#[derive(Subcommand)]
pub enum AdminInterviewsCommand {
    List {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        status: Option<InterviewStatus>,
        #[arg(long)]
        mode: Option<ModeOfInterview>,
    },
    Schedule {
        application_id: i64,
        #[command(flatten)]
        when: InterviewArgs,
    },
    Reschedule {
        application_id: i64,
        /// Defaults to the latest scheduled interview
        #[arg(long)]
        interview_id: Option<i64>,
        #[command(flatten)]
        when: InterviewArgs,
    },
    Result {
        application_id: i64,
        result: InterviewResult,
        #[arg(long)]
        interview_id: Option<i64>,
    },
}

/// Everything a command needs: config, durable store, session and client
pub struct AppContext {
    pub config: ConfigManager,
    pub session: Session,
    pub client: ApiClient,
    pub drafts: DraftStore,
}

impl AppContext {
    pub async fn open(config: ConfigManager, api_url: Option<String>) -> Result<Self> {
        config.ensure_directories().await?;
        let store: SharedStore = Arc::new(SqliteStore::open(&config.client.store_path).await?);

        let mut session = Session::new(store.clone());
        if session.load_user_from_storage().await? {
            app_log!(debug, "Restored stored session");
        }

        let base_url = api_url.unwrap_or_else(|| config.client.api_base_url.clone());
        let client = ApiClient::new(&base_url, config.client.timeout_seconds)?
            .with_token(session.token().map(str::to_string));

        Ok(Self {
            config,
            session,
            client,
            drafts: DraftStore::new(store),
        })
    }

    /// Gate a command behind the role its page requires
    fn require(&self, route: Route) -> Result<(), ClientError> {
        match navigate(&route.path(), self.session.role()) {
            Navigation::Render(_) => Ok(()),
            Navigation::Redirect(_) if self.session.is_authenticated() => Err(
                ClientError::validation(format!("Your account cannot open {}", route)),
            ),
            Navigation::Redirect(_) => Err(ClientError::Unauthorized),
        }
    }

    fn user_id(&self) -> Result<i64, ClientError> {
        self.session
            .user()
            .map(|user| user.id)
            .ok_or(ClientError::Unauthorized)
    }
}

pub async fn handle_command(cli: JobBoardCli, ctx: &mut AppContext) -> Result<()> {
    let outcome = match cli.command {
        Command::Jobs { command } => handle_jobs(command, ctx).await,
        Command::Login {
            email,
            password,
            admin,
            remember,
        } => login(ctx, &email, &password, admin, remember).await,
        Command::Logout => logout(ctx).await,
        Command::Whoami => {
            whoami(ctx);
            Ok(())
        }
        Command::Signup { command } => handle_signup(command, ctx).await,
        Command::Apply {
            job_id,
            cover_letter,
        } => apply(ctx, job_id, cover_letter.as_deref()).await,
        Command::MyApplications => my_applications(ctx).await,
        Command::Admin { command } => handle_admin(command, ctx).await,
        Command::Route { path } => {
            route(ctx, &path);
            Ok(())
        }
    };

    if let Err(err) = outcome {
        app_log!(error, "Command failed: {:?}", err);
        app_log!(info, "{}", Notice::from(&err));
        if err.requires_login() {
            app_log!(info, "   Run `job-board login <email> --password <password>` first");
        }
    }
    Ok(())
}

type Outcome = Result<(), ClientError>;

async fn handle_jobs(command: JobsCommand, ctx: &AppContext) -> Outcome {
    match command {
        JobsCommand::List {
            query,
            department,
            location,
            job_type,
            sample,
        } => {
            let listings = if sample {
                sample_listings()
            } else {
                listings_from_jobs(&ctx.client.list_jobs().await?)
            };
            let filter = ListingFilter {
                query,
                department,
                location,
                job_type,
            };
            print_listings(&listings, &filter);
            Ok(())
        }
        JobsCommand::Show { id } => {
            let job = ctx.client.get_job(id).await?;
            app_log!(info, "{} ({})", job.title, job.company_name);
            app_log!(info, "   Campus:        {}", job.campus);
            app_log!(info, "   Department:    {}", job.department);
            app_log!(info, "   Type:          {}", job.job_type.label());
            app_log!(info, "   Qualification: {}", job.qualification);
            if let Some(salary) = &job.salary_range {
                app_log!(info, "   Salary:        {}", salary);
            }
            app_log!(info, "   Deadline:      {}", job.application_deadline);
            app_log!(info, "");
            app_log!(info, "{}", job.description);
            Ok(())
        }
    }
}

fn print_listings(listings: &[JobListing], filter: &ListingFilter) {
    let matched = filter.apply(listings);
    app_log!(info, "Showing {} of {} jobs", matched.len(), listings.len());
    app_log!(
        info,
        "{:<5} {:<32} {:<24} {:<24} {:<10} {:<15}",
        "ID", "Title", "Department", "Location", "Type", "Deadline"
    );
    app_log!(info, "{}", "-".repeat(115));
    for job in matched {
        app_log!(
            info,
            "{:<5} {:<32} {:<24} {:<24} {:<10} {:<15}",
            job.id, job.title, job.department, job.location, job.job_type, job.deadline
        );
    }
    app_log!(
        info,
        "Departments: {}",
        facet(listings, |j| j.department.as_str()).join(", ")
    );
    app_log!(
        info,
        "Locations:   {}",
        facet(listings, |j| j.location.as_str()).join(", ")
    );
}

async fn login(
    ctx: &mut AppContext,
    email: &str,
    password: &str,
    admin: bool,
    remember: bool,
) -> Outcome {
    let auth = if admin {
        ctx.client.admin_login(email, password).await?
    } else {
        ctx.client.login(email, password).await?
    };

    let name = auth.user.name.clone();
    ctx.client.set_token(Some(auth.token.clone()));
    ctx.session.set_user(auth.user, auth.token, remember).await?;

    app_log!(info, "{}", Notice::success(format!("Welcome, {}!", name)));
    if !remember {
        app_log!(info, "   Session not stored; pass --remember to keep it");
    }
    Ok(())
}

async fn logout(ctx: &mut AppContext) -> Outcome {
    ctx.session.clear_user().await?;
    ctx.client.set_token(None);
    app_log!(info, "{}", Notice::success("Logged out"));
    Ok(())
}

fn whoami(ctx: &AppContext) {
    match ctx.session.user() {
        Some(user) => {
            app_log!(info, "{} <{}>", user.name, user.email);
            app_log!(info, "   ID:   {}", user.id);
            app_log!(info, "   Role: {}", user.role().as_str());
        }
        None => app_log!(info, "{}", Notice::info("Not logged in")),
    }
}

fn route(ctx: &AppContext, path: &str) {
    match navigate(path, ctx.session.role()) {
        Navigation::Render(route) => app_log!(info, "render {}", route),
        Navigation::Redirect(route) => app_log!(info, "redirect {}", route),
    }
}

async fn handle_signup(command: SignupCommand, ctx: &mut AppContext) -> Outcome {
    let mut wizard = SignupWizard::restore(&ctx.drafts).await?;

    match command {
        SignupCommand::Personal {
            name,
            email,
            password,
            phone,
            experience,
        } => {
            let form = wizard.form_mut();
            let fields = [
                (name, &mut form.name),
                (email, &mut form.email),
                (password, &mut form.password),
                (phone, &mut form.phone_number),
                (experience, &mut form.experience),
            ];
            for (value, slot) in fields {
                if let Some(value) = value {
                    *slot = value;
                }
            }
        }
        SignupCommand::Education {
            add,
            remove,
            entry,
            degree,
            timeline,
            percentage,
            institute,
        } => {
            if add {
                wizard.add_education();
            }
            if let Some(position) = remove {
                wizard.remove_education(position.saturating_sub(1))?;
            }
            let index = entry.saturating_sub(1);
            let edits = [
                (EducationField::Name, degree),
                (EducationField::Timeline, timeline),
                (EducationField::Percentage, percentage),
                (EducationField::Institute, institute),
            ];
            for (field, value) in edits {
                if let Some(value) = value {
                    wizard.update_education(index, field, &value)?;
                }
            }
        }
        SignupCommand::Resume { path, agree_terms } => {
            apply_resume_step(wizard.form_mut(), path, agree_terms)?;
        }
        SignupCommand::Status => {}
        SignupCommand::Next => {
            let step = wizard.next()?;
            app_log!(info, "Moved to step {}", step.number());
        }
        SignupCommand::Back => {
            let step = wizard.back();
            app_log!(info, "Moved to step {}", step.number());
        }
        SignupCommand::Submit => {
            let user = wizard
                .submit(&ctx.client, &mut ctx.session, &ctx.drafts)
                .await?;
            app_log!(info, "{}", Notice::success(format!("Account created for {}", user.email)));
            return Ok(());
        }
    }

    wizard.persist(&ctx.drafts).await?;
    print_wizard(&wizard);
    Ok(())
}

fn apply_resume_step(
    form: &mut SignupForm,
    path: Option<PathBuf>,
    agree_terms: Option<bool>,
) -> Outcome {
    if let Some(path) = path {
        crate::core::api_client::resume_content_type(&path.to_string_lossy())?;
        form.resume = Some(path);
    }
    if let Some(agree_terms) = agree_terms {
        form.agree_terms = agree_terms;
    }
    Ok(())
}

fn print_wizard(wizard: &SignupWizard) {
    let form = wizard.form();
    let mark = |ok: bool| if ok { "✅" } else { "⚠️ " };

    app_log!(info, "Signup step {} of 3", wizard.step().number());
    app_log!(
        info,
        "{} Personal: {} <{}> {} / {}",
        mark(form.is_personal_info_valid()),
        form.name,
        form.email,
        form.phone_number,
        form.experience
    );
    app_log!(info, "{} Education:", mark(form.is_education_valid()));
    for (position, entry) in form.education.iter().enumerate() {
        app_log!(
            info,
            "   {}. {} | {} | {} | {}",
            position + 1,
            entry.education_name,
            entry.time_line,
            entry.percentage,
            entry.institute_name
        );
    }
    app_log!(
        info,
        "{} Resume: {} (terms accepted: {})",
        mark(form.is_ready_to_submit()),
        form.resume
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string()),
        form.agree_terms
    );
}

async fn apply(ctx: &AppContext, job_id: i64, cover_letter: Option<&str>) -> Outcome {
    let user_id = ctx.user_id()?;
    let application = ctx.client.apply(job_id, user_id, cover_letter).await?;
    app_log!(
        info,
        "{}",
        Notice::success(format!(
            "Application #{} submitted ({})",
            application.id,
            application.status.label()
        ))
    );
    Ok(())
}

async fn my_applications(ctx: &AppContext) -> Outcome {
    let user_id = ctx.user_id()?;
    ctx.require(Route::MyApplications(user_id))?;

    let applications = ctx.client.user_applications(user_id).await?;
    if applications.is_empty() {
        app_log!(info, "{}", Notice::info("No applications yet."));
        return Ok(());
    }

    app_log!(info, "{:<5} {:<7} {:<22} {:<20}", "ID", "Job", "Status", "Applied");
    app_log!(info, "{}", "-".repeat(56));
    for application in applications {
        app_log!(
            info,
            "{:<5} {:<7} {:<22} {:<20}",
            application.id,
            application.job_id,
            application.status.label(),
            application.applied_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

async fn handle_admin(command: AdminCommand, ctx: &AppContext) -> Outcome {
    match command {
        AdminCommand::Jobs { command } => admin_jobs(command, ctx).await,
        AdminCommand::Applications { command } => admin_applications(command, ctx).await,
        AdminCommand::Interviews { command } => admin_interviews(command, ctx).await,
        AdminCommand::Dashboard => {
            ctx.require(Route::AdminDashboard)?;
            dashboard(ctx).await
        }
    }
}

async fn admin_jobs(command: AdminJobsCommand, ctx: &AppContext) -> Outcome {
    match command {
        AdminJobsCommand::List {
            query,
            department,
            campus,
            job_type,
            status,
        } => {
            ctx.require(Route::AdminJobs)?;
            let jobs = ctx.client.list_jobs().await?;
            let filter = JobFilter {
                query,
                department,
                campus,
                job_type,
                status,
            };
            let matched = filter.apply(&jobs);
            app_log!(info, "Showing {} of {} jobs", matched.len(), jobs.len());
            app_log!(
                info,
                "{:<5} {:<28} {:<18} {:<12} {:<8} {:<12}",
                "ID", "Title", "Campus", "Type", "Status", "Deadline"
            );
            app_log!(info, "{}", "-".repeat(88));
            for job in matched {
                app_log!(
                    info,
                    "{:<5} {:<28} {:<18} {:<12} {:<8} {:<12}",
                    job.id,
                    job.title,
                    job.campus,
                    job.job_type.label(),
                    job.status,
                    job.application_deadline
                );
            }
            Ok(())
        }
        AdminJobsCommand::Create(fields) => {
            ctx.require(Route::AdminJobCreate)?;
            let mut form = JobForm {
                admin_id: ctx.user_id()?,
                ..Default::default()
            };
            fields.apply_to(&mut form);
            let job = ctx.client.create_job(&form.validate()?).await?;
            app_log!(
                info,
                "{}",
                Notice::success(format!("Job #{} created: {}", job.id, job.title))
            );
            Ok(())
        }
        AdminJobsCommand::Update { id, fields } => {
            ctx.require(Route::AdminJobEdit(id))?;
            let existing = ctx.client.get_job(id).await?;
            let mut form = JobForm::from(&existing);
            fields.apply_to(&mut form);
            let job = ctx.client.update_job(id, &form.validate()?).await?;
            app_log!(info, "{}", Notice::success(format!("Job #{} updated", job.id)));
            Ok(())
        }
        AdminJobsCommand::Delete { id } => {
            ctx.require(Route::AdminJobDetail(id))?;
            ctx.client.delete_job(id).await?;
            app_log!(info, "{}", Notice::success(format!("Job #{} deleted", id)));
            Ok(())
        }
    }
}

async fn admin_applications(command: AdminApplicationsCommand, ctx: &AppContext) -> Outcome {
    let (id, workflow_command) = match command {
        AdminApplicationsCommand::List { query, status } => {
            ctx.require(Route::AdminApplications)?;
            let rows = ctx.client.list_applications().await?;
            let matched = ApplicationFilter { query, status }.apply(&rows);
            app_log!(info, "Showing {} of {} applications", matched.len(), rows.len());
            app_log!(
                info,
                "{:<5} {:<20} {:<30} {:<24} {:<20}",
                "ID", "Applicant", "Email", "Job", "Status"
            );
            app_log!(info, "{}", "-".repeat(103));
            for row in matched {
                app_log!(
                    info,
                    "{:<5} {:<20} {:<30} {:<24} {:<20}",
                    row.application.id,
                    row.application.applicant_name,
                    row.application.applicant_email,
                    row.job.title,
                    row.application.status.label()
                );
            }
            return Ok(());
        }
        AdminApplicationsCommand::Show { id } => {
            ctx.require(Route::AdminApplicationDetail(id))?;
            let (detail, notice) = ApplicationWorkflow::new(&ctx.client).load(id).await?;
            if let Some(notice) = notice {
                app_log!(info, "{}", notice);
            }
            print_detail(&detail);
            return Ok(());
        }
        AdminApplicationsCommand::Review { id } => (id, WorkflowCommand::MarkUnderReview),
        AdminApplicationsCommand::Accept { id } => (id, WorkflowCommand::Accept),
        AdminApplicationsCommand::Reject { id } => (id, WorkflowCommand::Reject),
    };

    run_workflow(ctx, id, workflow_command).await
}

async fn admin_interviews(command: AdminInterviewsCommand, ctx: &AppContext) -> Outcome {
    let (id, workflow_command) = match command {
        AdminInterviewsCommand::List {
            query,
            status,
            mode,
        } => {
            ctx.require(Route::AdminInterviews)?;
            let interviews = ctx.client.list_interviews().await?;
            let applications = ctx.client.list_applications().await?;
            let rows = InterviewRow::join(&interviews, &applications);
            let matched = InterviewFilter { query, status, mode }.apply(&rows);

            app_log!(info, "Showing {} of {} interviews", matched.len(), rows.len());
            app_log!(
                info,
                "{:<5} {:<20} {:<24} {:<18} {:<10} {:<8} {:<20}",
                "ID", "Applicant", "Job", "When", "Status", "Mode", "Interviewer"
            );
            app_log!(info, "{}", "-".repeat(110));
            for row in matched {
                app_log!(
                    info,
                    "{:<5} {:<20} {:<24} {:<18} {:<10} {:<8} {:<20}",
                    row.interview.id,
                    row.applicant_name,
                    row.job_title,
                    row.interview.scheduled_at.format("%Y-%m-%d %H:%M"),
                    row.interview.status,
                    row.interview.mode_of_interview,
                    row.interview.interviewer_name.as_deref().unwrap_or("-")
                );
            }
            return Ok(());
        }
        AdminInterviewsCommand::Schedule {
            application_id,
            when,
        } => (
            application_id,
            WorkflowCommand::ScheduleInterview(when.into()),
        ),
        AdminInterviewsCommand::Reschedule {
            application_id,
            interview_id,
            when,
        } => (
            application_id,
            WorkflowCommand::RescheduleInterview {
                interview_id,
                form: when.into(),
            },
        ),
        AdminInterviewsCommand::Result {
            application_id,
            result,
            interview_id,
        } => (
            application_id,
            WorkflowCommand::RecordResult {
                interview_id,
                result,
            },
        ),
    };

    run_workflow(ctx, id, workflow_command).await
}

async fn run_workflow(ctx: &AppContext, application_id: i64, command: WorkflowCommand) -> Outcome {
    ctx.require(Route::AdminApplicationDetail(application_id))?;

    let workflow = ApplicationWorkflow::new(&ctx.client);
    let (mut detail, load_notice) = workflow.load(application_id).await?;
    if let Some(notice) = load_notice {
        app_log!(info, "{}", notice);
    }

    let notice = workflow.apply(&mut detail, command).await?;
    app_log!(info, "{}", notice);
    print_detail(&detail);
    Ok(())
}

fn print_detail(detail: &ApplicationDetail) {
    let application = &detail.application;
    app_log!(info, "Application #{} for {}", application.id, detail.job.title);
    app_log!(
        info,
        "   Applicant: {} <{}>",
        application.applicant_name,
        application.applicant_email
    );
    app_log!(info, "   Phone:     {}", application.applicant_phone);
    app_log!(info, "   Resume:    {}", application.resume_url);
    app_log!(info, "   Status:    {}", application.status.label());
    app_log!(info, "   Submitted: {}", application.submitted_at.format("%Y-%m-%d %H:%M"));

    if detail.interviews.is_empty() {
        app_log!(info, "   No interviews");
    }
    for interview in &detail.interviews {
        app_log!(
            info,
            "   Interview #{}: {} {} {} {}",
            interview.id,
            interview.scheduled_at.format("%Y-%m-%d %H:%M UTC"),
            interview.status,
            interview.mode_of_interview,
            interview
                .interview_result
                .map(|r| r.as_str())
                .unwrap_or("")
        );
    }

    let actions = detail.available_actions();
    if actions.is_empty() {
        app_log!(info, "   No further actions");
    } else {
        let labels: Vec<String> = actions.iter().map(ToString::to_string).collect();
        app_log!(info, "   Actions: {}", labels.join(", "));
    }
}

async fn dashboard(ctx: &AppContext) -> Outcome {
    let jobs = ctx.client.list_jobs().await?;
    let applications = ctx.client.list_applications().await?;
    let interviews = ctx.client.list_interviews().await?;

    let metrics = DashboardMetrics::compute(&jobs, &applications, &interviews);
    app_log!(info, "Total Jobs:           {}", metrics.total_jobs);
    app_log!(info, "Active Jobs:          {}", metrics.active_jobs);
    app_log!(info, "Total Applications:   {}", metrics.total_applications);
    app_log!(info, "Pending Applications: {}", metrics.pending_applications);
    app_log!(info, "Scheduled Interviews: {}", metrics.scheduled_interviews);

    app_log!(info, "");
    app_log!(info, "Recent Applications");
    for row in recent_applications(&applications, RECENT_APPLICATIONS) {
        app_log!(
            info,
            "   {:<20} {:<24} {:<20} {}",
            row.application.applicant_name,
            row.job.title,
            row.application.status.label(),
            row.application.submitted_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        JobBoardCli::command().debug_assert();
    }

    #[test]
    fn test_parse_schedule_command() {
        let cli = JobBoardCli::try_parse_from([
            "job-board",
            "admin",
            "interviews",
            "schedule",
            "6",
            "--date",
            "2025-07-01",
            "--time",
            "10:30",
            "--mode",
            "offline",
        ])
        .unwrap();

        match cli.command {
            Command::Admin {
                command:
                    AdminCommand::Interviews {
                        command: AdminInterviewsCommand::Schedule { application_id, when },
                    },
            } => {
                assert_eq!(application_id, 6);
                let form = InterviewForm::from(when);
                assert_eq!(form.mode, ModeOfInterview::Offline);
                assert_eq!(form.time, "10:30");
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_enum_arguments_accept_loose_spelling() {
        let cli = JobBoardCli::try_parse_from([
            "job-board",
            "admin",
            "applications",
            "list",
            "--status",
            "under-review",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Admin {
                command: AdminCommand::Applications {
                    command: AdminApplicationsCommand::List {
                        status: Some(ApplicationStatus::UnderReview),
                        ..
                    }
                }
            }
        ));

        assert!(JobBoardCli::try_parse_from([
            "job-board", "admin", "interviews", "result", "6", "maybe"
        ])
        .is_err());
    }

    #[test]
    fn test_terms_can_be_withdrawn() {
        let cli = JobBoardCli::try_parse_from([
            "job-board",
            "signup",
            "resume",
            "--agree-terms",
            "false",
        ])
        .unwrap();
        let agree_terms = match cli.command {
            Command::Signup {
                command: SignupCommand::Resume { path, agree_terms },
            } => {
                assert_eq!(path, None);
                agree_terms
            }
            _ => panic!("unexpected command"),
        };
        assert_eq!(agree_terms, Some(false));

        let mut form = SignupForm {
            agree_terms: true,
            ..Default::default()
        };
        apply_resume_step(&mut form, Some(PathBuf::from("cv.pdf")), None).unwrap();
        assert!(form.agree_terms);
        assert_eq!(form.resume, Some(PathBuf::from("cv.pdf")));

        apply_resume_step(&mut form, None, agree_terms).unwrap();
        assert!(!form.agree_terms);
        assert!(apply_resume_step(&mut form, Some(PathBuf::from("cv.txt")), None).is_err());
    }

    #[test]
    fn test_job_args_only_override_given_fields() {
        let mut form = JobForm {
            title: "Librarian".into(),
            campus: "Vizianagaram Campus".into(),
            ..Default::default()
        };
        JobArgs {
            campus: Some("Bhubaneswar Campus".into()),
            status: Some(JobStatus::Closed),
            ..Default::default()
        }
        .apply_to(&mut form);

        assert_eq!(form.title, "Librarian");
        assert_eq!(form.campus, "Bhubaneswar Campus");
        assert_eq!(form.status, JobStatus::Closed);
    }
}
