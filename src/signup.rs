// src/signup.rs
//! Three-step signup wizard with a persisted draft

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::app_log;
use crate::core::api_client::ApiClient;
use crate::draft::DraftStore;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::types::models::{EducationEntry, User};
use crate::types::response::AuthPayload;

pub const SIGNUP_DRAFT_KEY: &str = "signupForm";
pub const SIGNUP_DRAFT_TTL: Duration = Duration::from_secs(60 * 60);

/// Account creation against the backend
#[async_trait]
pub trait AccountBackend: Send + Sync {
    async fn signup(&self, form: &SignupForm) -> ClientResult<AuthPayload>;
}

#[async_trait]
impl AccountBackend for ApiClient {
    async fn signup(&self, form: &SignupForm) -> ClientResult<AuthPayload> {
        ApiClient::signup(self, form).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum SignupStep {
    #[default]
    Personal = 1,
    Education = 2,
    Resume = 3,
}

impl SignupStep {
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Name,
    Timeline,
    Percentage,
    Institute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub resume: Option<PathBuf>,
    #[serde(default)]
    pub agree_terms: bool,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            phone_number: String::new(),
            experience: String::new(),
            education: vec![EducationEntry::default()],
            resume: None,
            agree_terms: false,
        }
    }
}

impl SignupForm {
    pub fn is_personal_info_valid(&self) -> bool {
        [
            &self.name,
            &self.email,
            &self.password,
            &self.phone_number,
            &self.experience,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    pub fn is_education_valid(&self) -> bool {
        !self.education.is_empty() && self.education.iter().all(EducationEntry::is_complete)
    }

    pub fn is_ready_to_submit(&self) -> bool {
        self.resume.is_some() && self.agree_terms
    }
}

/// Draft payload: the form plus where the user left off
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignupWizard {
    #[serde(default)]
    step: SignupStep,
    #[serde(default)]
    form: SignupForm,
}

impl SignupWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SignupStep {
        self.step
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SignupForm {
        &mut self.form
    }

    /// Advance one step if the current step's gate passes
    pub fn next(&mut self) -> ClientResult<SignupStep> {
        self.step = match self.step {
            SignupStep::Personal => {
                if !self.form.is_personal_info_valid() {
                    return Err(ClientError::validation(
                        "Please fill in all personal information fields",
                    ));
                }
                SignupStep::Education
            }
            SignupStep::Education => {
                if !self.form.is_education_valid() {
                    return Err(ClientError::validation(
                        "Please complete every education entry",
                    ));
                }
                SignupStep::Resume
            }
            SignupStep::Resume => {
                return Err(ClientError::validation("Already on the last step"));
            }
        };
        Ok(self.step)
    }

    /// Go back one step; data is kept. No-op on the first step.
    pub fn back(&mut self) -> SignupStep {
        self.step = match self.step {
            SignupStep::Personal | SignupStep::Education => SignupStep::Personal,
            SignupStep::Resume => SignupStep::Education,
        };
        self.step
    }

    pub fn add_education(&mut self) {
        self.form.education.push(EducationEntry::default());
    }

    pub fn update_education(
        &mut self,
        index: usize,
        field: EducationField,
        value: &str,
    ) -> ClientResult<()> {
        let entry = self
            .form
            .education
            .get_mut(index)
            .ok_or_else(|| ClientError::validation(format!("No education entry #{}", index + 1)))?;
        let slot = match field {
            EducationField::Name => &mut entry.education_name,
            EducationField::Timeline => &mut entry.time_line,
            EducationField::Percentage => &mut entry.percentage,
            EducationField::Institute => &mut entry.institute_name,
        };
        *slot = value.to_string();
        Ok(())
    }

    /// The last remaining entry cannot be removed
    pub fn remove_education(&mut self, index: usize) -> ClientResult<()> {
        if self.form.education.len() <= 1 {
            return Err(ClientError::validation("At least one education entry is required"));
        }
        if index >= self.form.education.len() {
            return Err(ClientError::validation(format!("No education entry #{}", index + 1)));
        }
        self.form.education.remove(index);
        Ok(())
    }

    /// Restore an in-progress signup, or start fresh
    pub async fn restore(drafts: &DraftStore) -> ClientResult<Self> {
        let mut wizard = drafts
            .load_draft::<SignupWizard>(SIGNUP_DRAFT_KEY)
            .await?
            .unwrap_or_default();
        if wizard.form.education.is_empty() {
            wizard.form.education.push(EducationEntry::default());
        }
        Ok(wizard)
    }

    pub async fn persist(&self, drafts: &DraftStore) -> ClientResult<()> {
        drafts.save_draft(SIGNUP_DRAFT_KEY, self, SIGNUP_DRAFT_TTL).await
    }

    /// Submit the form. The draft is cleared only once the backend confirms.
    pub async fn submit<B: AccountBackend + ?Sized>(
        &self,
        backend: &B,
        session: &mut Session,
        drafts: &DraftStore,
    ) -> ClientResult<User> {
        if self.step != SignupStep::Resume {
            return Err(ClientError::validation("Complete the previous steps first"));
        }
        // earlier steps stay editable after their gate passed
        if !self.form.is_personal_info_valid() {
            return Err(ClientError::validation(
                "Please fill in all personal information fields",
            ));
        }
        if !self.form.is_education_valid() {
            return Err(ClientError::validation("Please complete every education entry"));
        }
        if self.form.resume.is_none() {
            return Err(ClientError::validation("Please select a resume file"));
        }
        if !self.form.agree_terms {
            return Err(ClientError::validation("Please accept the terms and conditions"));
        }

        let payload = backend.signup(&self.form).await.map_err(|err| {
            app_log!(warn, "Signup failed for {}: {}", self.form.email, err);
            err
        })?;

        let user = payload.user.clone();
        session.set_user(payload.user, payload.token, true).await?;
        drafts.discard(SIGNUP_DRAFT_KEY).await?;

        app_log!(info, "Signed up {}", user.email);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{MemoryStore, SharedStore};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeAccounts {
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeAccounts {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AccountBackend for FakeAccounts {
        async fn signup(&self, form: &SignupForm) -> ClientResult<AuthPayload> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ClientError::Server {
                    status: 409,
                    message: "Email already registered".into(),
                });
            }
            Ok(AuthPayload {
                user: User {
                    id: 77,
                    name: form.name.clone(),
                    email: form.email.clone(),
                    phone_number: form.phone_number.clone(),
                    role: "USER".into(),
                    experience: form.experience.clone(),
                    resume_url: Some("https://example.com/resumes/77.pdf".into()),
                    campus: None,
                    created_at: None,
                    updated_at: None,
                },
                token: "signup-token".into(),
            })
        }
    }

    fn filled_personal(wizard: &mut SignupWizard) {
        let form = wizard.form_mut();
        form.name = "Sneha Gupta".into();
        form.email = "sneha.gupta@example.com".into();
        form.password = "secret".into();
        form.phone_number = "+91 9876543213".into();
        form.experience = "3 years".into();
    }

    fn filled_education(wizard: &mut SignupWizard, index: usize) {
        wizard.update_education(index, EducationField::Name, "M.Sc").unwrap();
        wizard.update_education(index, EducationField::Timeline, "2018-2020").unwrap();
        wizard.update_education(index, EducationField::Percentage, "88").unwrap();
        wizard.update_education(index, EducationField::Institute, "CUTM").unwrap();
    }

    fn ready_wizard() -> SignupWizard {
        let mut wizard = SignupWizard::new();
        filled_personal(&mut wizard);
        wizard.next().unwrap();
        filled_education(&mut wizard, 0);
        wizard.next().unwrap();
        wizard.form_mut().resume = Some(PathBuf::from("resume.pdf"));
        wizard.form_mut().agree_terms = true;
        wizard
    }

    #[test]
    fn test_personal_gate_rejects_blank_fields() {
        let mut wizard = SignupWizard::new();
        filled_personal(&mut wizard);
        wizard.form_mut().experience = "   ".into();

        assert!(wizard.next().is_err());
        assert_eq!(wizard.step(), SignupStep::Personal);

        wizard.form_mut().experience = "1 year".into();
        assert_eq!(wizard.next().unwrap(), SignupStep::Education);
    }

    #[test]
    fn test_education_gate_checks_every_entry() {
        let mut wizard = SignupWizard::new();
        filled_personal(&mut wizard);
        wizard.next().unwrap();

        filled_education(&mut wizard, 0);
        wizard.add_education();
        assert!(wizard.next().is_err());

        filled_education(&mut wizard, 1);
        assert_eq!(wizard.next().unwrap(), SignupStep::Resume);
    }

    #[test]
    fn test_back_keeps_data_and_never_skips() {
        let mut wizard = ready_wizard();
        assert_eq!(wizard.back(), SignupStep::Education);
        assert_eq!(wizard.back(), SignupStep::Personal);
        assert_eq!(wizard.back(), SignupStep::Personal);

        assert_eq!(wizard.form().name, "Sneha Gupta");
        assert_eq!(wizard.next().unwrap(), SignupStep::Education);
        assert_eq!(wizard.next().unwrap(), SignupStep::Resume);
        assert!(wizard.next().is_err());
    }

    #[test]
    fn test_last_education_entry_cannot_be_removed() {
        let mut wizard = SignupWizard::new();
        assert!(wizard.remove_education(0).is_err());
        wizard.add_education();
        assert!(wizard.remove_education(5).is_err());
        wizard.remove_education(0).unwrap();
        assert_eq!(wizard.form().education.len(), 1);
    }

    #[tokio::test]
    async fn test_draft_restores_step_and_form() {
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));
        let mut wizard = SignupWizard::new();
        filled_personal(&mut wizard);
        wizard.next().unwrap();
        wizard.persist(&drafts).await.unwrap();

        let restored = SignupWizard::restore(&drafts).await.unwrap();
        assert_eq!(restored, wizard);
        assert_eq!(restored.step(), SignupStep::Education);
    }

    #[tokio::test]
    async fn test_submit_requires_resume_and_terms() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let drafts = DraftStore::new(store.clone());
        let mut session = Session::new(store);
        let backend = FakeAccounts::new(false);

        let mut wizard = ready_wizard();
        wizard.form_mut().agree_terms = false;
        assert!(wizard.submit(&backend, &mut session, &drafts).await.is_err());

        wizard.form_mut().agree_terms = true;
        wizard.form_mut().resume = None;
        assert!(wizard.submit(&backend, &mut session, &drafts).await.is_err());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_rechecks_earlier_steps() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let drafts = DraftStore::new(store.clone());
        let mut session = Session::new(store);
        let backend = FakeAccounts::new(false);

        let mut wizard = ready_wizard();
        wizard.form_mut().name = String::new();
        wizard.form_mut().email = "  ".into();
        let err = wizard
            .submit(&backend, &mut session, &drafts)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all personal information fields");

        filled_personal(&mut wizard);
        wizard
            .update_education(0, EducationField::Institute, " ")
            .unwrap();
        let err = wizard
            .submit(&backend, &mut session, &drafts)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please complete every education entry");

        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_successful_submit_sets_session_and_clears_draft() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let drafts = DraftStore::new(store.clone());
        let mut session = Session::new(store.clone());

        let wizard = ready_wizard();
        wizard.persist(&drafts).await.unwrap();

        let user = wizard
            .submit(&FakeAccounts::new(false), &mut session, &drafts)
            .await
            .unwrap();

        assert_eq!(user.id, 77);
        assert_eq!(session.token(), Some("signup-token"));
        assert_eq!(store.get(SIGNUP_DRAFT_KEY).await.unwrap(), None);
        assert!(store.get(crate::session::USER_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let drafts = DraftStore::new(store.clone());
        let mut session = Session::new(store.clone());

        let wizard = ready_wizard();
        wizard.persist(&drafts).await.unwrap();

        let err = wizard
            .submit(&FakeAccounts::new(true), &mut session, &drafts)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email already registered");
        assert!(!session.is_authenticated());
        assert!(store.get(SIGNUP_DRAFT_KEY).await.unwrap().is_some());
    }
}
