// src/session.rs
//! Logged-in identity and bearer token, with opt-in durable copy

use crate::app_log;
use crate::core::store::SharedStore;
use crate::error::ClientResult;
use crate::types::models::{Role, User};

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

pub struct Session {
    store: SharedStore,
    user: Option<User>,
    token: Option<String>,
}

impl Session {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            user: None,
            token: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(User::role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// Replace the identity; with `remember_me` it is also written to the store
    pub async fn set_user(
        &mut self,
        user: User,
        token: String,
        remember_me: bool,
    ) -> ClientResult<()> {
        if remember_me {
            let serialized = serde_json::to_string(&user)
                .map_err(|err| anyhow::anyhow!("Failed to serialize user: {}", err))?;
            self.store.set(USER_KEY, &serialized).await?;
            self.store.set(TOKEN_KEY, &token).await?;
            app_log!(debug, "Session for {} persisted", user.email);
        }

        self.user = Some(user);
        self.token = Some(token);
        Ok(())
    }

    /// Forget the identity in memory and in the store
    pub async fn clear_user(&mut self) -> ClientResult<()> {
        self.user = None;
        self.token = None;
        self.store.remove(USER_KEY).await?;
        self.store.remove(TOKEN_KEY).await?;
        Ok(())
    }

    /// Hydrate from the store. Returns whether an identity was found.
    pub async fn load_user_from_storage(&mut self) -> ClientResult<bool> {
        let stored_user = self.store.get(USER_KEY).await?;
        let stored_token = self.store.get(TOKEN_KEY).await?;

        let (Some(raw_user), Some(token)) = (stored_user, stored_token) else {
            return Ok(false);
        };

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => {
                self.user = Some(user);
                self.token = Some(token);
                Ok(true)
            }
            Err(err) => {
                app_log!(warn, "Ignoring unreadable stored user: {}", err);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use std::sync::Arc;

    fn applicant() -> User {
        User {
            id: 42,
            name: "Amit Kumar".into(),
            email: "amit.kumar@example.com".into(),
            phone_number: "+91 9876543212".into(),
            role: "USER".into(),
            experience: "2 years".into(),
            resume_url: None,
            campus: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_without_remember_me_store_is_untouched() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut session = Session::new(store.clone());

        session
            .set_user(applicant(), "tok-1".into(), false)
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.user().map(|u| u.id), Some(42));
        assert_eq!(session.token(), Some("tok-1"));
        assert_eq!(store.get(USER_KEY).await.unwrap(), None);
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remembered_session_is_restored() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut session = Session::new(store.clone());
        session
            .set_user(applicant(), "tok-2".into(), true)
            .await
            .unwrap();

        let mut restored = Session::new(store);
        assert!(restored.load_user_from_storage().await.unwrap());
        assert_eq!(restored.user(), Some(&applicant()));
        assert_eq!(restored.token(), Some("tok-2"));
        assert_eq!(restored.role(), Some(Role::Applicant));
    }

    #[tokio::test]
    async fn test_clear_user_removes_every_trace() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut session = Session::new(store.clone());
        session
            .set_user(applicant(), "tok-3".into(), true)
            .await
            .unwrap();

        session.clear_user().await.unwrap();
        assert!(!session.is_authenticated());

        assert!(!session.load_user_from_storage().await.unwrap());
        assert!(session.user().is_none());
        assert!(session.token().is_none());
        assert_eq!(store.get(USER_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_token_without_user_is_not_a_session() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "orphan").await.unwrap();

        let mut session = Session::new(store);
        assert!(!session.load_user_from_storage().await.unwrap());
        assert!(!session.is_authenticated());
    }
}
