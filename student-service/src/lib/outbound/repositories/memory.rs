use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::UserError;

/// Process-local credential store.
///
/// Records live for the lifetime of the process. Ids start at 1.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Records>,
}

#[derive(Debug, Default)]
struct Records {
    by_username: HashMap<String, User>,
    last_id: i64,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_username.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn save(&self, user: NewUser) -> Result<User, UserError> {
        // Check and insert under one write guard.
        let mut records = self.inner.write().await;

        if records.by_username.contains_key(user.username.as_str()) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        records.last_id += 1;
        let stored = User {
            id: UserId(records.last_id),
            username: user.username,
            password_hash: user.password_hash,
        };
        records
            .by_username
            .insert(stored.username.as_str().to_string(), stored.clone());

        Ok(stored)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .inner
            .read()
            .await
            .by_username
            .get(username.as_str())
            .cloned())
    }
}
