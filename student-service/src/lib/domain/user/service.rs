use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;
use chrono::Duration;

use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::RegisteredUser;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::CredentialStore;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
///
/// Holds no per-request state. Password hashing runs on the blocking pool so
/// that Argon2 never stalls the async workers.
pub struct UserService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
}

impl<CS> UserService<CS>
where
    CS: CredentialStore,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hasher and token signer
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>, token_ttl: Duration) -> Self {
        Self {
            store,
            authenticator,
            token_ttl,
        }
    }
}

#[async_trait]
impl<CS> UserServicePort for UserService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<RegisteredUser, UserError> {
        if command.password.is_empty() {
            return Err(UserError::EmptyPassword);
        }

        if self
            .store
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        // The store re-checks uniqueness atomically; a concurrent registration
        // that slipped past the lookup above fails here.
        let user = self
            .store
            .save(NewUser {
                username: command.username,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user.into())
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, UserError> {
        let record = match Username::new(command.username) {
            Ok(username) => self.store.find_by_username(&username).await?,
            Err(_) => None,
        };

        let known_user = record.is_some();
        let (subject, stored_hash) = match record {
            Some(user) => (user.username.to_string(), Some(user.password_hash)),
            None => (String::new(), None),
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let token_ttl = self.token_ttl;
        let outcome = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, stored_hash.as_deref(), &subject, token_ttl)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Authentication task failed: {}", e)))?;

        match outcome {
            Ok(result) => Ok(IssuedToken {
                token: result.access_token,
                expires_at: result.expires_at,
            }),
            Err(AuthenticationError::InvalidCredentials) => {
                let reason = if known_user {
                    "wrong_password"
                } else {
                    "unknown_user"
                };
                tracing::warn!(reason, "Login rejected");
                Err(UserError::AuthenticationFailed)
            }
            Err(AuthenticationError::JwtError(e)) => Err(UserError::Token(e)),
        }
    }

    async fn authenticate(&self, token: &str) -> Result<Username, UserError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            match &e {
                JwtError::Expired => tracing::warn!(reason = "expired", "Token rejected"),
                JwtError::InvalidSignature(detail) => {
                    tracing::warn!(reason = "invalid_signature", detail = %detail, "Token rejected")
                }
                JwtError::MissingClaim(claim) => {
                    tracing::warn!(reason = "missing_claim", claim = %claim, "Token rejected")
                }
                JwtError::EncodingFailed(_) => tracing::error!(error = %e, "Token rejected"),
            }
            UserError::Unauthenticated
        })?;

        Username::new(claims.sub).map_err(|e| {
            tracing::warn!(reason = "invalid_subject", error = %e, "Token rejected");
            UserError::Unauthenticated
        })
    }
}
