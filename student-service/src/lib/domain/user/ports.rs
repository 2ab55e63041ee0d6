use async_trait::async_trait;

use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::RegisteredUser;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for account and authentication operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Returns
    /// The stored account without its password hash
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<RegisteredUser, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown username or wrong password (indistinguishable)
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, UserError>;

    /// Resolve the subject of a bearer token.
    ///
    /// No store lookup is made: the token alone decides.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token is forged, expired, or malformed
    async fn authenticate(&self, token: &str) -> Result<Username, UserError>;
}

/// Persistence operations for credential records.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new credential record.
    ///
    /// The uniqueness check and the insert are a single atomic step.
    ///
    /// # Returns
    /// Stored record with its assigned id
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve a record by username.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
