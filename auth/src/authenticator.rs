use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Password placeholder used to build the dummy hash.
const DUMMY_PASSWORD: &str = "authenticator-dummy-password";

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the process-wide signing keys and the configured password hasher.
/// Both are read-only after construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    dummy_hash: String,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Moment the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    /// Unknown subject, wrong password, or unusable stored hash.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// Hashes a throwaway password once with `password_hasher`, so that
    /// rejecting an unknown subject later costs one full verification.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `password_hasher` - Hasher carrying the configured work factor
    ///
    /// # Errors
    /// * `PasswordError` - Dummy hash could not be produced
    pub fn new(jwt_secret: &[u8], password_hasher: PasswordHasher) -> Result<Self, PasswordError> {
        let dummy_hash = password_hasher.hash(DUMMY_PASSWORD)?;

        Ok(Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
            dummy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// `stored_hash` is `None` when no account exists for the subject. In that
    /// case the password is still verified against the dummy hash and the
    /// outcome is the same `InvalidCredentials` a wrong password produces. A
    /// corrupt stored hash is logged and reported the same way.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No account, wrong password, or corrupt hash
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        subject: &str,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.verify_or_reject(password, hash),
            None => {
                // Same work as a real check, result discarded.
                let _ = self.password_hasher.verify(password, &self.dummy_hash);
                false
            }
        };

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject, ttl)?)
    }

    /// Issue a token for `subject` without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        subject: &str,
        ttl: Duration,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = Claims::for_subject(subject, ttl);
        let access_token = self.jwt_handler.encode(&claims)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or_else(|| {
            JwtError::EncodingFailed(format!("Expiry out of range: {}", claims.exp))
        })?;

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `JwtError` - Token is forged, expired, or malformed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    fn verify_or_reject(&self, password: &str, hash: &str) -> bool {
        match self.password_hasher.verify(password, hash) {
            Ok(is_valid) => is_valid,
            Err(e) => {
                tracing::error!(error = %e, "Stored password hash could not be verified");
                let _ = self.password_hasher.verify(password, &self.dummy_hash);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        let hasher = PasswordHasher::with_params(1024, 1, 1).expect("Failed to build hasher");
        Authenticator::new(SECRET, hasher).expect("Failed to build authenticator")
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("12345")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("12345", Some(&hash), "tarun", Duration::hours(1))
            .expect("Authentication failed");
        assert!(!result.access_token.is_empty());
        assert!(result.expires_at > Utc::now());

        let claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.sub, "tarun");
        assert_eq!(claims.exp, result.expires_at.timestamp());
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("12345")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong", Some(&hash), "tarun", Duration::hours(1));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_unknown_subject() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("12345", None, "ghost", Duration::hours(1));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_dummy_password_does_not_unlock_unknown_subject() {
        let authenticator = authenticator();

        let result =
            authenticator.authenticate(DUMMY_PASSWORD, None, "ghost", Duration::hours(1));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_corrupt_hash() {
        let authenticator = authenticator();

        let result = authenticator.authenticate(
            "12345",
            Some("not-a-phc-string"),
            "tarun",
            Duration::hours(1),
        );
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_expired_token() {
        let authenticator = authenticator();

        let result = authenticator
            .issue_token("tarun", Duration::seconds(-120))
            .expect("Failed to issue token");

        let validation = authenticator.validate_token(&result.access_token);
        assert_eq!(validation, Err(JwtError::Expired));
    }

    #[test]
    fn test_validate_token_from_other_key() {
        let authenticator = authenticator();
        let other = Authenticator::new(
            b"another_secret_key_at_least_32_bytes",
            PasswordHasher::with_params(1024, 1, 1).expect("Failed to build hasher"),
        )
        .expect("Failed to build authenticator");

        let result = other
            .issue_token("tarun", Duration::hours(1))
            .expect("Failed to issue token");

        let validation = authenticator.validate_token(&result.access_token);
        assert!(matches!(validation, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
