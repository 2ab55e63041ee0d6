use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by an access token.
///
/// `sub` is the authenticated username. `exp` and `iat` are Unix timestamps
/// in seconds. `jti` makes every issued token unique, even two issued for the
/// same subject within the same second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Expiration time
    pub exp: i64,

    /// Issued at
    pub iat: i64,

    /// JWT ID
    pub jti: String,
}

impl Claims {
    /// Create claims for a subject, expiring `ttl` from now.
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}
