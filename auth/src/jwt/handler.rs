use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Uses HS256 (HMAC with SHA-256). Keys are derived once from the signing
/// secret and never change for the lifetime of the handler, so a shared
/// reference can be used from any number of tasks.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// The secret should be at least 256 bits (32 bytes) for HS256.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a token after checking its signature and expiry.
    ///
    /// The signature is checked before any claim, so a tampered token whose
    /// `exp` has also passed reports `InvalidSignature`.
    ///
    /// # Errors
    /// * `InvalidSignature` - Token is forged, tampered with, or malformed
    /// * `Expired` - Signature is valid but `exp` has passed
    /// * `MissingClaim` - `exp` or `sub` is absent and `T` tolerates that
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                _ => JwtError::InvalidSignature(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;
    use serde::Deserialize;

    use super::*;
    use crate::jwt::Claims;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::for_subject("tarun", Duration::hours(1));

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: Claims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_garbage_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode::<Claims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let claims = Claims::for_subject("tarun", Duration::hours(1));
        let token = handler1.encode(&claims).expect("Failed to encode token");

        let result = handler2.decode::<Claims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_decode_flipped_signature_bit() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::for_subject("tarun", Duration::hours(1));
        let token = handler.encode(&claims).expect("Failed to encode token");

        // Flip a bit in the first character of the signature segment.
        let signature_start = token.rfind('.').expect("Token has no signature") + 1;
        let mut bytes = token.into_bytes();
        bytes[signature_start] = match bytes[signature_start] {
            b'A' => b'B',
            b'B' => b'A',
            other => other ^ 0x01,
        };
        let tampered = String::from_utf8(bytes).expect("Token is not utf-8");

        let result = handler.decode::<Claims>(&tampered);
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_decode_tampered_payload() {
        let handler = JwtHandler::new(SECRET);
        let original = handler
            .encode(&Claims::for_subject("tarun", Duration::hours(1)))
            .expect("Failed to encode token");
        let forged = handler
            .encode(&Claims::for_subject("admin", Duration::hours(1)))
            .expect("Failed to encode token");

        // Splice the forged payload onto the original signature.
        let original_parts: Vec<&str> = original.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!(
            "{}.{}.{}",
            original_parts[0], forged_parts[1], original_parts[2]
        );

        let result = handler.decode::<Claims>(&spliced);
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::for_subject("tarun", Duration::hours(-1));

        let token = handler.encode(&claims).expect("Failed to encode token");

        let result = handler.decode::<Claims>(&token);
        assert_eq!(result, Err(JwtError::Expired));
    }

    #[test]
    fn test_decode_missing_subject() {
        #[derive(Serialize, Deserialize)]
        struct NoSubject {
            exp: i64,
        }

        let handler = JwtHandler::new(SECRET);
        let token = handler
            .encode(&NoSubject {
                exp: Utc::now().timestamp() + 3600,
            })
            .expect("Failed to encode token");

        let result = handler.decode::<serde_json::Value>(&token);
        assert_eq!(result, Err(JwtError::MissingClaim("sub".to_string())));
    }
}
