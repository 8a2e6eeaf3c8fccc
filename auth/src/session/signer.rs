use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::SessionError;

/// Session token signer and verifier.
///
/// Uses HS256 (HMAC with SHA-256). The secret should be at least 32 bytes
/// and come from configuration, never from code.
pub struct SessionSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl SessionSigner {
    /// Create a new signer with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed session token.
    ///
    /// # Arguments
    /// * `claims` - Session claims to encode
    ///
    /// # Returns
    /// Compact token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, SessionError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| SessionError::EncodingFailed(e.to_string()))
    }

    /// Verify a session token and return its claims.
    ///
    /// Signature and expiry are both checked.
    ///
    /// # Arguments
    /// * `token` - Token string to verify
    ///
    /// # Errors
    /// * `TokenExpired` - Token expiry has passed
    /// * `InvalidToken` - Signature is invalid or the token is malformed
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => SessionError::TokenExpired,
                    _ => SessionError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
