use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session lifetime. Tokens expire one hour after issuance; there is no
/// refresh or revocation.
const TOKEN_TTL_SECS: i64 = 60 * 60;

/// The claims encoded within a session token.
///
/// Identity only: the current role is re-read from the store on every request,
/// so a role change never has to wait out a token's lifetime.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's email.
    pub sub: String,
    /// The user's id.
    pub uid: i32,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Signs and verifies session tokens with a process-wide symmetric key.
///
/// Constructed once at startup from configuration and passed explicitly (app
/// data) to everything that needs it; nothing in the crate reads the signing
/// key from the environment after that point. HS256, no key rotation.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Issues a signed token for the given identity, expiring in one hour.
    pub fn issue(&self, email: &str, user_id: i32) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: email.to_string(),
            uid: user_id,
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("failed to issue token: {}", e)))
    }

    /// Verifies a token and decodes its claims.
    ///
    /// Fails with `AppError::Unauthorized` when the signature does not verify,
    /// the structure is malformed, or the token has expired. `sub` and `uid`
    /// round-trip exactly as issued.
    pub fn parse(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {}", e)))
    }
}
