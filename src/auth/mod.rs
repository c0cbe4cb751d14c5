use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::SecurityConfig;

/// HS256 needs at least 256 bits of key material.
pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    /// Whole seconds, rounded up so the registered claim never undercuts the TTL.
    pub exp: i64,
    /// Expiry in epoch milliseconds; this is what validation checks.
    pub exp_ms: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(subject: impl Into<String>, extra: Map<String, Value>, now: DateTime<Utc>, ttl: Duration) -> Self {
        // Registered claims win over extras with the same name.
        let mut extra = extra;
        for reserved in ["sub", "iat", "exp", "exp_ms"] {
            extra.remove(reserved);
        }

        let exp_ms = (now + ttl).timestamp_millis();
        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: exp_ms.div_euclid(1000) + i64::from(exp_ms.rem_euclid(1000) != 0),
            exp_ms,
            extra,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.exp_ms)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(exp) => now >= exp,
            None => true,
        }
    }
}

/// The authenticated caller of a request. Tokens carry no roles, so
/// `authorities` is empty for every principal built from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub credentials: String,
    pub authorities: Vec<String>,
}

impl Principal {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            credentials: String::new(),
            authorities: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT secret must be at least {MIN_SECRET_BYTES} bytes")]
    WeakSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("JWT token expired")]
    Expired,
}

/// Issues and verifies the bearer tokens accepted by this service.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl_ms: u64) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(JwtError::WeakSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::milliseconds(ttl_ms.min(i64::MAX as u64) as i64),
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, JwtError> {
        Self::new(&security.jwt_secret, security.jwt_expiration_ms)
    }

    pub fn issue(&self, subject: &str, extra_claims: Map<String, Value>) -> Result<String, JwtError> {
        self.issue_at(subject, extra_claims, Utc::now())
    }

    fn issue_at(&self, subject: &str, extra_claims: Map<String, Value>, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::new(subject, extra_claims, now, self.ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Signature, structure and expiry check. Never fails loudly.
    pub fn validate(&self, token: &str) -> bool {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        match self.extract_claims(token) {
            Ok(claims) => !claims.is_expired_at(now),
            Err(e) => {
                tracing::debug!("Rejected token: {}", e);
                false
            }
        }
    }

    /// Subject of a correctly signed token. Callers are expected to `validate` first.
    pub fn extract_subject(&self, token: &str) -> Result<String, JwtError> {
        Ok(self.extract_claims(token)?.sub)
    }

    /// Decodes and verifies the signature. Expiry is left to `validate` so it
    /// can be checked with sub-second precision.
    pub fn extract_claims(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }

    /// Like `extract_claims`, but also rejects expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.extract_claims(token)?;
        if claims.is_expired_at(Utc::now()) {
            return Err(JwtError::Expired);
        }
        Ok(claims)
    }
}
