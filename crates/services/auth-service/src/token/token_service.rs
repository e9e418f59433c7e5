//! Signed, time-limited bearer tokens.
//!
//! Tokens are HS256 JWTs carrying `sub`, `iat` and `exp`. Nothing is stored
//! server-side: a token is accepted purely on signature and expiry.
//!
//! Verification never fails loudly. Malformed, tampered or foreign tokens
//! come back as [`TokenVerification::Invalid`], `None` or `false`.

use std::sync::Arc;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use common::{AppError, AppResult, JwtConfig};
use domain::{
    DomainError, DomainResult, GENERATED_SECRET_LENGTH, MIN_JWT_SECRET_LENGTH, SECONDS_PER_HOUR,
    TOKEN_TYPE_BEARER,
};

use super::clock::{Clock, SystemClock};

/// Claims embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Collaborator code
    pub sub: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiration, seconds since the epoch
    pub exp: i64,
}

/// Outcome of checking a presented token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerification {
    /// Signature verified and not yet expired.
    Valid(TokenClaims),
    /// Signature verified but the expiration has passed.
    Expired(TokenClaims),
    /// Malformed, tampered, or signed with another key.
    Invalid,
}

impl TokenVerification {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenVerification::Valid(_))
    }

    /// Claims of a signature-verified token, expired or not.
    pub fn claims(&self) -> Option<&TokenClaims> {
        match self {
            TokenVerification::Valid(claims) | TokenVerification::Expired(claims) => Some(claims),
            TokenVerification::Invalid => None,
        }
    }
}

/// Token returned to a client after registration or login.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Validity window in seconds
    pub expires_in: i64,
}

/// Symmetric HS256 key, held in memory for the life of the process.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}

impl SigningKey {
    /// Key from a configured secret.
    ///
    /// # Errors
    /// Rejects secrets shorter than [`MIN_JWT_SECRET_LENGTH`] bytes.
    pub fn from_secret(secret: &str) -> DomainResult<Self> {
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(DomainError::validation(format!(
                "JWT secret must be at least {} characters",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        Ok(Self::from_bytes(secret.as_bytes()))
    }

    /// Fresh random key. Tokens signed with it die with the process.
    pub fn generate() -> Self {
        let mut bytes = [0u8; GENERATED_SECRET_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self::from_bytes(&bytes)
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }
}

/// Issues and checks bearer tokens.
pub struct TokenService {
    key: SigningKey,
    validity: Duration,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(key: SigningKey, validity: Duration, clock: Arc<dyn Clock>) -> Self {
        // Expiry is compared against `clock`, not the system time jsonwebtoken uses.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key,
            validity,
            validation,
            clock,
        }
    }

    /// Build from configuration, generating a key when none is configured.
    pub fn from_config(config: &JwtConfig) -> AppResult<Self> {
        let key = match config.secret.as_deref() {
            Some(secret) => SigningKey::from_secret(secret)?,
            None => {
                warn!("JWT_SECRET not set; using a generated signing key. Issued tokens will not survive a restart");
                SigningKey::generate()
            }
        };

        let validity = Duration::try_hours(config.expiration_hours)
            .filter(|window| Utc::now().checked_add_signed(*window).is_some())
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "JWT expiration of {} hours is out of range",
                    config.expiration_hours
                ))
            })?;

        Ok(Self::new(key, validity, Arc::new(SystemClock)))
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Sign a token for `subject`, valid from now for the configured window.
    pub fn issue(&self, subject: &str) -> AppResult<IssuedToken> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(self.validity)
            .ok_or_else(|| AppError::internal("Token expiration overflows the calendar"))?;

        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.key.encoding)?;

        Ok(IssuedToken {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.validity.num_seconds(),
        })
    }

    /// Check signature and expiry.
    pub fn verify(&self, token: &str) -> TokenVerification {
        let Some(claims) = self.decode_claims(token) else {
            return TokenVerification::Invalid;
        };

        if self.clock.now().timestamp() < claims.exp {
            TokenVerification::Valid(claims)
        } else {
            debug!(subject = %claims.sub, "Rejected expired token");
            TokenVerification::Expired(claims)
        }
    }

    /// Subject of a correctly signed token. Expired tokens still yield it.
    pub fn extract_subject(&self, token: &str) -> Option<String> {
        self.decode_claims(token).map(|claims| claims.sub)
    }

    /// True iff the token is signed by us, names `expected_subject`, and has
    /// not expired.
    pub fn is_valid(&self, token: &str, expected_subject: &str) -> bool {
        match self.verify(token) {
            TokenVerification::Valid(claims) => claims.sub == expected_subject,
            _ => false,
        }
    }

    fn decode_claims(&self, token: &str) -> Option<TokenClaims> {
        match decode::<TokenClaims>(token, &self.key.decoding, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "Rejected malformed or untrusted token");
                None
            }
        }
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("key", &self.key)
            .field("validity_hours", &(self.validity.num_seconds() / SECONDS_PER_HOUR))
            .finish()
    }
}
