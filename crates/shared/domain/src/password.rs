//! Password value object - one-way hashing and verification of collaborator passwords.
//!
//! Argon2id with the crate's default cost parameters. Every hash carries its
//! own random salt in PHC string format, so verification needs nothing but
//! the stored string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// Hashed password as stored on a collaborator record.
///
/// Never holds plaintext. Compared by hash value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password.
    ///
    /// # Errors
    /// Returns a password error if the input is blank, or an internal error
    /// if the hasher itself fails.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        if plain_text.trim().is_empty() {
            return Err(DomainError::password("Password must not be empty"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap an existing hash (from the store).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plaintext password against this hash.
    ///
    /// A stored value that is not a parseable hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Self::argon2()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

/// Hash `plain_text`, returning the PHC string to persist.
pub fn hash_password(plain_text: &str) -> DomainResult<String> {
    Password::new(plain_text).map(Password::into_string)
}

/// Check `plain_text` against a stored PHC hash string.
pub fn verify_password(plain_text: &str, hash: &str) -> bool {
    Password::from_hash(hash).verify(plain_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "Secret1";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("Secret2"));
    }

    #[test]
    fn test_hash_never_equals_plaintext() {
        let hash = hash_password("Secret1").unwrap();

        assert!(!hash.is_empty());
        assert_ne!(hash, "Secret1");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = hash_password(plain).unwrap();

        assert!(verify_password(plain, &hash));
        assert!(Password::from_hash(hash).verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        assert_ne!(pass1, pass2);
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_cross_verification_fails() {
        let hash = hash_password("first-password").unwrap();
        assert!(!verify_password("second-password", &hash));
    }

    #[test]
    fn test_blank_password_rejected() {
        assert!(matches!(Password::new(""), Err(DomainError::Password(_))));
        assert!(matches!(Password::new("   "), Err(DomainError::Password(_))));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("Secret1").unwrap();
        let debug = format!("{:?}", password);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(password.as_str()));
    }
}
