//! Bearer token issuance and verification.

mod clock;
mod token_service;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-utils"))]
pub use clock::ManualClock;
pub use token_service::{IssuedToken, SigningKey, TokenClaims, TokenService, TokenVerification};
