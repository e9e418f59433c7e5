//! Domain-level constants.
//!
//! These constants define authentication rules and token parameters.

// =============================================================================
// Authentication
// =============================================================================

/// Default token validity window in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum length of a configured signing secret (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Size in bytes of a generated signing key
pub const GENERATED_SECRET_LENGTH: usize = 64;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Token type identifier returned to clients
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
