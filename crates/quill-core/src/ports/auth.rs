//! Admin session ports.

/// Claims carried by an admin session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub subject: String,
    pub issued_at: i64,
    pub exp: i64,
}

/// Issues and validates the tokens handed out after the admin gate.
pub trait TokenService: Send + Sync {
    /// Issue a session token for the admin.
    fn issue_token(&self) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Session lifetime in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
