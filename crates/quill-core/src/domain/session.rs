//! Process-wide session state passed explicitly to the views that need it.

use serde::{Deserialize, Serialize};

use crate::ports::AuthError;

/// Shared-secret gate in front of the admin console.
///
/// Not a security boundary: one static secret, no user accounts.
#[derive(Clone)]
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Compare `attempt` with the configured secret.
    pub fn check(&self, attempt: &str) -> Result<(), AuthError> {
        let expected = self.secret.as_bytes();
        let given = attempt.as_bytes();
        // Fold over the full length so timing does not leak the matching prefix.
        let diff = expected
            .iter()
            .zip(given.iter())
            .fold(expected.len() ^ given.len(), |acc, (a, b)| {
                acc | usize::from(a ^ b)
            });
        if diff == 0 && !expected.is_empty() {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}

/// Display theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Persisted preference first, then the system default.
    pub fn resolve(persisted: Option<&str>, system_prefers_dark: bool) -> Self {
        match persisted.map(str::trim) {
            Some("dark") => Theme::Dark,
            Some("light") => Theme::Light,
            _ if system_prefers_dark => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Per-session state.
///
/// The admin flag lives only for the session and is cleared by [`SessionState::logout`];
/// the theme is meant to be persisted by the caller indefinitely.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    admin: bool,
    pub theme: Theme,
}

impl SessionState {
    pub fn new(theme: Theme) -> Self {
        Self { admin: false, theme }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn login(&mut self, gate: &AdminGate, attempt: &str) -> Result<(), AuthError> {
        gate.check(attempt)?;
        self.admin = true;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.admin = false;
    }
}
