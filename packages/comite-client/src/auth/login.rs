//! Login by cédula.
//!
//! `Idle -> Validating -> Searching -> {Authenticated | NotFound | RemoteError}`,
//! with `InvalidFormat` when the input never reaches the directory.

use std::sync::Arc;
use tracing::{info, warn};

use crate::directory::MemberDirectory;
use crate::error::{DirectoryError, LoginError};
use crate::format::{mask_cedula, strip_formatting};
use crate::session::{Session, SessionStore};
use crate::validation::{validate_field, Field};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginState {
    #[default]
    Idle,
    Validating,
    Searching,
    Authenticated,
    InvalidFormat,
    NotFound,
    RemoteError(String),
}

impl LoginState {
    /// Whether a login request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, LoginState::Validating | LoginState::Searching)
    }

    /// User-facing message for the failure states.
    pub fn message(&self) -> Option<String> {
        match self {
            LoginState::InvalidFormat => Some(LoginError::InvalidFormat.to_string()),
            LoginState::NotFound => Some(LoginError::NotFound.to_string()),
            LoginState::RemoteError(msg) => Some(LoginError::Remote(msg.clone()).to_string()),
            _ => None,
        }
    }
}

impl From<&LoginError> for LoginState {
    fn from(err: &LoginError) -> Self {
        match err {
            LoginError::InvalidFormat => LoginState::InvalidFormat,
            LoginError::NotFound => LoginState::NotFound,
            LoginError::Remote(msg) => LoginState::RemoteError(msg.clone()),
        }
    }
}

/// Check the typed cédula and return its canonical digits.
pub fn normalize_login_input(input: &str) -> Result<String, LoginError> {
    match validate_field(Field::Cedula, input) {
        Some(_) => Err(LoginError::InvalidFormat),
        None => Ok(strip_formatting(input)),
    }
}

/// Resolve a canonical cédula to a session. Holds no state, so duplicate or
/// concurrent attempts simply repeat the lookup.
pub async fn lookup_session(
    members: &dyn MemberDirectory,
    cedula: &str,
) -> Result<Session, LoginError> {
    match members.get_by_cedula(cedula).await {
        Ok(member) => Ok(Session::from_member(&member)),
        Err(DirectoryError::NotFound) => Err(LoginError::NotFound),
        Err(DirectoryError::Remote(msg)) => Err(LoginError::Remote(msg)),
    }
}

pub struct AuthController {
    members: Arc<dyn MemberDirectory>,
    state: LoginState,
}

impl AuthController {
    pub fn new(members: Arc<dyn MemberDirectory>) -> Self {
        Self {
            members,
            state: LoginState::Idle,
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// Log in with whatever the user typed.
    ///
    /// On success the session is handed to `sessions`, which persists it.
    /// Failures leave `sessions` untouched and are recoverable.
    pub async fn login(
        &mut self,
        input: &str,
        sessions: &mut SessionStore,
    ) -> Result<Session, LoginError> {
        self.state = LoginState::Validating;
        let cedula = match normalize_login_input(input) {
            Ok(cedula) => cedula,
            Err(e) => {
                self.state = LoginState::from(&e);
                return Err(e);
            }
        };

        self.state = LoginState::Searching;
        info!(cedula = %mask_cedula(&cedula), "Looking up member for login");

        let result = lookup_session(self.members.as_ref(), &cedula).await;
        self.state = match &result {
            Ok(_) => LoginState::Authenticated,
            Err(e) => LoginState::from(e),
        };

        let session = match result {
            Ok(session) => session,
            Err(LoginError::NotFound) => {
                info!(cedula = %mask_cedula(&cedula), "Login for unregistered cédula");
                return Err(LoginError::NotFound);
            }
            Err(e) => {
                warn!(error = %e, "Login lookup failed");
                return Err(e);
            }
        };

        if let Err(e) = sessions.sync(session.clone()) {
            // Still logged in for this run, just not remembered
            warn!(error = %e, "Failed to persist session");
        }
        Ok(session)
    }

    /// Clear the session and return to `Idle`.
    pub fn logout(&mut self, sessions: &mut SessionStore) {
        if let Err(e) = sessions.clear() {
            warn!(error = %e, "Failed to remove persisted session");
        }
        self.state = LoginState::Idle;
    }

    /// Close the error modal/message and go back to the form.
    pub fn dismiss_error(&mut self) {
        if self.state.message().is_some() {
            self.state = LoginState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_login_input() {
        assert_eq!(normalize_login_input("001-0000001-0").unwrap(), "00100000010");
        assert_eq!(normalize_login_input(" 00112345678 ").unwrap(), "00112345678");
        assert_eq!(normalize_login_input(""), Err(LoginError::InvalidFormat));
        assert_eq!(normalize_login_input("001-000"), Err(LoginError::InvalidFormat));
    }

    #[test]
    fn test_state_messages() {
        assert_eq!(LoginState::Idle.message(), None);
        assert_eq!(LoginState::Authenticated.message(), None);
        assert!(LoginState::NotFound.message().unwrap().contains("regístrese"));
        assert!(LoginState::Searching.is_busy());
    }
}
