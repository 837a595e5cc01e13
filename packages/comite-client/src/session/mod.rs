//! The authenticated-identity lifecycle.
//!
//! A [`SessionStore`] is constructed once per application load, reads the
//! persisted session before anything is rendered, and is passed by reference
//! to whoever needs it. Its presence is the only gate in front of the main
//! views.

pub mod storage;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use comite_api::Member;

use crate::error::SessionError;
use crate::format::{mask_cedula, strip_formatting, CEDULA_DIGITS};
use storage::SessionStorage;

/// Durable key holding the serialized session.
pub const SESSION_KEY: &str = "loggedUser";

/// Minimal projection of the logged-in member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Canonical 11-digit cédula.
    pub cedula: String,
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comite_id: Option<i64>,
}

impl Session {
    pub fn from_member(member: &Member) -> Self {
        Self {
            cedula: strip_formatting(&member.cedula),
            nombre: member.nombre.clone(),
            comite_id: (member.comite_id != 0).then_some(member.comite_id),
        }
    }
}

pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    current: Option<Session>,
}

impl SessionStore {
    /// Bootstrap from durable storage.
    ///
    /// Corrupt or unreadable data degrades to "no session"; the bad value is
    /// removed so the next start is clean.
    pub fn open(storage: Arc<dyn SessionStorage>) -> Self {
        let current = match Self::load(storage.as_ref()) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Discarding unusable persisted session");
                if let Err(e) = storage.remove(SESSION_KEY) {
                    warn!(error = %e, "Failed to remove unusable persisted session");
                }
                None
            }
        };

        match &current {
            Some(session) => info!(cedula = %mask_cedula(&session.cedula), "Restored session"),
            None => debug!("No persisted session"),
        }

        Self { storage, current }
    }

    fn load(storage: &dyn SessionStorage) -> Result<Option<Session>, SessionError> {
        let Some(raw) = storage.read(SESSION_KEY)? else {
            return Ok(None);
        };
        let session: Session = serde_json::from_str(&raw)?;
        if strip_formatting(&session.cedula).len() != CEDULA_DIGITS {
            // Parsed, but not an identity we can use
            return Err(SessionError::Corrupt(serde::de::Error::custom(format!(
                "cedula must have {} digits",
                CEDULA_DIGITS
            ))));
        }
        Ok(Some(session))
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Adopt the identity from a successful login.
    ///
    /// Only replaces (and persists) the session when the cédula differs from
    /// the current one; returns whether it changed. The in-memory session is
    /// updated even if persisting fails. An unchanged session whose earlier
    /// write never landed is written again.
    pub fn sync(&mut self, session: Session) -> Result<bool, SessionError> {
        if let Some(current) = self
            .current
            .as_ref()
            .filter(|current| current.cedula == session.cedula)
        {
            if self.storage.read(SESSION_KEY)?.is_some() {
                debug!("Session identity unchanged, skipping refresh");
                return Ok(false);
            }
            warn!("Session was not persisted, writing it again");
            self.storage
                .write(SESSION_KEY, &serde_json::to_string(current)?)?;
            return Ok(false);
        }

        let raw = serde_json::to_string(&session)?;
        info!(cedula = %mask_cedula(&session.cedula), "Session started");
        self.current = Some(session);
        self.storage.write(SESSION_KEY, &raw)?;
        Ok(true)
    }

    /// Drop the session from memory and durable storage.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        if let Some(session) = self.current.take() {
            info!(cedula = %mask_cedula(&session.cedula), "Session cleared");
        }
        self.storage.remove(SESSION_KEY)?;
        Ok(())
    }
}
