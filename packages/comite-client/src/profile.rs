//! Personal dashboard: view and edit the logged-in member's profile.
//!
//! Edits happen on a staged copy of the last known-good record. Cancel throws
//! the copy away; only a successful save replaces the committed record.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use comite_api::Member;

use crate::directory::MemberDirectory;
use crate::error::{DirectoryError, SubmitError};
use crate::form::{formatted_for_display, normalized_for_submit, Draft, FieldChange};
use crate::format::mask_cedula;
use crate::notification::Notification;
use crate::validation::{validate_field, Field, FieldErrors};

/// Fields a member may change on their own profile.
pub const EDITABLE_FIELDS: [Field; 5] = [
    Field::Cedula,
    Field::Email,
    Field::Telefono,
    Field::Direccion,
    Field::Sector,
];

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileState {
    Loading,
    Loaded(Member),
    Failed(String),
}

/// Display label for a role id.
pub fn role_label(rol_id: i64) -> &'static str {
    if rol_id == 1 {
        "Miembro"
    } else {
        "Administrador"
    }
}

/// Initials shown in the avatar bubble.
pub fn initials(member: &Member) -> String {
    member
        .nombre
        .chars()
        .next()
        .into_iter()
        .chain(member.apellido.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Validate only what the member can change here; legacy records may lack
/// fields (such as apellido) that the profile form cannot fix.
fn validate_editable(member: &Member) -> FieldErrors {
    EDITABLE_FIELDS
        .into_iter()
        .filter_map(|field| validate_field(field, &field.value_of(member)).map(|msg| (field, msg)))
        .collect()
}

pub struct ProfileEditor {
    members: Arc<dyn MemberDirectory>,
    state: ProfileState,
    draft: Option<Draft>,
    notification: Notification,
}

impl ProfileEditor {
    pub fn new(members: Arc<dyn MemberDirectory>, dismiss_after: Duration) -> Self {
        Self {
            members,
            state: ProfileState::Loading,
            draft: None,
            notification: Notification::new(dismiss_after),
        }
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    /// The committed record, if loaded.
    pub fn member(&self) -> Option<&Member> {
        match &self.state {
            ProfileState::Loaded(member) => Some(member),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    /// Fetch the member for the session's cédula.
    pub async fn load(&mut self, cedula: Option<&str>) {
        self.state = ProfileState::Loading;
        self.draft = None;

        let Some(cedula) = cedula.filter(|c| !c.trim().is_empty()) else {
            warn!("Profile requested without a cédula");
            self.state = ProfileState::Failed("No se proporcionó la cédula del usuario".into());
            return;
        };

        debug!(cedula = %mask_cedula(cedula), "Loading profile");
        self.state = match self.members.get_by_cedula(cedula).await {
            Ok(member) => ProfileState::Loaded(member),
            Err(DirectoryError::NotFound) => {
                ProfileState::Failed("No se pudo obtener la información del usuario".into())
            }
            Err(DirectoryError::Remote(msg)) => {
                warn!(error = %msg, "Failed to load profile");
                ProfileState::Failed("Error de conexión al obtener información del usuario".into())
            }
        };
    }

    /// Stage an editable copy of the committed record.
    pub fn begin_edit(&mut self) {
        if let Some(member) = self.member() {
            self.draft = Some(Draft::from_member(&formatted_for_display(member)));
        }
    }

    /// Apply a keystroke to the staged copy. Non-editable fields are ignored.
    pub fn apply(&mut self, change: FieldChange) {
        if !EDITABLE_FIELDS.contains(&change.field) {
            return;
        }
        if let Some(draft) = self.draft.as_mut() {
            draft.apply(change);
        }
    }

    /// Discard the staged copy.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Whether the staged copy differs from the committed record in any
    /// editable field (compared in transmission form).
    pub fn has_changes(&self) -> bool {
        let (Some(member), Some(draft)) = (self.member(), self.draft.as_ref()) else {
            return false;
        };
        let committed = normalized_for_submit(member);
        let staged = normalized_for_submit(&draft.member);
        EDITABLE_FIELDS
            .iter()
            .any(|field| field.value_of(&committed) != field.value_of(&staged))
    }

    /// Save the staged copy.
    ///
    /// Returns `Ok(None)` when there was nothing to save (edit mode is left
    /// without a network call) and `Ok(Some(saved))` after a successful update.
    pub async fn save(&mut self) -> Result<Option<Member>, SubmitError> {
        if self.draft.is_none() {
            return Ok(None);
        }
        if !self.has_changes() {
            debug!("No profile changes, leaving edit mode");
            self.draft = None;
            return Ok(None);
        }

        let Some(draft) = self.draft.as_mut() else {
            return Ok(None);
        };
        let errors = validate_editable(&draft.member);
        if !errors.is_empty() {
            draft.errors = errors.clone();
            return Err(SubmitError::Validation(errors));
        }

        let record = normalized_for_submit(&draft.member);
        info!(member_id = record.id, "Saving profile changes");

        match self.members.update(record.id, &record).await {
            Ok(saved) => {
                info!(member_id = saved.id, "Profile updated");
                self.state = ProfileState::Loaded(saved.clone());
                self.draft = None;
                self.notification.show();
                Ok(Some(saved))
            }
            Err(e) => {
                warn!(error = %e, "Profile update failed");
                Err(SubmitError::Remote(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_label() {
        assert_eq!(role_label(1), "Miembro");
        assert_eq!(role_label(2), "Administrador");
    }

    #[test]
    fn test_initials() {
        let member = Member {
            nombre: "ana".into(),
            apellido: "Éxito".into(),
            ..Default::default()
        };
        assert_eq!(initials(&member), "AÉ");

        let no_surname = Member {
            nombre: "Luis".into(),
            ..Default::default()
        };
        assert_eq!(initials(&no_surname), "L");
    }
}
