//! Self-registration form.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, warn};

use comite_api::{Committee, Member, Role};

use crate::directory::Directories;
use crate::error::SubmitError;
use crate::form::{normalized_for_submit, Draft, FieldChange};
use crate::format::mask_cedula;
use crate::notification::Notification;
use crate::validation::{validate_form, FieldErrors};

/// Role assigned to self-registered members, matched by name.
pub const DEFAULT_ROLE_NAME: &str = "miembro";

/// Used only when the role list could not be resolved.
pub const FALLBACK_ROLE_ID: i64 = 1;

/// Find the default role by case-insensitive name.
pub fn resolve_default_role(roles: &[Role]) -> Option<i64> {
    roles
        .iter()
        .find(|role| role.nombre.trim().eq_ignore_ascii_case(DEFAULT_ROLE_NAME))
        .map(|role| role.id)
}

/// Validate a draft and build the record to send to `MemberDirectory::create`.
pub fn prepare_registration(
    draft: &Member,
    role_id: i64,
    now: DateTime<Utc>,
) -> Result<Member, FieldErrors> {
    let errors = validate_form(draft);
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Member {
        id: 0,
        rol_id: role_id,
        fecha_ingreso: now,
        activo: true,
        ..normalized_for_submit(draft)
    })
}

pub struct RegistrationForm {
    directories: Directories,
    draft: Draft,
    committees: Vec<Committee>,
    default_role_id: Option<i64>,
    notification: Notification,
}

impl RegistrationForm {
    pub fn new(directories: Directories, dismiss_after: Duration) -> Self {
        Self {
            directories,
            draft: Draft::new(),
            committees: Vec::new(),
            default_role_id: None,
            notification: Notification::new(dismiss_after),
        }
    }

    /// Fetch the committee options and the default role.
    ///
    /// Both requests run concurrently and fail independently: a failed
    /// committee list leaves no options, a failed role list leaves the
    /// fallback role.
    pub async fn load(&mut self) {
        let (committees, roles) = tokio::join!(
            self.directories.committees.list(),
            self.directories.roles.list()
        );

        self.committees = committees.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load committees for registration");
            Vec::new()
        });

        match roles {
            Ok(roles) => {
                self.default_role_id = resolve_default_role(&roles);
                if self.default_role_id.is_none() {
                    warn!(count = roles.len(), "No '{}' role in role list", DEFAULT_ROLE_NAME);
                }
            }
            Err(e) => warn!(error = %e, "Failed to load roles for registration"),
        }

        debug!(
            committees = self.committees.len(),
            role_id = ?self.default_role_id,
            "Registration form loaded"
        );
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn committees(&self) -> &[Committee] {
        &self.committees
    }

    pub fn role_id(&self) -> i64 {
        self.default_role_id.unwrap_or(FALLBACK_ROLE_ID)
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn apply(&mut self, change: FieldChange) {
        self.draft.apply(change);
    }

    /// Validate, then create the member.
    ///
    /// Validation failures make no network call. Remote failures keep the
    /// draft so nothing has to be typed again.
    pub async fn submit(&mut self) -> Result<Member, SubmitError> {
        let record = match prepare_registration(&self.draft.member, self.role_id(), Utc::now()) {
            Ok(record) => record,
            Err(errors) => {
                debug!(fields = errors.len(), "Registration rejected by validation");
                self.draft.errors = errors.clone();
                return Err(SubmitError::Validation(errors));
            }
        };

        info!(
            cedula = %mask_cedula(&record.cedula),
            comite_id = record.comite_id,
            "Submitting registration"
        );

        match self.directories.members.create(&record).await {
            Ok(saved) => {
                info!(member_id = saved.id, "Member registered");
                self.draft.clear();
                self.notification.show();
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                Err(SubmitError::Remote(e.to_string()))
            }
        }
    }
}
