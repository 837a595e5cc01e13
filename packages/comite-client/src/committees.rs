//! Committee views: the member's own committee and the full directory.

use futures::future::join_all;
use tracing::{debug, warn};

use comite_api::{Committee, Member};

use crate::directory::Directories;
use crate::error::DirectoryError;

pub const MISSING_COMMITTEE_MESSAGE: &str = "No se pudo determinar a qué comité perteneces. \
     Por favor, cierra sesión y vuelve a iniciar sesión para actualizar tu información.";

/// Why a committee view could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitteeViewError {
    /// The session carries no committee; only a fresh login can fix it.
    MissingCommittee,
    NotFound,
    Remote(String),
}

impl CommitteeViewError {
    pub fn message(&self) -> String {
        match self {
            CommitteeViewError::MissingCommittee => MISSING_COMMITTEE_MESSAGE.to_string(),
            CommitteeViewError::NotFound => "No se encontró información del comité".to_string(),
            CommitteeViewError::Remote(_) => "Error al cargar la información del comité".to_string(),
        }
    }

    /// Whether the view should offer "log out and back in" instead of retry.
    pub fn requires_relogin(&self) -> bool {
        matches!(self, CommitteeViewError::MissingCommittee)
    }
}

impl From<DirectoryError> for CommitteeViewError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound => CommitteeViewError::NotFound,
            DirectoryError::Remote(msg) => CommitteeViewError::Remote(msg),
        }
    }
}

/// The logged-in member's committee with its secretary and roster.
#[derive(Debug, Clone, PartialEq)]
pub struct MyCommittee {
    pub committee: Committee,
    pub secretary: Option<Member>,
    pub members: Vec<Member>,
}

impl MyCommittee {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Load the committee, then its secretary and roster concurrently.
///
/// Only the committee itself is required; a missing secretary or a failed
/// roster fetch degrade to `None` and an empty list.
pub async fn load_my_committee(
    directories: &Directories,
    comite_id: Option<i64>,
) -> Result<MyCommittee, CommitteeViewError> {
    let comite_id = match comite_id {
        Some(id) if id != 0 => id,
        _ => {
            warn!("Session has no committee id");
            return Err(CommitteeViewError::MissingCommittee);
        }
    };

    let committee = directories.committees.get(comite_id).await.map_err(|e| {
        warn!(comite_id, error = %e, "Failed to load committee");
        CommitteeViewError::from(e)
    })?;

    let secretary = async {
        if committee.secretario == 0 {
            return None;
        }
        match directories.members.get(committee.secretario).await {
            Ok(member) => Some(member),
            Err(e) => {
                warn!(comite_id, secretario = committee.secretario, error = %e, "Failed to load secretary");
                None
            }
        }
    };
    let roster = async {
        directories
            .members
            .get_by_comite(comite_id)
            .await
            .unwrap_or_else(|e| {
                warn!(comite_id, error = %e, "Failed to load committee roster");
                Vec::new()
            })
    };
    let (secretary, members) = tokio::join!(secretary, roster);

    debug!(comite_id, members = members.len(), "Committee view loaded");
    Ok(MyCommittee {
        committee,
        secretary,
        members,
    })
}

/// One row of the committee directory.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitteeSummary {
    pub committee: Committee,
    pub member_count: usize,
}

impl CommitteeSummary {
    pub fn status_label(&self) -> &'static str {
        if self.committee.activo {
            "Activo"
        } else {
            "Inactivo"
        }
    }
}

/// List every committee with its member count.
///
/// Counts are fetched concurrently, one request per committee; a failed
/// count shows as 0 without affecting the other rows.
pub async fn load_all_committees(
    directories: &Directories,
) -> Result<Vec<CommitteeSummary>, CommitteeViewError> {
    let committees = directories.committees.list().await.map_err(|e| {
        warn!(error = %e, "Failed to load committee list");
        CommitteeViewError::from(e)
    })?;

    let counts = join_all(committees.iter().map(|committee| async move {
        match directories.members.get_by_comite(committee.id).await {
            Ok(members) => members.len(),
            Err(e) => {
                warn!(comite_id = committee.id, error = %e, "Failed to count committee members");
                0
            }
        }
    }))
    .await;

    Ok(committees
        .into_iter()
        .zip(counts)
        .map(|(committee, member_count)| CommitteeSummary {
            committee,
            member_count,
        })
        .collect())
}

/// Case-insensitive search over committee name and zone.
pub fn filter_committees<'a>(
    summaries: &'a [CommitteeSummary],
    query: &str,
) -> Vec<&'a CommitteeSummary> {
    let query = query.trim().to_lowercase();
    summaries
        .iter()
        .filter(|s| {
            query.is_empty()
                || s.committee.nombre.to_lowercase().contains(&query)
                || s.committee.zona.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(nombre: &str, zona: &str) -> CommitteeSummary {
        CommitteeSummary {
            committee: Committee {
                nombre: nombre.into(),
                zona: zona.into(),
                ..Default::default()
            },
            member_count: 0,
        }
    }

    #[test]
    fn test_filter_matches_name_or_zone() {
        let rows = vec![
            summary("Los Mina Norte", "Santo Domingo Este"),
            summary("Villa Juana", "Distrito Nacional"),
        ];

        assert_eq!(filter_committees(&rows, "").len(), 2);
        assert_eq!(filter_committees(&rows, "mina")[0].committee.nombre, "Los Mina Norte");
        assert_eq!(filter_committees(&rows, "NACIONAL")[0].committee.nombre, "Villa Juana");
        assert!(filter_committees(&rows, "Santiago").is_empty());
    }

    #[test]
    fn test_missing_committee_requires_relogin() {
        assert!(CommitteeViewError::MissingCommittee.requires_relogin());
        assert!(!CommitteeViewError::NotFound.requires_relogin());
    }
}
