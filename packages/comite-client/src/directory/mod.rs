//! Directory traits for the remote member, committee and role data.
//!
//! Controllers only see these traits. [`api`] implements them over the REST
//! client; [`crate::testing::MockDirectory`] implements them in memory.

pub mod api;

use async_trait::async_trait;
use std::sync::Arc;

use comite_api::{Committee, Member, Role};

use crate::error::DirectoryError;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Look up a member by canonical 11-digit cédula.
    async fn get_by_cedula(&self, cedula: &str) -> DirectoryResult<Member>;

    /// Look up a member by id.
    async fn get(&self, id: i64) -> DirectoryResult<Member>;

    /// All members belonging to a committee.
    async fn get_by_comite(&self, comite_id: i64) -> DirectoryResult<Vec<Member>>;

    async fn create(&self, member: &Member) -> DirectoryResult<Member>;

    async fn update(&self, id: i64, member: &Member) -> DirectoryResult<Member>;
}

#[async_trait]
pub trait CommitteeDirectory: Send + Sync {
    async fn list(&self) -> DirectoryResult<Vec<Committee>>;

    async fn get(&self, id: i64) -> DirectoryResult<Committee>;
}

#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn list(&self) -> DirectoryResult<Vec<Role>>;
}

/// The three directories, shared by every controller.
#[derive(Clone)]
pub struct Directories {
    pub members: Arc<dyn MemberDirectory>,
    pub committees: Arc<dyn CommitteeDirectory>,
    pub roles: Arc<dyn RoleDirectory>,
}

impl Directories {
    pub fn new(
        members: Arc<dyn MemberDirectory>,
        committees: Arc<dyn CommitteeDirectory>,
        roles: Arc<dyn RoleDirectory>,
    ) -> Self {
        Self {
            members,
            committees,
            roles,
        }
    }

    /// Use one value that implements all three traits.
    pub fn from_shared<D>(directory: Arc<D>) -> Self
    where
        D: MemberDirectory + CommitteeDirectory + RoleDirectory + 'static,
    {
        Self {
            members: directory.clone(),
            committees: directory.clone(),
            roles: directory,
        }
    }
}
