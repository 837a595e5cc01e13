//! Testing utilities including an in-memory directory.
//!
//! Useful for exercising the controllers without a running API.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use comite_api::{Committee, Member, Role};

use crate::directory::{CommitteeDirectory, DirectoryResult, MemberDirectory, RoleDirectory};
use crate::error::DirectoryError;
use crate::format::strip_formatting;

/// Directory operations, for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    MemberByCedula,
    Member,
    MembersByCommittee,
    CreateMember,
    UpdateMember,
    Committees,
    Committee,
    Roles,
}

/// Record of a call made to the mock directory.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryCall {
    GetByCedula(String),
    GetMember(i64),
    GetByComite(i64),
    Create(Member),
    Update(i64, Member),
    ListCommittees,
    GetCommittee(i64),
    ListRoles,
}

/// In-memory member, committee and role directory.
///
/// Serves whatever it was seeded with, fails the endpoints it was told to
/// fail, and records every call for assertions.
pub struct MockDirectory {
    members: Mutex<Vec<Member>>,
    committees: Mutex<Vec<Committee>>,
    roles: Mutex<Vec<Role>>,
    failing: Mutex<HashSet<Endpoint>>,
    failing_rosters: Mutex<HashSet<i64>>,
    next_id: AtomicI64,
    calls: Mutex<Vec<DirectoryCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDirectory {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(Vec::new()),
            committees: Mutex::new(Vec::new()),
            roles: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            failing_rosters: Mutex::new(HashSet::new()),
            next_id: AtomicI64::new(100),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_member(self, member: Member) -> Self {
        lock(&self.members).push(member);
        self
    }

    pub fn with_committee(self, committee: Committee) -> Self {
        lock(&self.committees).push(committee);
        self
    }

    pub fn with_role(self, id: i64, nombre: &str) -> Self {
        lock(&self.roles).push(Role {
            id,
            nombre: nombre.to_string(),
        });
        self
    }

    /// Make an endpoint answer with a remote error.
    pub fn failing(self, endpoint: Endpoint) -> Self {
        lock(&self.failing).insert(endpoint);
        self
    }

    /// Make the roster of one committee fail, leaving the others working.
    pub fn failing_roster(self, comite_id: i64) -> Self {
        lock(&self.failing_rosters).insert(comite_id);
        self
    }

    /// Stop failing an endpoint.
    pub fn recover(&self, endpoint: Endpoint) {
        lock(&self.failing).remove(&endpoint);
    }

    pub fn calls(&self) -> Vec<DirectoryCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn members(&self) -> Vec<Member> {
        lock(&self.members).clone()
    }

    fn record(&self, call: DirectoryCall) {
        lock(&self.calls).push(call);
    }

    fn check(&self, endpoint: Endpoint) -> DirectoryResult<()> {
        if lock(&self.failing).contains(&endpoint) {
            return Err(DirectoryError::Remote(format!(
                "API error (500): {:?} unavailable",
                endpoint
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl MemberDirectory for MockDirectory {
    async fn get_by_cedula(&self, cedula: &str) -> DirectoryResult<Member> {
        self.record(DirectoryCall::GetByCedula(cedula.to_string()));
        self.check(Endpoint::MemberByCedula)?;
        lock(&self.members)
            .iter()
            .find(|m| strip_formatting(&m.cedula) == cedula)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn get(&self, id: i64) -> DirectoryResult<Member> {
        self.record(DirectoryCall::GetMember(id));
        self.check(Endpoint::Member)?;
        lock(&self.members)
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn get_by_comite(&self, comite_id: i64) -> DirectoryResult<Vec<Member>> {
        self.record(DirectoryCall::GetByComite(comite_id));
        self.check(Endpoint::MembersByCommittee)?;
        if lock(&self.failing_rosters).contains(&comite_id) {
            return Err(DirectoryError::Remote("API error (500): roster unavailable".into()));
        }
        Ok(lock(&self.members)
            .iter()
            .filter(|m| m.comite_id == comite_id)
            .cloned()
            .collect())
    }

    async fn create(&self, member: &Member) -> DirectoryResult<Member> {
        self.record(DirectoryCall::Create(member.clone()));
        self.check(Endpoint::CreateMember)?;
        let saved = Member {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            ..member.clone()
        };
        lock(&self.members).push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, id: i64, member: &Member) -> DirectoryResult<Member> {
        self.record(DirectoryCall::Update(id, member.clone()));
        self.check(Endpoint::UpdateMember)?;
        let mut members = lock(&self.members);
        let slot = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(DirectoryError::NotFound)?;
        *slot = Member {
            id,
            ..member.clone()
        };
        Ok(slot.clone())
    }
}

#[async_trait]
impl CommitteeDirectory for MockDirectory {
    async fn list(&self) -> DirectoryResult<Vec<Committee>> {
        self.record(DirectoryCall::ListCommittees);
        self.check(Endpoint::Committees)?;
        Ok(lock(&self.committees).clone())
    }

    async fn get(&self, id: i64) -> DirectoryResult<Committee> {
        self.record(DirectoryCall::GetCommittee(id));
        self.check(Endpoint::Committee)?;
        lock(&self.committees)
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }
}

#[async_trait]
impl RoleDirectory for MockDirectory {
    async fn list(&self) -> DirectoryResult<Vec<Role>> {
        self.record(DirectoryCall::ListRoles);
        self.check(Endpoint::Roles)?;
        Ok(lock(&self.roles).clone())
    }
}
