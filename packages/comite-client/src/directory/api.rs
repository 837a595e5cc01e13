//! Directory implementations backed by the REST API client.

use async_trait::async_trait;

use comite_api::{ApiClient, Committee, Member, Role};

use super::{CommitteeDirectory, DirectoryResult, MemberDirectory, RoleDirectory};

#[async_trait]
impl MemberDirectory for ApiClient {
    async fn get_by_cedula(&self, cedula: &str) -> DirectoryResult<Member> {
        Ok(self.member_by_cedula(cedula).await?)
    }

    async fn get(&self, id: i64) -> DirectoryResult<Member> {
        Ok(self.member(id).await?)
    }

    async fn get_by_comite(&self, comite_id: i64) -> DirectoryResult<Vec<Member>> {
        Ok(self.members_by_committee(comite_id).await?)
    }

    async fn create(&self, member: &Member) -> DirectoryResult<Member> {
        Ok(self.create_member(member).await?)
    }

    async fn update(&self, id: i64, member: &Member) -> DirectoryResult<Member> {
        Ok(self.update_member(id, member).await?)
    }
}

#[async_trait]
impl CommitteeDirectory for ApiClient {
    async fn list(&self) -> DirectoryResult<Vec<Committee>> {
        Ok(self.committees().await?)
    }

    async fn get(&self, id: i64) -> DirectoryResult<Committee> {
        Ok(self.committee(id).await?)
    }
}

#[async_trait]
impl RoleDirectory for ApiClient {
    async fn list(&self) -> DirectoryResult<Vec<Role>> {
        Ok(self.roles().await?)
    }
}
