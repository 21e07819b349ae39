use std::sync::Arc;
use uuid::Uuid;
use tracing::{debug, info, instrument};

use models::setup_account;
use crate::errors::ServiceError;
use super::dto::{CreateSetupAccountDto, EditSetupAccountDto};
use super::repository::{NewSetupAccount, SetupAccountChanges, SetupAccountKey, SetupAccountRepository};

/// Setup account operations over an injected persistence client.
pub struct SetupAccountService<R: SetupAccountRepository> {
    repo: Arc<R>,
}

impl<R: SetupAccountRepository> SetupAccountService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_all_setup_accounts(&self) -> Result<Vec<setup_account::Model>, ServiceError> {
        let rows = self.repo.find_many().await?;
        debug!(count = rows.len(), "setup_accounts_listed");
        Ok(rows)
    }

    pub async fn get_setup_account_by_id(&self, id: Uuid) -> Result<Option<setup_account::Model>, ServiceError> {
        self.repo.find_unique(SetupAccountKey::Id(id)).await
    }

    pub async fn get_setup_account_by_school_name(&self, school_name: &str) -> Result<Option<setup_account::Model>, ServiceError> {
        self.repo.find_unique(SetupAccountKey::SchoolName(school_name.to_string())).await
    }

    #[instrument(skip(self, dto), fields(school_name = %dto.school_name))]
    pub async fn create_setup_account(&self, dto: CreateSetupAccountDto) -> Result<setup_account::Model, ServiceError> {
        dto.validate()?;
        let created = self.repo.create(NewSetupAccount { school_name: dto.school_name }).await?;
        info!(setup_account_id = %created.id, "setup_account_created");
        Ok(created)
    }

    #[instrument(skip(self, dto), fields(setup_account_id = %id))]
    pub async fn edit_setup_account(&self, id: Uuid, dto: EditSetupAccountDto) -> Result<setup_account::Model, ServiceError> {
        dto.validate()?;
        let updated = self.repo.update(id, SetupAccountChanges { school_name: dto.school_name }).await?;
        info!("setup_account_updated");
        Ok(updated)
    }

    /// Returns `false` when no setup account had this id.
    #[instrument(skip(self), fields(setup_account_id = %id))]
    pub async fn delete_setup_account(&self, id: Uuid) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete(id).await?;
        info!(deleted, "setup_account_deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_account::repository::mock::InMemorySetupAccountRepository;

    fn svc() -> SetupAccountService<InMemorySetupAccountRepository> {
        SetupAccountService::new(Arc::new(InMemorySetupAccountRepository::default()))
    }

    fn create_dto(name: &str) -> CreateSetupAccountDto {
        CreateSetupAccountDto { school_name: name.into() }
    }

    #[tokio::test]
    async fn create_then_lookup_round_trips() {
        let svc = svc();
        let sa = svc.create_setup_account(create_dto("Lincoln High")).await.unwrap();

        let by_id = svc.get_setup_account_by_id(sa.id).await.unwrap().unwrap();
        assert_eq!(by_id, sa);
        let by_name = svc.get_setup_account_by_school_name("Lincoln High").await.unwrap().unwrap();
        assert_eq!(by_name.id, sa.id);
        assert_eq!(svc.get_all_setup_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_keys_are_absent_not_errors() {
        let svc = svc();
        assert!(svc.get_setup_account_by_id(Uuid::new_v4()).await.unwrap().is_none());
        assert!(svc.get_setup_account_by_school_name("Nowhere").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_school_name_conflicts() {
        let svc = svc();
        svc.create_setup_account(create_dto("Adams")).await.unwrap();
        let err = svc.create_setup_account(create_dto("Adams")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn empty_edit_keeps_fields() {
        let svc = svc();
        let sa = svc.create_setup_account(create_dto("Polk")).await.unwrap();
        let same = svc.edit_setup_account(sa.id, EditSetupAccountDto::default()).await.unwrap();
        assert_eq!(same.school_name, "Polk");
        assert_eq!(same.created_at, sa.created_at);
    }

    #[tokio::test]
    async fn edit_replaces_supplied_field() {
        let svc = svc();
        let sa = svc.create_setup_account(create_dto("Polk")).await.unwrap();
        let edited = svc
            .edit_setup_account(sa.id, EditSetupAccountDto { school_name: Some("Polk County".into()) })
            .await
            .unwrap();
        assert_eq!(edited.school_name, "Polk County");
        assert!(svc.get_setup_account_by_school_name("Polk").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn edit_unknown_id_is_not_found() {
        let err = svc()
            .edit_setup_account(Uuid::new_v4(), EditSetupAccountDto { school_name: Some("X".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let svc = svc();
        let sa = svc.create_setup_account(create_dto("Tyler")).await.unwrap();
        assert!(svc.delete_setup_account(sa.id).await.unwrap());
        assert!(!svc.delete_setup_account(sa.id).await.unwrap());
        assert!(svc.get_setup_account_by_id(sa.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_dto_never_reaches_repository() {
        let svc = svc();
        let err = svc.create_setup_account(create_dto("   ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(svc.get_all_setup_accounts().await.unwrap().is_empty());
    }
}
