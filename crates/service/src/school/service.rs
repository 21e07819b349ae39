use std::sync::Arc;
use uuid::Uuid;
use tracing::{debug, info, instrument};

use models::school;
use crate::errors::ServiceError;
use crate::setup_account::repository::{SetupAccountKey, SetupAccountRepository};
use super::dto::{CreateSchoolDto, EditSchoolDto};
use super::repository::{NewSchool, SchoolChanges, SchoolKey, SchoolRepository};

/// School operations over injected persistence clients.
///
/// The setup account repository is only used to verify references before a
/// school is connected to one.
pub struct SchoolService<S: SchoolRepository, A: SetupAccountRepository> {
    schools: Arc<S>,
    setup_accounts: Arc<A>,
}

impl<S: SchoolRepository, A: SetupAccountRepository> SchoolService<S, A> {
    pub fn new(schools: Arc<S>, setup_accounts: Arc<A>) -> Self {
        Self { schools, setup_accounts }
    }

    pub async fn get_all_schools(&self) -> Result<Vec<school::Model>, ServiceError> {
        let rows = self.schools.find_many().await?;
        debug!(count = rows.len(), "schools_listed");
        Ok(rows)
    }

    pub async fn get_school_by_id(&self, id: Uuid) -> Result<Option<school::Model>, ServiceError> {
        self.schools.find_unique(SchoolKey::Id(id)).await
    }

    pub async fn get_school_by_name(&self, name: &str) -> Result<Option<school::Model>, ServiceError> {
        self.schools.find_unique(SchoolKey::Name(name.to_string())).await
    }

    /// Create a school connected to an existing setup account.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::school::{SchoolService, dto::CreateSchoolDto, repository::mock::InMemorySchoolRepository};
    /// use service::setup_account::{SetupAccountService, dto::CreateSetupAccountDto, repository::mock::InMemorySetupAccountRepository};
    ///
    /// let accounts = Arc::new(InMemorySetupAccountRepository::default());
    /// let setup = SetupAccountService::new(accounts.clone());
    /// let schools = SchoolService::new(Arc::new(InMemorySchoolRepository::default()), accounts);
    ///
    /// let sa = tokio_test::block_on(setup.create_setup_account(CreateSetupAccountDto { school_name: "Lincoln High".into() })).unwrap();
    /// let s = tokio_test::block_on(schools.create_school(CreateSchoolDto { name: "Lincoln High".into(), setup_account: sa.id })).unwrap();
    /// assert_eq!(s.setup_account_id, Some(sa.id));
    /// ```
    #[instrument(skip(self, dto), fields(name = %dto.name, setup_account_id = %dto.setup_account))]
    pub async fn create_school(&self, dto: CreateSchoolDto) -> Result<school::Model, ServiceError> {
        dto.validate()?;
        let setup_account_id = self.connect_setup_account(dto.setup_account).await?;
        let created = self.schools
            .create(NewSchool { name: dto.name, setup_account_id: Some(setup_account_id) })
            .await?;
        info!(school_id = %created.id, "school_created");
        Ok(created)
    }

    /// Partial update. An unknown school is `NotFound` even when the
    /// supplied setup account is unknown as well.
    #[instrument(skip(self, dto), fields(school_id = %id))]
    pub async fn edit_school(&self, id: Uuid, dto: EditSchoolDto) -> Result<school::Model, ServiceError> {
        dto.validate()?;
        if self.schools.find_unique(SchoolKey::Id(id)).await?.is_none() {
            return Err(ServiceError::not_found("school"));
        }
        let setup_account_id = match dto.setup_account {
            Some(sa) => Some(self.connect_setup_account(sa).await?),
            None => None,
        };
        let updated = self.schools
            .update(id, SchoolChanges { name: dto.name, setup_account_id })
            .await?;
        info!(reconnected = setup_account_id.is_some(), "school_updated");
        Ok(updated)
    }

    /// Returns `false` when no school had this id.
    #[instrument(skip(self), fields(school_id = %id))]
    pub async fn delete_school(&self, id: Uuid) -> Result<bool, ServiceError> {
        let deleted = self.schools.delete(id).await?;
        info!(deleted, "school_deleted");
        Ok(deleted)
    }

    /// First half of connect-by-id: the referenced setup account must exist.
    async fn connect_setup_account(&self, id: Uuid) -> Result<Uuid, ServiceError> {
        match self.setup_accounts.find_unique(SetupAccountKey::Id(id)).await? {
            Some(sa) => Ok(sa.id),
            None => Err(ServiceError::reference_not_found("setup_account", id)),
        }
    }
}
