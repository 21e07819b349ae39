use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::school;
use crate::errors::ServiceError;

/// Unique keys a school can be looked up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchoolKey {
    Id(Uuid),
    Name(String),
}

#[derive(Debug, Clone)]
pub struct NewSchool {
    pub name: String,
    pub setup_account_id: Option<Uuid>,
}

/// `setup_account_id: None` means "leave unchanged", not "clear".
#[derive(Debug, Clone, Default)]
pub struct SchoolChanges {
    pub name: Option<String>,
    pub setup_account_id: Option<Uuid>,
}

/// Persistence client for schools.
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    async fn find_many(&self) -> Result<Vec<school::Model>, ServiceError>;
    async fn find_unique(&self, key: SchoolKey) -> Result<Option<school::Model>, ServiceError>;
    async fn create(&self, data: NewSchool) -> Result<school::Model, ServiceError>;
    async fn update(&self, id: Uuid, changes: SchoolChanges) -> Result<school::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmSchoolRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSchoolRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SchoolRepository for SeaOrmSchoolRepository {
    async fn find_many(&self) -> Result<Vec<school::Model>, ServiceError> {
        crate::db::school_service::list_schools(&self.db).await
    }

    async fn find_unique(&self, key: SchoolKey) -> Result<Option<school::Model>, ServiceError> {
        match key {
            SchoolKey::Id(id) => crate::db::school_service::get_school(&self.db, id).await,
            SchoolKey::Name(name) => crate::db::school_service::get_school_by_name(&self.db, &name).await,
        }
    }

    async fn create(&self, data: NewSchool) -> Result<school::Model, ServiceError> {
        crate::db::school_service::create_school(&self.db, &data.name, data.setup_account_id).await
    }

    async fn update(&self, id: Uuid, changes: SchoolChanges) -> Result<school::Model, ServiceError> {
        crate::db::school_service::update_school(&self.db, id, changes.name.as_deref(), changes.setup_account_id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        crate::db::school_service::delete_school(&self.db, id).await
    }
}

/// Simple in-memory repository for tests and doc examples.
///
/// Enforces the unique name and one-school-per-setup-account rules but not
/// the foreign key itself; the service checks references before writing.
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::{Mutex, PoisonError};

    #[derive(Default)]
    pub struct InMemorySchoolRepository {
        rows: Mutex<Vec<school::Model>>, // insertion order
    }

    fn check_unique(rows: &[school::Model], name: Option<&str>, setup_account_id: Option<Uuid>, except: Option<Uuid>) -> Result<(), ServiceError> {
        for r in rows.iter().filter(|r| Some(r.id) != except) {
            if name.is_some_and(|n| n == r.name) {
                return Err(ServiceError::Conflict(format!("school name {} already exists", r.name)));
            }
            if setup_account_id.is_some() && r.setup_account_id == setup_account_id {
                return Err(ServiceError::Conflict("setup account already connected to a school".into()));
            }
        }
        Ok(())
    }

    #[async_trait]
    impl SchoolRepository for InMemorySchoolRepository {
        async fn find_many(&self) -> Result<Vec<school::Model>, ServiceError> {
            Ok(self.rows.lock().unwrap_or_else(PoisonError::into_inner).clone())
        }

        async fn find_unique(&self, key: SchoolKey) -> Result<Option<school::Model>, ServiceError> {
            let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(rows
                .iter()
                .find(|r| match &key {
                    SchoolKey::Id(id) => r.id == *id,
                    SchoolKey::Name(name) => &r.name == name,
                })
                .cloned())
        }

        async fn create(&self, data: NewSchool) -> Result<school::Model, ServiceError> {
            school::validate_name(&data.name)?;
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            check_unique(&rows, Some(&data.name), data.setup_account_id, None)?;
            let now = Utc::now().into();
            let m = school::Model {
                id: Uuid::new_v4(),
                name: data.name,
                setup_account_id: data.setup_account_id,
                created_at: now,
                updated_at: now,
            };
            rows.push(m.clone());
            Ok(m)
        }

        async fn update(&self, id: Uuid, changes: SchoolChanges) -> Result<school::Model, ServiceError> {
            if let Some(n) = &changes.name {
                school::validate_name(n)?;
            }
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            if !rows.iter().any(|r| r.id == id) {
                return Err(ServiceError::not_found("school"));
            }
            check_unique(&rows, changes.name.as_deref(), changes.setup_account_id, Some(id))?;
            let row = rows.iter_mut().find(|r| r.id == id).ok_or_else(|| ServiceError::not_found("school"))?;
            if let Some(n) = changes.name {
                row.name = n;
            }
            if let Some(sa) = changes.setup_account_id {
                row.setup_account_id = Some(sa);
            }
            row.updated_at = Utc::now().into();
            Ok(row.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() < before)
        }
    }
}
