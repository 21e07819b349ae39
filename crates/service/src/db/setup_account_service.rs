use uuid::Uuid;
use chrono::Utc;
use sea_orm::{DatabaseConnection, ActiveModelTrait, EntityTrait, QueryFilter, ColumnTrait, Set};
use models::setup_account;
use crate::errors::ServiceError;

/// List all setup accounts in storage order.
pub async fn list_setup_accounts(db: &DatabaseConnection) -> Result<Vec<setup_account::Model>, ServiceError> {
    setup_account::Entity::find().all(db).await.map_err(ServiceError::from_db)
}

/// Get a setup account by id.
pub async fn get_setup_account(db: &DatabaseConnection, id: Uuid) -> Result<Option<setup_account::Model>, ServiceError> {
    setup_account::Entity::find_by_id(id).one(db).await.map_err(ServiceError::from_db)
}

/// Get a setup account by its unique school name.
pub async fn get_setup_account_by_school_name(db: &DatabaseConnection, school_name: &str) -> Result<Option<setup_account::Model>, ServiceError> {
    setup_account::Entity::find()
        .filter(setup_account::Column::SchoolName.eq(school_name))
        .one(db)
        .await
        .map_err(ServiceError::from_db)
}

/// Create a setup account.
pub async fn create_setup_account(db: &DatabaseConnection, school_name: &str) -> Result<setup_account::Model, ServiceError> {
    Ok(setup_account::create(db, school_name).await?)
}

/// Update a setup account; `None` leaves the field as is.
pub async fn update_setup_account(db: &DatabaseConnection, id: Uuid, school_name: Option<&str>) -> Result<setup_account::Model, ServiceError> {
    let mut am: setup_account::ActiveModel = setup_account::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ServiceError::from_db)?
        .ok_or_else(|| ServiceError::not_found("setup_account"))?
        .into();
    if let Some(n) = school_name {
        setup_account::validate_school_name(n)?;
        am.school_name = Set(n.to_string());
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(ServiceError::from_db)
}

/// Delete a setup account; returns true if a row was removed.
pub async fn delete_setup_account(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = setup_account::Entity::delete_by_id(id).exec(db).await.map_err(ServiceError::from_db)?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn setup_account_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let sa = create_setup_account(&db, "Lincoln High").await?;
        let found = get_setup_account(&db, sa.id).await?.unwrap();
        assert_eq!(found.school_name, "Lincoln High");

        let by_name = get_setup_account_by_school_name(&db, "Lincoln High").await?;
        assert_eq!(by_name.map(|m| m.id), Some(sa.id));
        assert!(get_setup_account_by_school_name(&db, "Nowhere").await?.is_none());

        let untouched = update_setup_account(&db, sa.id, None).await?;
        assert_eq!(untouched.school_name, "Lincoln High");
        let renamed = update_setup_account(&db, sa.id, Some("Lincoln Senior High")).await?;
        assert_eq!(renamed.school_name, "Lincoln Senior High");

        assert_eq!(list_setup_accounts(&db).await?.len(), 1);

        assert!(delete_setup_account(&db, sa.id).await?);
        assert!(!delete_setup_account(&db, sa.id).await?);
        assert!(get_setup_account(&db, sa.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_school_name_is_conflict() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_setup_account(&db, "Adams").await?;
        let err = create_setup_account(&db, "Adams").await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = update_setup_account(&db, Uuid::new_v4(), Some("Ghost")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }
}
