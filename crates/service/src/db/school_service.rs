use uuid::Uuid;
use chrono::Utc;
use sea_orm::{DatabaseConnection, ActiveModelTrait, EntityTrait, QueryFilter, ColumnTrait, Set};
use models::school;
use crate::errors::ServiceError;

/// List all schools in storage order.
pub async fn list_schools(db: &DatabaseConnection) -> Result<Vec<school::Model>, ServiceError> {
    school::Entity::find().all(db).await.map_err(ServiceError::from_db)
}

/// Get a school by id.
pub async fn get_school(db: &DatabaseConnection, id: Uuid) -> Result<Option<school::Model>, ServiceError> {
    school::Entity::find_by_id(id).one(db).await.map_err(ServiceError::from_db)
}

/// Get a school by its unique name.
pub async fn get_school_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<school::Model>, ServiceError> {
    school::Entity::find()
        .filter(school::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(ServiceError::from_db)
}

/// Create a school, optionally linked to a setup account.
pub async fn create_school(db: &DatabaseConnection, name: &str, setup_account_id: Option<Uuid>) -> Result<school::Model, ServiceError> {
    Ok(school::create(db, name, setup_account_id).await?)
}

/// Update a school. A `None` setup account keeps the current link.
pub async fn update_school(db: &DatabaseConnection, id: Uuid, name: Option<&str>, setup_account_id: Option<Uuid>) -> Result<school::Model, ServiceError> {
    let current = school::Entity::find_by_id(id).one(db).await.map_err(ServiceError::from_db)?;
    let Some(existing) = current else {
        return Err(ServiceError::not_found("school"));
    };
    let mut am: school::ActiveModel = existing.into();
    if let Some(n) = name {
        school::validate_name(n)?;
        am.name = Set(n.to_string());
    }
    if let Some(sa) = setup_account_id {
        am.setup_account_id = Set(Some(sa));
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(ServiceError::from_db)
}

/// Delete a school; returns true if a row was removed.
pub async fn delete_school(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = school::Entity::delete_by_id(id).exec(db).await.map_err(ServiceError::from_db)?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::setup_account;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn school_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let sa = setup_account::create(&db, "Lincoln High").await?;
        let s = create_school(&db, "Lincoln High", Some(sa.id)).await?;
        let found = get_school(&db, s.id).await?.unwrap();
        assert_eq!(found.name, "Lincoln High");
        assert_eq!(found.setup_account_id, Some(sa.id));

        let by_name = get_school_by_name(&db, "Lincoln High").await?.unwrap();
        assert_eq!(by_name.id, s.id);

        let renamed = update_school(&db, s.id, Some("Lincoln Senior High"), None).await?;
        assert_eq!(renamed.name, "Lincoln Senior High");
        assert_eq!(renamed.setup_account_id, Some(sa.id));

        let listed = list_schools(&db).await?;
        assert!(listed.iter().any(|x| x.id == s.id));

        assert!(delete_school(&db, s.id).await?);
        assert!(get_school(&db, s.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_reconnects_setup_account() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let first = setup_account::create(&db, "Roosevelt").await?;
        let second = setup_account::create(&db, "Roosevelt Annex").await?;
        let s = create_school(&db, "Roosevelt", Some(first.id)).await?;

        let moved = update_school(&db, s.id, None, Some(second.id)).await?;
        assert_eq!(moved.name, "Roosevelt");
        assert_eq!(moved.setup_account_id, Some(second.id));
        let reloaded = get_school(&db, s.id).await?.unwrap();
        assert_eq!(reloaded.setup_account_id, Some(second.id));

        // the old account is free again for another school
        let other = create_school(&db, "Roosevelt Elementary", Some(first.id)).await?;
        assert_eq!(other.setup_account_id, Some(first.id));

        let dangling = update_school(&db, s.id, None, Some(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(dangling, ServiceError::ReferenceNotFound(_)), "got {dangling:?}");
        Ok(())
    }

    #[tokio::test]
    async fn constraint_violations_are_classified() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        create_school(&db, "Hamilton", None).await?;
        let dup = create_school(&db, "Hamilton", None).await.unwrap_err();
        assert!(matches!(dup, ServiceError::Conflict(_)), "got {dup:?}");

        let dangling = create_school(&db, "Burr", Some(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(dangling, ServiceError::ReferenceNotFound(_)), "got {dangling:?}");
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_rejected_before_query() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let s = create_school(&db, "Jay", None).await?;
        let err = update_school(&db, s.id, Some(" "), None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }
}
