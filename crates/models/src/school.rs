use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, setup_account, validate};

pub const NAME_MAX_LEN: usize = 128;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "school")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    /// Non-owning reference; cleared when the setup account is deleted.
    #[sea_orm(unique)]
    pub setup_account_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    SetupAccount,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::SetupAccount => Entity::belongs_to(setup_account::Entity)
                .from(Column::SetupAccountId)
                .to(setup_account::Column::Id)
                .into(),
        }
    }
}

impl Related<setup_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SetupAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    validate::required_text("name", name, NAME_MAX_LEN)
}

/// Insert a school. The caller is responsible for checking that
/// `setup_account_id` exists; the FK only backs that up.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    setup_account_id: Option<Uuid>,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        setup_account_id: Set(setup_account_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}
