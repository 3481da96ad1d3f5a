//! Pledge ledger rows.
//!
//! A `Pledge` is one donor's promise of a partial quantity toward one
//! request. Rows are append-only: created exactly once at admission and
//! never updated or deleted. The same account may pledge several times to
//! the same request; nothing deduplicates (request, pledger) pairs.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pledge {
    pub id: Uuid,
    pub request_id: Uuid,
    pub user_id: String,
    /// Free-text quantity, same informal-unit convention as the request.
    pub pledged_quantity: String,
    pub created_at: DateTime<Utc>,
}

impl Pledge {
    pub fn new(request_id: Uuid, user_id: String, pledged_quantity: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_id,
            user_id,
            pledged_quantity,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "food_request_pledges")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub request_id: String,
    pub user_id: String,
    pub pledged_quantity: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::requests::Entity",
        from = "Column::RequestId",
        to = "super::requests::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Requests,
}

impl Related<super::requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Pledge> for ActiveModel {
    fn from(pledge: &Pledge) -> Self {
        Self {
            id: ActiveValue::Set(pledge.id.to_string()),
            request_id: ActiveValue::Set(pledge.request_id.to_string()),
            user_id: ActiveValue::Set(pledge.user_id.clone()),
            pledged_quantity: ActiveValue::Set(pledge.pledged_quantity.clone()),
            created_at: ActiveValue::Set(pledge.created_at),
        }
    }
}

impl TryFrom<Model> for Pledge {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("pledge not exists".to_string()))?,
            request_id: Uuid::parse_str(&model.request_id)
                .map_err(|_| EngineError::KeyNotFound("request not exists".to_string()))?,
            user_id: model.user_id,
            pledged_quantity: model.pledged_quantity,
            created_at: model.created_at,
        })
    }
}
