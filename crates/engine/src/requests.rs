//! Food request primitives.
//!
//! A `FoodRequest` is a posted need for resources with a free-text target
//! quantity and a deadline. The pledge path never mutates request rows;
//! status transitions belong to peripheral update endpoints.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

/// Initial lifecycle tag for a newly created request.
pub const STATUS_ACTIVE: &str = "active";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodRequest {
    pub id: Uuid,
    pub requester_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub requested_item: String,
    /// Free-text quantity, e.g. "50 kg". Parsed magnitude may be 0.
    pub quantity: String,
    pub location: String,
    pub description: Option<String>,
    pub needed_by: DateTime<Utc>,
    pub status: String,
    /// Account that created the request, when it was created authenticated.
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FoodRequest {
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        self.needed_by < now
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "food_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub requester_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub requested_item: String,
    pub quantity: String,
    pub location: String,
    pub description: Option<String>,
    pub needed_by: DateTimeUtc,
    pub status: String,
    pub created_by: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pledges::Entity")]
    Pledges,
}

impl Related<super::pledges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pledges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&FoodRequest> for ActiveModel {
    fn from(request: &FoodRequest) -> Self {
        Self {
            id: ActiveValue::Set(request.id.to_string()),
            requester_name: ActiveValue::Set(request.requester_name.clone()),
            phone: ActiveValue::Set(request.phone.clone()),
            email: ActiveValue::Set(request.email.clone()),
            organization: ActiveValue::Set(request.organization.clone()),
            requested_item: ActiveValue::Set(request.requested_item.clone()),
            quantity: ActiveValue::Set(request.quantity.clone()),
            location: ActiveValue::Set(request.location.clone()),
            description: ActiveValue::Set(request.description.clone()),
            needed_by: ActiveValue::Set(request.needed_by),
            status: ActiveValue::Set(request.status.clone()),
            created_by: ActiveValue::Set(request.created_by.clone()),
            created_at: ActiveValue::Set(request.created_at),
        }
    }
}


impl TryFrom<Model> for FoodRequest {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("request not exists".to_string()))?,
            requester_name: model.requester_name,
            phone: model.phone,
            email: model.email,
            organization: model.organization,
            requested_item: model.requested_item,
            quantity: model.quantity,
            location: model.location,
            description: model.description,
            needed_by: model.needed_by,
            status: model.status,
            created_by: model.created_by,
            created_at: model.created_at,
        })
    }
}
