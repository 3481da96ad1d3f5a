//! Request creation and the fulfillment read path.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{Aggregate, EngineError, FoodRequest, ResultEngine, pledges, requests};

use super::{
    Engine, normalize_optional_text, normalize_required_text, validate_optional_email,
    validate_phone,
};

/// Command to create a food request.
///
/// `created_by` is the authenticated account id when the requester was
/// logged in; anonymous creation leaves it `None`.
#[derive(Clone, Debug)]
pub struct RequestCmd {
    pub requester_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub requested_item: String,
    pub quantity: String,
    pub location: String,
    pub description: Option<String>,
    pub needed_by: DateTime<Utc>,
    pub created_by: Option<String>,
}

impl Engine {
    /// Create a food request and return its id.
    ///
    /// The quantity string is stored as given; a quantity without digits is
    /// accepted and aggregates as 0 rather than blocking creation.
    pub async fn create_request(&self, cmd: RequestCmd) -> ResultEngine<FoodRequest> {
        let request = FoodRequest {
            id: Uuid::new_v4(),
            requester_name: normalize_required_text(&cmd.requester_name, "requester name")?,
            phone: validate_phone(&cmd.phone)?,
            email: validate_optional_email(cmd.email.as_deref())?,
            organization: normalize_optional_text(cmd.organization.as_deref()),
            requested_item: normalize_required_text(&cmd.requested_item, "requested item")?,
            quantity: normalize_required_text(&cmd.quantity, "quantity")?,
            location: normalize_required_text(&cmd.location, "location")?,
            description: normalize_optional_text(cmd.description.as_deref()),
            needed_by: cmd.needed_by,
            status: requests::STATUS_ACTIVE.to_string(),
            created_by: cmd.created_by,
            created_at: Utc::now(),
        };

        requests::ActiveModel::from(&request)
            .insert(&self.database)
            .await?;

        Ok(request)
    }

    /// List non-expired requests, newest first, each with its aggregate.
    ///
    /// Requests whose `needed_by` has passed vanish from the view even
    /// though their rows remain in storage.
    pub async fn open_requests(&self) -> ResultEngine<Vec<(FoodRequest, Aggregate)>> {
        let now = Utc::now();
        let models = requests::Entity::find()
            .filter(requests::Column::NeededBy.gte(now))
            .order_by_desc(requests::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
        let mut pledged: HashMap<String, Vec<String>> = HashMap::new();
        if !ids.is_empty() {
            for pledge in pledges::Entity::find()
                .filter(pledges::Column::RequestId.is_in(ids))
                .all(&self.database)
                .await?
            {
                pledged
                    .entry(pledge.request_id)
                    .or_default()
                    .push(pledge.pledged_quantity);
            }
        }

        models
            .into_iter()
            .map(|model| {
                let quantities = pledged.remove(&model.id).unwrap_or_default();
                let aggregate =
                    Aggregate::compute(&model.quantity, quantities.iter().map(String::as_str));
                Ok((FoodRequest::try_from(model)?, aggregate))
            })
            .collect()
    }

    /// Return one non-expired request with its aggregate.
    ///
    /// The read path does not distinguish expired from missing: both answer
    /// `KeyNotFound`. Only pledge admission reports expiry separately.
    pub async fn request_with_aggregate(
        &self,
        request_id: Uuid,
    ) -> ResultEngine<(FoodRequest, Aggregate)> {
        let now = Utc::now();
        let model = requests::Entity::find_by_id(request_id.to_string())
            .filter(requests::Column::NeededBy.gte(now))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("request not exists".to_string()))?;

        let quantities: Vec<String> = pledges::Entity::find()
            .filter(pledges::Column::RequestId.eq(model.id.clone()))
            .all(&self.database)
            .await?
            .into_iter()
            .map(|pledge| pledge.pledged_quantity)
            .collect();

        let aggregate = Aggregate::compute(&model.quantity, quantities.iter().map(String::as_str));
        Ok((FoodRequest::try_from(model)?, aggregate))
    }
}
