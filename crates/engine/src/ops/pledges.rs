//! Pledge admission: lifecycle guard plus ledger append.

use chrono::Utc;
use uuid::Uuid;

use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{EngineError, FoodRequest, Pledge, ResultEngine, pledges, requests};

use super::{Engine, normalize_required_text};

/// Command to pledge a quantity toward a request.
#[derive(Clone, Debug)]
pub struct PledgeCmd {
    pub request_id: Uuid,
    /// Authenticated account making the pledge.
    pub user_id: String,
    pub quantity: String,
}

/// Outcome of an admitted pledge.
///
/// Carries the requester contact fields so the caller can dispatch
/// notification emails; the engine's responsibility ends at persistence.
#[derive(Clone, Debug)]
pub struct PledgeReceipt {
    pub pledge_id: Uuid,
    pub requested_item: String,
    pub requester_name: String,
    pub requester_email: Option<String>,
}

impl Engine {
    /// Admit a pledge against a request.
    ///
    /// Checks run in a fixed order: the request must exist, must not be
    /// expired, and must not belong to the pledger. An expired self-owned
    /// request therefore reports `RequestExpired`, not `SelfPledge`.
    ///
    /// The checks and the insert run on the plain connection, not inside
    /// one transaction: two concurrent pledges may both be admitted past
    /// the requested total. `remaining` is advisory and floors at zero.
    pub async fn admit_pledge(&self, cmd: PledgeCmd) -> ResultEngine<PledgeReceipt> {
        let quantity = normalize_required_text(&cmd.quantity, "pledged quantity")?;

        let request = requests::Entity::find_by_id(cmd.request_id.to_string())
            .one(&self.database)
            .await?
            .map(FoodRequest::try_from)
            .transpose()?
            .ok_or_else(|| EngineError::KeyNotFound("request not exists".to_string()))?;

        if request.expired_at(Utc::now()) {
            return Err(EngineError::RequestExpired(
                "this request has expired".to_string(),
            ));
        }

        // Only enforced for requests created by an authenticated account.
        if request.created_by.as_deref() == Some(cmd.user_id.as_str()) {
            return Err(EngineError::SelfPledge(
                "you cannot pledge to your own request".to_string(),
            ));
        }

        let pledge = Pledge::new(cmd.request_id, cmd.user_id, quantity);
        pledges::ActiveModel::from(&pledge)
            .insert(&self.database)
            .await?;

        Ok(PledgeReceipt {
            pledge_id: pledge.id,
            requested_item: request.requested_item,
            requester_name: request.requester_name,
            requester_email: request.email,
        })
    }

    /// All pledges recorded against a request, oldest first.
    pub async fn pledges_for_request(&self, request_id: Uuid) -> ResultEngine<Vec<Pledge>> {
        pledges::Entity::find()
            .filter(pledges::Column::RequestId.eq(request_id.to_string()))
            .order_by_asc(pledges::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Pledge::try_from)
            .collect()
    }
}
