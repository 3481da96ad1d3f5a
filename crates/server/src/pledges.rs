//! Pledge endpoint: guarded admission plus notification dispatch.

use api_types::{
    Envelope,
    pledge::{PledgeCreated, PledgeNew},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, requests::parse_request_id, server::ServerState, user};
use engine::PledgeCmd;

/// Admit a pledge against a request. Requires authentication; the engine
/// rejects missing, expired, and self-owned requests in that order.
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PledgeNew>,
) -> Result<(StatusCode, Json<Envelope<PledgeCreated>>), ServerError> {
    let request_id = parse_request_id(&id)?;
    let quantity = payload.quantity.clone();

    let receipt = state
        .engine
        .admit_pledge(PledgeCmd {
            request_id,
            user_id: user.username,
            quantity: payload.quantity,
        })
        .await?;

    let pledge_id = receipt.pledge_id;

    // The pledge row is durable at this point; email failure is logged by
    // the notifier and never surfaces to the caller.
    let notifier = state.notifier.clone();
    let pledger_email = user.email;
    tokio::spawn(async move {
        if let Some(email) = &pledger_email {
            notifier
                .pledge_confirmation(email, &quantity, &receipt.requested_item)
                .await;
        }
        if let Some(email) = &receipt.requester_email {
            notifier
                .pledge_received(email, &quantity, &receipt.requested_item)
                .await;
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(PledgeCreated { id: pledge_id })),
    ))
}
