//! Food request endpoints: creation and the fulfillment view.

use api_types::{
    Envelope,
    food_request::{FoodRequestNew, FoodRequestView, RequestCreated},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    ServerError,
    server::{ServerState, lookup_user},
    user,
};
use engine::{Aggregate, EngineError, FoodRequest, RequestCmd};

fn view(request: FoodRequest, aggregate: Aggregate) -> FoodRequestView {
    FoodRequestView {
        id: request.id,
        requester_name: request.requester_name,
        phone: request.phone,
        email: request.email,
        organization: request.organization,
        requested_item: request.requested_item,
        quantity: request.quantity,
        location: request.location,
        description: request.description,
        needed_by: request.needed_by.fixed_offset(),
        status: request.status,
        created_at: request.created_at.fixed_offset(),
        requested_total: aggregate.requested_total,
        pledged_total: aggregate.pledged_total,
        remaining: aggregate.remaining,
    }
}

pub(crate) fn parse_request_id(raw: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(raw)
        .map_err(|_| EngineError::KeyNotFound("request not exists".to_string()).into())
}

/// Create a food request. Authentication is optional here: an authenticated
/// caller becomes the request's creator (and is barred from pledging to it);
/// anonymous creation leaves `created_by` unset.
pub async fn create(
    State(state): State<ServerState>,
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    Json(payload): Json<FoodRequestNew>,
) -> Result<(StatusCode, Json<Envelope<RequestCreated>>), ServerError> {
    let created_by = match auth_header {
        Some(header) => Some(
            lookup_user(&state.db, header.username(), header.password())
                .await
                .map_err(|_| ServerError::Unauthorized)?
                .username,
        ),
        None => None,
    };

    let request = state
        .engine
        .create_request(RequestCmd {
            requester_name: payload.requester_name,
            phone: payload.phone,
            email: payload.email,
            organization: payload.organization,
            requested_item: payload.requested_item,
            quantity: payload.quantity,
            location: payload.location,
            description: payload.description,
            needed_by: payload.needed_by.with_timezone(&Utc),
            created_by,
        })
        .await?;

    let request_id = request.id;

    // Broadcast to registered users after the row is durable; delivery
    // failure never fails the request itself.
    let notifier = state.notifier.clone();
    let db = state.db.clone();
    tokio::spawn(async move {
        let recipients = match user::Entity::find()
            .filter(user::Column::Email.is_not_null())
            .all(&db)
            .await
        {
            Ok(users) => users.into_iter().filter_map(|u| u.email).collect::<Vec<_>>(),
            Err(err) => {
                tracing::warn!("failed to load broadcast recipients: {err}");
                return;
            }
        };
        notifier
            .request_created(
                &request.requester_name,
                &request.requested_item,
                &request.quantity,
                request.organization.as_deref().unwrap_or("Individual"),
                &recipients,
            )
            .await;
    });

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(RequestCreated { id: request_id })),
    ))
}

/// List non-expired requests, newest first, with their aggregates.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<FoodRequestView>>>, ServerError> {
    let views = state
        .engine
        .open_requests()
        .await?
        .into_iter()
        .map(|(request, aggregate)| view(request, aggregate))
        .collect();

    Ok(Json(Envelope::data(views)))
}

/// One request with its aggregate. Missing and expired ids both answer 404.
pub async fn get_detail(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<FoodRequestView>>, ServerError> {
    let request_id = parse_request_id(&id)?;
    let (request, aggregate) = state.engine.request_with_aggregate(request_id).await?;

    Ok(Json(Envelope::data(view(request, aggregate))))
}
