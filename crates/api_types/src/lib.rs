//! Shared request/response types for the HopeHUB API.
//!
//! Request bodies use camelCase field names; response data keeps the
//! snake_case column names of the underlying rows. Both conventions are
//! kept as-is for compatibility with existing clients.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response envelope carried by every route: `{success, data?, message?}`.
///
/// Absent fields are omitted from the JSON rather than serialized as null.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

pub mod food_request {
    use super::*;

    /// Body of `POST /food-requests`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FoodRequestNew {
        pub requester_name: String,
        pub phone: String,
        pub email: Option<String>,
        pub organization: Option<String>,
        pub requested_item: String,
        /// Free-text quantity, e.g. "50 kg".
        pub quantity: String,
        pub location: String,
        pub description: Option<String>,
        pub needed_by: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RequestCreated {
        pub id: Uuid,
    }

    /// One fulfillment-view entry: the request row annotated with its
    /// derived totals.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FoodRequestView {
        pub id: Uuid,
        pub requester_name: String,
        pub phone: String,
        pub email: Option<String>,
        pub organization: Option<String>,
        pub requested_item: String,
        pub quantity: String,
        pub location: String,
        pub description: Option<String>,
        pub needed_by: DateTime<FixedOffset>,
        pub status: String,
        pub created_at: DateTime<FixedOffset>,
        pub requested_total: i64,
        pub pledged_total: i64,
        /// `max(0, requested_total - pledged_total)`; advisory only.
        pub remaining: i64,
    }
}

pub mod pledge {
    use super::*;

    /// Body of `POST /food-requests/{id}/pledges`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PledgeNew {
        pub quantity: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PledgeCreated {
        pub id: Uuid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_absent_fields() {
        let json = serde_json::to_value(Envelope::data(7)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 7}));

        let json = serde_json::to_value(Envelope::<()>::failure("nope")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "nope"})
        );
    }

    #[test]
    fn request_body_is_camel_case() {
        let body: food_request::FoodRequestNew = serde_json::from_value(serde_json::json!({
            "requesterName": "Asha",
            "phone": "0123456789",
            "requestedItem": "Rice",
            "quantity": "50 kg",
            "location": "Ward 3",
            "neededBy": "2026-09-01T00:00:00+00:00"
        }))
        .unwrap();
        assert_eq!(body.requester_name, "Asha");
        assert_eq!(body.email, None);
    }
}
