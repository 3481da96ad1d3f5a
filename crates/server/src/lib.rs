use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use notify::{EmailSettings, Notifier};
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod notify;
mod pledges;
mod requests;
mod server;
mod user;

pub mod types {
    pub use api_types::Envelope;

    pub mod food_request {
        pub use api_types::food_request::{FoodRequestNew, FoodRequestView, RequestCreated};
    }

    pub mod pledge {
        pub use api_types::pledge::{PledgeCreated, PledgeNew};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Unauthorized,
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::RequestExpired(_) | EngineError::SelfPledge(_) => StatusCode::BAD_REQUEST,
        EngineError::InvalidField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(api_types::Envelope::<()>::failure(message))).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_expired_maps_to_400() {
        let res = ServerError::from(EngineError::RequestExpired("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_self_pledge_maps_to_400() {
        let res = ServerError::from(EngineError::SelfPledge("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidField("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let res = ServerError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
