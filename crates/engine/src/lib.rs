//! Pledge aggregation engine for HopeHUB.
//!
//! The engine tracks food requests, accumulates partial pledges from donors
//! against them, and derives remaining need. It owns the `food_requests`
//! and `food_request_pledges` tables; everything else (auth, notification
//! delivery, HTTP) lives in the server crate.

pub use aggregate::Aggregate;
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder, PledgeCmd, PledgeReceipt, RequestCmd};
pub use pledges::Pledge;
pub use quantity::parse_quantity;
pub use requests::FoodRequest;

mod aggregate;
mod error;
mod ops;
mod pledges;
mod quantity;
mod requests;

type ResultEngine<T> = Result<T, EngineError>;
