//! Derived pledge totals for a request.
//!
//! An [`Aggregate`] is never persisted: it is recomputed from the full
//! pledge set on every read, so it always reflects the latest committed
//! pledges as of that read.

use serde::{Deserialize, Serialize};

use crate::quantity::parse_quantity;

/// Requested, pledged and remaining totals for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub requested_total: i64,
    pub pledged_total: i64,
    /// `max(0, requested_total - pledged_total)`. Over-pledging is allowed;
    /// remaining floors at zero and is advisory only.
    pub remaining: i64,
}

impl Aggregate {
    /// Compute totals from the request quantity and all pledged quantities.
    pub fn compute<'a, I>(requested_quantity: &str, pledged_quantities: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let requested_total = parse_quantity(requested_quantity);
        let pledged_total = pledged_quantities.into_iter().map(parse_quantity).sum();

        Self {
            requested_total,
            pledged_total,
            remaining: (requested_total - pledged_total).max(0),
        }
    }
}
