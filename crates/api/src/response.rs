//! Shared response envelope types for API handlers.
//!
//! List and detail endpoints wrap their payload in `{ "data": ... }`. The
//! `/auth` endpoints answer with bare objects (`{"exists": true}`) because
//! existing front ends read those fields directly.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A filtered listing together with the dropdown options for each facet.
///
/// Options are computed from the unfiltered set so a selection never makes
/// the other choices disappear.
#[derive(Debug, Serialize)]
pub struct FilteredList<T: Serialize> {
    pub items: Vec<T>,
    pub facets: std::collections::BTreeMap<&'static str, Vec<String>>,
}
