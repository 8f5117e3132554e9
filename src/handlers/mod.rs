//! One handler module per resource. Handlers parse input, make exactly one
//! repository call and map the outcome onto an HTTP response.

pub mod authors;
pub mod comments;
pub mod posts;

use crate::error::ApiError;
use crate::models::Id;

/// Path ids must be positive integers; anything else is a 400 before storage
/// is touched.
pub(crate) fn parse_id(raw: &str, invalid: &'static str) -> Result<Id, ApiError> {
    raw.parse::<Id>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ApiError::BadRequest(invalid))
}
