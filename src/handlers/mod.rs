// src/handlers/mod.rs
pub mod error;
pub mod export;
pub mod impacts;
pub mod policy_impacts;
pub mod reforms;

use crate::models::ScoringType;
use error::ApiError;

pub(crate) fn parse_scoring(raw: &str) -> Result<ScoringType, warp::Rejection> {
    raw.parse::<ScoringType>()
        .map_err(|e| warp::reject::custom(ApiError::bad_request(e)))
}
