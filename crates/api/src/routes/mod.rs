pub mod artists;
pub mod commissions;
pub mod customers;
pub mod health;
pub mod metrics;

use std::fmt::Display;
use std::str::FromStr;

use crate::error::ApiError;

/// Parses a path segment into a typed identifier.
fn parse_id<T>(id: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: Display,
{
    id.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))
}
