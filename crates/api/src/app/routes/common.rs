use std::str::FromStr;

use axum::response::Response;

use storefront_core::DomainError;

use crate::app::errors;

/// Parse a path segment into a typed id, answering 400 on failure.
pub fn parse_id<T>(raw: &str) -> Result<T, Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(errors::domain_error_to_response)
}
