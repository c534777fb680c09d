// Convert venue wire strings into validated price levels.
// One bad entry rejects the whole side; callers turn that into an empty venue.

use crate::engine::types::PriceLevel;
use crate::error::{FetchError, FetchResult};

pub fn parse_price(s: &str) -> FetchResult<f64> {
    let price = parse_number("price", s)?;
    if price <= 0.0 {
        return Err(invalid("price", s, "must be positive"));
    }
    Ok(price)
}

pub fn parse_size(s: &str) -> FetchResult<f64> {
    let size = parse_number("size", s)?;
    if size < 0.0 {
        return Err(invalid("size", s, "must not be negative"));
    }
    Ok(size)
}

pub fn level(price: &str, size: &str) -> FetchResult<PriceLevel> {
    Ok(PriceLevel::new(parse_price(price)?, parse_size(size)?))
}

/// Normalise a full side; the first invalid entry fails it.
pub fn side<'a, I>(raw: I) -> FetchResult<Vec<PriceLevel>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    raw.into_iter().map(|(price, size)| level(price, size)).collect()
}

fn parse_number(field: &'static str, s: &str) -> FetchResult<f64> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| invalid(field, s, "not a number"))?;
    if !value.is_finite() {
        return Err(invalid(field, s, "not finite"));
    }
    Ok(value)
}

fn invalid(field: &'static str, value: &str, reason: &'static str) -> FetchError {
    FetchError::InvalidLevel { field, value: value.to_string(), reason }
}
