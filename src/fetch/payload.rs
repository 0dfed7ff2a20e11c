//! Decoding of the pricing endpoint's HTTP response.

use crate::domain::error::{Result, SkipHireError};
use crate::domain::Offering;
use serde_json::Value;

/// Turns an HTTP status and body into a list of offerings.
///
/// # Errors
///
/// - [`SkipHireError::HttpStatus`] for any non-2xx status
/// - [`SkipHireError::MalformedPayload`] if the body is not a JSON array, a
///   record is missing a required field, or a record fails
///   [`Offering::validate`]
///
/// # Examples
///
/// ```
/// use skiphire::fetch::parse_response;
///
/// let body = br#"[{"id": 1, "size": 4, "hire_period_days": 14, "price_before_vat": 211, "vat": 20}]"#;
/// let offerings = parse_response(200, body).unwrap();
/// assert_eq!(offerings[0].size, 4);
///
/// assert!(parse_response(503, b"").is_err());
/// ```
pub fn parse_response(status: u16, body: &[u8]) -> Result<Vec<Offering>> {
    if !(200..300).contains(&status) {
        return Err(SkipHireError::HttpStatus(status));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| SkipHireError::MalformedPayload(format!("response is not JSON: {e}")))?;

    let Value::Array(records) = value else {
        return Err(SkipHireError::MalformedPayload(
            "expected a list of offerings".to_string(),
        ));
    };

    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let offering: Offering = serde_json::from_value(record).map_err(|e| {
                SkipHireError::MalformedPayload(format!("record {idx}: {e}"))
            })?;
            offering.validate()?;
            Ok(offering)
        })
        .collect()
}
