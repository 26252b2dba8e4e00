pub mod customers;
pub mod order_items;
pub mod orders;
pub mod products;

use std::str::FromStr;

use actix_web::http::header;
use actix_web::HttpResponse;
use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::errors::AppError;

/// Parses a decimal sent as a string (e.g. "9.99") so that money never goes
/// through a float.
pub(crate) fn parse_decimal(field: &str, raw: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid {} '{}': {}", field, raw, e)))
}

/// 201 with a `Location` header pointing at the new resource.
pub(crate) fn created<T: Serialize>(location: String, body: &T) -> HttpResponse {
    HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(body)
}

#[cfg(test)]
mod tests {
    use super::parse_decimal;
    use crate::errors::AppError;

    #[test]
    fn parse_decimal_accepts_plain_and_padded_values() {
        assert_eq!(parse_decimal("price", " 19.90 ").unwrap().to_string(), "19.90");
        assert_eq!(parse_decimal("price", "7").unwrap().to_string(), "7");
    }

    #[test]
    fn parse_decimal_rejects_garbage() {
        let err = parse_decimal("price", "cheap").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("price")));
    }
}
