/**
 * Routes Module
 * API route handlers
 */

pub mod auth;
pub mod blog;
pub mod calculator;
pub mod content;
pub mod health;
pub mod projects;
pub mod seo;
pub mod services;
pub mod settings;

use crate::error::ApiError;

/// Parse a numeric id path segment, rejecting anything else as a 400 on `id`.
pub(crate) fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::invalid_field("id", "id must be a number"))
}

/// First blank `(field, value)` pair, reported as a 400 on that field.
pub(crate) fn require_non_blank(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(ApiError::invalid_field(field, format!("{field} is required"))),
        None => Ok(()),
    }
}

/// Like `require_non_blank`, but only for the fields a partial update supplies.
pub(crate) fn reject_blank_updates(fields: &[(&str, Option<&str>)]) -> Result<(), ApiError> {
    match fields
        .iter()
        .find(|(_, value)| value.is_some_and(|v| v.trim().is_empty()))
    {
        Some((field, _)) => Err(ApiError::invalid_field(field, format!("{field} cannot be blank"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        match parse_id("some-slug") {
            Err(ApiError::Validation { field, .. }) => assert_eq!(field.as_deref(), Some("id")),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(parse_id("99999999999").is_err());
    }

    #[test]
    fn test_blank_checks() {
        assert!(require_non_blank(&[("titleEn", "x"), ("titleAr", " ")]).is_err());
        assert!(require_non_blank(&[("titleEn", "x")]).is_ok());
        assert!(reject_blank_updates(&[("titleEn", None), ("titleAr", Some("y"))]).is_ok());
        assert!(reject_blank_updates(&[("titleEn", Some(""))]).is_err());
    }
}
