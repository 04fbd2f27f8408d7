//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, ProgramKind, RewardKind};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    EmptyValue,
    InvalidUuid,
    InvalidChoice,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyValue => "empty_value",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidChoice => "invalid_choice",
            ErrorCode::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn value_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn require_non_empty(value: String, field: FieldName) -> Result<String, Error> {
    if value.trim().is_empty() {
        let name = field.as_str();
        return Err(field_error(
            field,
            format!("{name} must not be empty"),
            ErrorCode::EmptyValue,
        ));
    }
    Ok(value)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        let name = field.as_str();
        value_error(
            field,
            format!("{name} must be a valid UUID"),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

pub(crate) fn parse_reward_kind(value: &str, field: FieldName) -> Result<RewardKind, Error> {
    value.parse().map_err(|_| {
        let name = field.as_str();
        value_error(
            field,
            format!("{name} must be one of: discount, shipping, access, product"),
            ErrorCode::InvalidChoice,
            value,
        )
    })
}

pub(crate) fn parse_program_kind(value: &str, field: FieldName) -> Result<ProgramKind, Error> {
    value.parse().map_err(|_| {
        let name = field.as_str();
        value_error(
            field,
            format!("{name} must be one of: points, cash"),
            ErrorCode::InvalidChoice,
            value,
        )
    })
}

pub(crate) fn require_positive(value: i64, field: FieldName) -> Result<i64, Error> {
    if value <= 0 {
        let name = field.as_str();
        return Err(value_error(
            field,
            format!("{name} must be positive"),
            ErrorCode::OutOfRange,
            &value.to_string(),
        ));
    }
    Ok(value)
}

/// Distinguish an absent JSON field from an explicit `null` when
/// deserialising into `Option<Option<T>>`: pair with `#[serde(default)]` so
/// absence stays `None` while `null` becomes `Some(None)`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use serde_json::Value;

    use super::*;

    #[test]
    fn uuid_errors_carry_field_and_value_details() {
        let err = parse_uuid("not-a-uuid", FieldName::new("rewardId")).expect_err("rejected");
        let details = err.details().expect("details present");
        assert_eq!(
            details.get("field").and_then(Value::as_str),
            Some("rewardId")
        );
        assert_eq!(
            details.get("value").and_then(Value::as_str),
            Some("not-a-uuid")
        );
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_uuid")
        );
    }

    #[test]
    fn kind_parsers_accept_known_choices() {
        assert_eq!(
            parse_reward_kind("shipping", FieldName::new("kind")).expect("parsed"),
            RewardKind::Shipping
        );
        assert_eq!(
            parse_program_kind("points", FieldName::new("kind")).expect("parsed"),
            ProgramKind::Points
        );
    }

    #[test]
    fn non_positive_point_costs_are_rejected() {
        let err = require_positive(0, FieldName::new("pointCost")).expect_err("rejected");
        let details = err.details().expect("details present");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("out_of_range")
        );
    }

    #[test]
    fn double_option_distinguishes_null_from_absent() {
        #[derive(serde::Deserialize)]
        struct Patch {
            #[serde(default, deserialize_with = "double_option")]
            description: Option<Option<String>>,
        }

        let absent: Patch = serde_json::from_str("{}").expect("deserialise");
        assert_eq!(absent.description, None);

        let cleared: Patch = serde_json::from_str(r#"{"description":null}"#).expect("deserialise");
        assert_eq!(cleared.description, Some(None));

        let set: Patch = serde_json::from_str(r#"{"description":"hi"}"#).expect("deserialise");
        assert_eq!(set.description, Some(Some("hi".to_owned())));
    }
}
