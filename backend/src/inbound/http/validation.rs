//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every client-side failure is an `invalid_request` error whose `details`
//! carry `field` and a machine-readable `code`, plus the offending `value`
//! where echoing it back is useful.

use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::{Error, ItemName, ItemNameValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyName,
    NameTooLong,
    InvalidUuid,
    InvalidAssignedOnly,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyName => "empty_name",
            Self::NameTooLong => "name_too_long",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidAssignedOnly => "invalid_assigned_only",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

/// `invalid_request` with `{field, code}` details and optional extras.
pub(crate) fn field_error(
    field: &str,
    code: &str,
    message: impl Into<String>,
    extra: Option<(&str, Value)>,
) -> Error {
    let mut details = json!({ "field": field, "code": code });
    if let (Some((key, value)), Some(map)) = (extra, details.as_object_mut()) {
        map.insert(key.to_owned(), value);
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField.as_str(),
        format!("missing required field: {field}"),
        None,
    )
}

/// Require an optional body field.
pub(crate) fn required<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Validate a tag or ingredient name supplied under `field`.
pub(crate) fn parse_item_name(raw: &str, field: FieldName) -> Result<ItemName, Error> {
    ItemName::new(raw).map_err(|err| {
        let code = match err {
            ItemNameValidationError::Empty => ErrorCode::EmptyName,
            ItemNameValidationError::TooLong { .. } => ErrorCode::NameTooLong,
        };
        field_error(field.as_str(), code.as_str(), err.to_string(), None)
    })
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ErrorCode::InvalidUuid.as_str(),
        format!("{field} must be a valid UUID"),
        Some(("value", json!(value))),
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse a comma-separated id list such as `?tags=<uuid>,<uuid>`.
///
/// Empty segments are ignored so `?tags=` means no filter.
pub(crate) fn parse_uuid_csv(raw: Option<&str>, field: FieldName) -> Result<Vec<Uuid>, Error> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, segment)| {
            Uuid::parse_str(segment).map_err(|_| {
                field_error(
                    field.as_str(),
                    ErrorCode::InvalidUuid.as_str(),
                    format!("{} must contain valid UUIDs", field.as_str()),
                    Some(("index", json!(index))),
                )
            })
        })
        .collect()
}

pub(crate) fn invalid_assigned_only_error(value: &str) -> Error {
    field_error(
        "assigned_only",
        ErrorCode::InvalidAssignedOnly.as_str(),
        "assigned_only must be an integer",
        Some(("value", json!(value))),
    )
}
