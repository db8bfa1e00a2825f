//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, PageRequest};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    BlankField,
    InvalidEmail,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BlankField => "blank_field",
            ErrorCode::InvalidEmail => "invalid_email",
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

/// Reject empty or whitespace-only values.
pub(crate) fn require_non_blank(value: &str, field: FieldName) -> Result<(), Error> {
    if value.trim().is_empty() {
        let name = field.as_str();
        return Err(field_error(
            field,
            format!("{name} must not be blank"),
            ErrorCode::BlankField,
        ));
    }
    Ok(())
}

/// Minimal shape check; real deliverability is out of scope.
pub(crate) fn require_email_shape(value: &str, field: FieldName) -> Result<(), Error> {
    require_non_blank(value, field)?;
    let well_formed = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        let name = field.as_str();
        return Err(field_error(
            field,
            format!("{name} must be a valid email address"),
            ErrorCode::InvalidEmail,
        ));
    }
    Ok(())
}

/// Resolve optional `from`/`size` query parameters against their defaults.
pub(crate) fn page_from_query(
    from: Option<i64>,
    size: Option<i64>,
) -> Result<PageRequest, Error> {
    PageRequest::new(from.unwrap_or(0), size.unwrap_or(10))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_values_are_rejected_with_field_details(#[case] value: &str) {
        let error =
            require_non_blank(value, FieldName::new("name")).expect_err("blank rejected");
        let details = error.details().expect("details");
        assert_eq!(
            details.get("field").and_then(Value::as_str),
            Some("name")
        );
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("blank_field")
        );
    }

    #[rstest]
    #[case("plainaddress")]
    #[case("@no-local.part")]
    #[case("no-domain@")]
    #[case("no-dot@domain")]
    fn malformed_emails_are_rejected(#[case] value: &str) {
        let error =
            require_email_shape(value, FieldName::new("email")).expect_err("malformed rejected");
        assert!(error.details().is_some());
    }

    #[test]
    fn well_formed_email_passes() {
        require_email_shape("ada@example.com", FieldName::new("email")).expect("accepted");
    }
}
