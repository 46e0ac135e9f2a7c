use thiserror::Error;

/// Errors that stop compilation. No partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A field required by the chosen variant is absent.
    #[error("{context}: missing required field `{field}`")]
    MissingField {
        context: String,
        field: &'static str,
    },
    /// The same physical interface is claimed by more than one uplink.
    #[error("interface {interface} is used by more than one uplink")]
    DuplicateUplink { interface: String },
}

impl CompileError {
    pub fn missing(context: impl Into<String>, field: &'static str) -> Self {
        CompileError::MissingField {
            context: context.into(),
            field,
        }
    }
}

/// Take a required optional field or fail with [`CompileError::MissingField`].
pub fn required<'a, T>(
    value: Option<&'a T>,
    context: &str,
    field: &'static str,
) -> Result<&'a T, CompileError>
where
    T: ?Sized,
{
    value.ok_or_else(|| CompileError::missing(context, field))
}

#[cfg(test)]
mod tests {
    use super::{required, CompileError};

    #[test]
    fn missing_field_message_names_the_field() {
        let err = CompileError::missing("ikev2 client", "secret");
        assert_eq!(
            err.to_string(),
            "ikev2 client: missing required field `secret`"
        );
    }

    #[test]
    fn required_passes_present_values_through() {
        let secret = Some("s3cret".to_string());
        assert_eq!(
            required(secret.as_ref(), "ctx", "secret").map(String::as_str),
            Ok("s3cret")
        );
        let absent: Option<String> = None;
        assert!(required(absent.as_ref(), "ctx", "secret").is_err());
    }
}
