//! Error types and result alias for the crate.
//!
//! Circuit generation itself never fails: validators repair in place and the
//! retry loop degrades to the best attempt. Errors exist only for
//! misconfigured inputs caught by the `validate` methods.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "boom"));
    }

    #[test]
    fn invalid_config_displays_reason() {
        let err = Error::InvalidConfig("point_spacing must be > 0".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: point_spacing must be > 0"
        );
    }
}
