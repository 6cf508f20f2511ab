//! Crate error type
//!
//! The simulation itself never fails; everything here comes from a front end
//! (terminal, browser) or from reading settings.

use core::fmt;

#[derive(Debug)]
pub enum Error {
    /// Terminal or filesystem I/O failed
    Io(std::io::Error),
    /// Browser API failed (DOM lookup, canvas context, listener registration)
    Platform(String),
    /// Settings file could not be parsed
    SettingsParse(serde_json::Error),
    /// Settings parsed but a value is out of range
    InvalidSettings { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Platform(msg) => write!(f, "platform error: {msg}"),
            Self::SettingsParse(e) => write!(f, "malformed settings: {e}"),
            Self::InvalidSettings { field, reason } => {
                write!(f, "invalid setting `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::SettingsParse(e) => Some(e),
            Self::Platform(_) | Self::InvalidSettings { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::SettingsParse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_field() {
        let err = Error::InvalidSettings {
            field: "key_repeat_interval_ms",
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid setting `key_repeat_interval_ms`: must be greater than zero"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;
        let err = Error::from(std::io::Error::other("tty gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("tty gone"));
    }
}
