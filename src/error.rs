// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Service(ServiceError),
}

/// Specific error types for media service failures.
/// Used to decide whether a failure aborts the whole render pass or
/// only skips the affected item.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The requested source name is not present in the registry.
    UnknownSource(String),

    /// The source exists but the requested item does not.
    NotFound { source: String, item: String },

    /// The service could not be reached or the transfer failed mid-way.
    Transport(String),

    /// The item was retrieved but its payload could not be decoded.
    Decode(String),
}

impl ServiceError {
    /// Returns `true` if this failure only affects a single item.
    ///
    /// The render loop catches these, notes the item, and continues with
    /// its siblings. An unknown source aborts the whole pass instead.
    #[must_use]
    pub fn skips_item(&self) -> bool {
        match self {
            ServiceError::UnknownSource(_) => false,
            ServiceError::NotFound { .. }
            | ServiceError::Transport(_)
            | ServiceError::Decode(_) => true,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::UnknownSource(name) => write!(f, "Unknown media source: {}", name),
            ServiceError::NotFound { source, item } => {
                write!(f, "Item {} not found in source {}", item, source)
            }
            ServiceError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ServiceError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Service(e) => write!(f, "Service Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ServiceError> for Error {
    fn from(err: ServiceError) -> Self {
        Error::Service(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn unknown_source_aborts_the_pass() {
        let err = ServiceError::UnknownSource("vacation".into());
        assert!(!err.skips_item());
    }

    #[test]
    fn per_item_errors_are_skippable() {
        assert!(ServiceError::NotFound {
            source: "photos".into(),
            item: "a.jpg".into(),
        }
        .skips_item());
        assert!(ServiceError::Transport("connection reset".into()).skips_item());
        assert!(ServiceError::Decode("truncated jpeg".into()).skips_item());
    }

    #[test]
    fn service_error_wraps_into_error() {
        let err: Error = ServiceError::Transport("timeout".into()).into();
        assert!(matches!(err, Error::Service(ServiceError::Transport(_))));
        assert!(format!("{}", err).contains("timeout"));
    }

    #[test]
    fn not_found_display_names_source_and_item() {
        let err = ServiceError::NotFound {
            source: "photos".into(),
            item: "a.jpg".into(),
        };
        let rendered = format!("{}", err);
        assert!(rendered.contains("photos"));
        assert!(rendered.contains("a.jpg"));
    }
}
