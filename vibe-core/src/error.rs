use std::{error, fmt, io};

use crate::route::Param;

/// Errors are kept as plain strings so they can be cloned into view state and
/// compared between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Transport(String),
    Status(u16),
    Graphql(Vec<String>),
    UnexpectedResponse,
    MissingParam(Param),
    JsonError(String),
    ConfigError(String),
    IoError(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "Network error: {err}"),
            Self::Status(code) => write!(f, "Server responded with status {code}"),
            Self::Graphql(messages) => f.write_str(&messages.join("; ")),
            Self::UnexpectedResponse => write!(f, "Unknown server response"),
            Self::MissingParam(param) => write!(f, "{param} is missing."),
            Self::ConfigError(err) => write!(f, "Invalid configuration: {err}"),
            Self::JsonError(err) | Self::IoError(err) => f.write_str(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::JsonError(err.to_string())
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Error {
        match err {
            ureq::Error::StatusCode(code) => Error::Status(code),
            err => Error::Transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_messages_are_joined() {
        let err = Error::Graphql(vec!["first".into(), "second".into()]);
        assert_eq!(err.to_string(), "first; second");
    }

    #[test]
    fn missing_param_reads_like_a_sentence() {
        assert_eq!(
            Error::MissingParam(Param::BrandId).to_string(),
            "Brand ID is missing."
        );
    }
}
