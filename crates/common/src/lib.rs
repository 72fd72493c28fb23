/// Common types and utilities for eventgen
pub mod envelope;

use std::fmt;

/// Error type for binding generation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or missing configuration or ABI input
    #[error("Configuration error: {0}")]
    Config(String),

    /// ABI document could not be interpreted
    #[error("Failed to parse ABI: {0}")]
    Parse(String),

    /// Requested event is not defined by the ABI
    #[error("Couldn't find event {identifier:?} in ABI {abi_source:?}")]
    NotFound {
        identifier: String,
        abi_source: String,
    },

    /// Bare event name matches more than one overloaded event
    #[error(
        "Event {identifier:?} is overloaded, use one of the signatures: {}",
        .candidates.join(", ")
    )]
    AmbiguousEvent {
        identifier: String,
        candidates: Vec<String>,
    },

    /// Argument type outside the supported mapping table
    #[error("Solidity type {source_type} of argument {argument:?} in event {event} not supported")]
    UnsupportedType {
        source_type: String,
        argument: String,
        event: String,
    },

    /// Two arguments of one event normalize to the same identifier
    #[error("Arguments {first:?} and {second:?} of event {event} both normalize to {name:?}")]
    NameCollision {
        event: String,
        name: String,
        first: String,
        second: String,
    },

    /// Template registration or rendering failure
    #[error("Template error: {0}")]
    Template(String),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Several errors collected in one pass
    #[error("{}", MultipleErrors(.0))]
    Multiple(Vec<Error>),
}

struct MultipleErrors<'a>(&'a [Error]);

impl fmt::Display for MultipleErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} errors:", self.0.len())?;
        for err in self.0 {
            write!(f, "\n  - {}", err)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a new not-found error
    pub fn not_found<I: Into<String>, S: Into<String>>(identifier: I, abi_source: S) -> Self {
        Error::NotFound {
            identifier: identifier.into(),
            abi_source: abi_source.into(),
        }
    }

    /// Create a new unsupported type error
    pub fn unsupported_type<T, A, E>(source_type: T, argument: A, event: E) -> Self
    where
        T: Into<String>,
        A: Into<String>,
        E: Into<String>,
    {
        Error::UnsupportedType {
            source_type: source_type.into(),
            argument: argument.into(),
            event: event.into(),
        }
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Error::Template(msg.into())
    }

    /// Wrap a list of errors, unwrapping a single one
    pub fn from_many(mut errors: Vec<Error>) -> Self {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            Error::Multiple(errors)
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON serialization error: {}", err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
