use crate::ports::required::Record;

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MissingFields,
    MissingBit(String),
    InvalidBit(String),
    DuplicateField(String),
    UnknownField(String),
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingFields        => write!(f, "MissingFields: the \"fields\" property must be set"),
            ConfigError::MissingBit(name)     => write!(f, "MissingBit: the \"{}\" field must have a bit mask", name),
            ConfigError::InvalidBit(name)     => write!(f, "InvalidBit: the \"{}\" field bit must be a positive integer", name),
            ConfigError::DuplicateField(name) => write!(f, "DuplicateField: {}", name),
            ConfigError::UnknownField(name)   => write!(f, "UnknownField: {}", name),
            ConfigError::ParseError(msg)      => write!(f, "ParseError: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A check run against a record before it is persisted.
pub trait Validator {
    /// Runs the check once.
    ///
    /// Failures are appended to the record through its `ErrorSink` and
    /// reported as `false`; the record itself is never modified otherwise.
    fn validate(&self, record: &mut dyn Record) -> bool;
}
