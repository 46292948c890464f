// Required Ports - capabilities the host record must provide
use serde_json::Value;
use std::collections::HashMap;

/// Generic attribute storage of the host record.
///
/// Holds the integer mask attribute, and doubles as the fallback for names
/// that are not declared flag fields.
pub trait AttributeHost {
    /// Current value of an attribute, `None` when the host has no such attribute
    fn get_attribute(&self, name: &str) -> Option<Value>;

    /// Writes an attribute
    fn set_attribute(&mut self, name: &str, value: Value);
}

/// Snapshot of attribute values as they were last persisted.
pub trait SnapshotSource {
    /// Persisted value of an attribute.
    /// `None` for records that were never saved.
    fn get_old_attribute(&self, name: &str) -> Option<Value>;
}

/// Error collection of the host record.
pub trait ErrorSink {
    /// Appends a validation error.
    ///
    /// `message` is already interpolated; `params` holds the values that were
    /// substituted into it.
    fn report(&mut self, attribute: &str, message: &str, params: &HashMap<String, String>);
}

/// A host record usable by validators.
pub trait Record: AttributeHost + SnapshotSource + ErrorSink {}

impl<T: AttributeHost + SnapshotSource + ErrorSink + ?Sized> Record for T {}
