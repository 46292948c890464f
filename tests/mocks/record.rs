// In-memory host record
use bitmask_fields::ports::required::{AttributeHost, ErrorSink, SnapshotSource};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct MockError {
    pub attribute: String,
    pub message: String,
    pub params: HashMap<String, String>,
}

#[derive(Default)]
pub struct MockRecord {
    pub attributes: HashMap<String, Value>,
    pub old_attributes: Option<HashMap<String, Value>>,
    pub errors: Vec<MockError>,
}

#[allow(dead_code)]
impl MockRecord {
    /// Record that was never persisted
    pub fn new() -> Self {
        Self::default()
    }

    /// Record as fetched from storage: current == persisted
    pub fn found(attributes: &[(&str, Value)]) -> Self {
        let attributes: HashMap<String, Value> = attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Self {
            old_attributes: Some(attributes.clone()),
            attributes,
            errors: Vec::new(),
        }
    }

    /// Persists current attributes when there are no errors
    pub fn save(&mut self) -> bool {
        if !self.errors.is_empty() {
            return false;
        }
        self.old_attributes = Some(self.attributes.clone());
        true
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

impl AttributeHost for MockRecord {
    fn get_attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: Value) {
        self.attributes.insert(name.to_string(), value);
    }
}

impl SnapshotSource for MockRecord {
    fn get_old_attribute(&self, name: &str) -> Option<Value> {
        self.old_attributes.as_ref()?.get(name).cloned()
    }
}

impl ErrorSink for MockRecord {
    fn report(&mut self, attribute: &str, message: &str, params: &HashMap<String, String>) {
        self.errors.push(MockError {
            attribute: attribute.to_string(),
            message: message.to_string(),
            params: params.clone(),
        });
    }
}
