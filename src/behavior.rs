use crate::codec;
use crate::common::ValueSet;
use crate::common::bit::{self, Mask};
use crate::field_map::FieldMap;
use crate::fn_log;
use crate::ports::required::{AttributeHost, SnapshotSource};
use serde_json::{Map, Value};
use std::sync::Arc;

pub const DEFAULT_ATTRIBUTE: &str = "options";

/// Flag fields of one record.
///
/// Owns the record's decoded values; the mask itself stays on the host and is
/// read and written through [`AttributeHost`].
///
/// Until the first write, a freshly constructed record shows the field
/// defaults while the host mask keeps its raw value. Call
/// [`apply_defaults`](Bitmask::apply_defaults) to push the defaults into the
/// mask.
#[derive(Debug, Clone)]
pub struct Bitmask {
    fields: Arc<FieldMap>,
    attribute: String,
    values: ValueSet,
}

impl Bitmask {
    pub fn new(fields: Arc<FieldMap>) -> Self {
        let values = fields.defaults();
        Self {
            fields,
            attribute: DEFAULT_ATTRIBUTE.to_string(),
            values,
        }
    }

    /// Name of the host attribute holding the mask
    pub fn with_attribute(mut self, attribute: &str) -> Self {
        self.attribute = attribute.to_string();
        self
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn values(&self) -> &ValueSet {
        &self.values
    }

    /// Current mask on the host, 0 when unset
    pub fn mask<H: AttributeHost + ?Sized>(&self, host: &H) -> Mask {
        host.get_attribute(&self.attribute)
            .map(|v| bit::from_value(&v))
            .unwrap_or(bit::EMPTY)
    }

    /// Re-decodes the values from the host mask. Call after the record is loaded.
    pub fn after_find<H: AttributeHost + ?Sized>(&mut self, host: &H) {
        fn_log!("Bitmask", "after_find", &self.attribute);
        self.values = codec::decode(self.mask(host), &self.fields);
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name)
    }

    /// Writes one declared field, touching only its bits of the host mask.
    /// Returns false when `name` is not declared.
    pub fn set<H: AttributeHost + ?Sized>(&mut self, host: &mut H, name: &str, value: bool) -> bool {
        fn_log!("Bitmask", "set", name);

        let Some(b) = self.fields.bit(name) else {
            return false;
        };

        self.values.insert(name, value);
        let previous = host.get_attribute(&self.attribute);
        let current = previous.as_ref().map(bit::from_value).unwrap_or(bit::EMPTY);
        let mask = bit::set_bit(current, b, value);
        host.set_attribute(&self.attribute, bit::to_value(mask, previous.as_ref()));
        true
    }

    /// Reads a declared field, falling back to the host attribute otherwise.
    pub fn resolve<H: AttributeHost + ?Sized>(&self, host: &H, name: &str) -> Option<Value> {
        match self.values.get(name) {
            Some(checked) => Some(Value::Bool(checked)),
            None => host.get_attribute(name),
        }
    }

    /// Writes a declared field (coercing `value` to a boolean), or passes the
    /// value through to the host attribute.
    pub fn assign<H: AttributeHost + ?Sized>(&mut self, host: &mut H, name: &str, value: Value) {
        if self.fields.contains(name) {
            self.set(host, name, bit::truthy(&value));
        } else {
            host.set_attribute(name, value);
        }
    }

    /// Mass assignment of submitted data. Returns how many flag fields were written.
    pub fn load<H: AttributeHost + ?Sized>(&mut self, host: &mut H, data: &Map<String, Value>) -> usize {
        fn_log!("Bitmask", "load", &self.attribute);

        let mut written = 0;
        for (name, value) in data {
            if self.fields.contains(name) {
                written += 1;
            }
            self.assign(host, name, value.clone());
        }
        written
    }

    /// Value of a field in the last persisted mask; `None` for unknown fields.
    /// A record that was never saved reads as an all-zero mask.
    pub fn old_bit<H: SnapshotSource + ?Sized>(&self, host: &H, name: &str) -> Option<bool> {
        let old = host
            .get_old_attribute(&self.attribute)
            .map(|v| bit::from_value(&v))
            .unwrap_or(bit::EMPTY);
        codec::decode(old, &self.fields).get(name)
    }

    /// Writes the field defaults into the host mask through per-field writes.
    pub fn apply_defaults<H: AttributeHost + ?Sized>(&mut self, host: &mut H) {
        fn_log!("Bitmask", "apply_defaults", &self.attribute);

        let defaults: Vec<(String, bool)> = self
            .fields
            .fields()
            .iter()
            .map(|f| (f.name.clone(), f.default))
            .collect();
        for (name, default) in defaults {
            self.set(host, &name, default);
        }
    }

    /// Overwrites the host mask with the encoded values.
    ///
    /// Unlike per-field writes, bits not owned by any field are dropped.
    pub fn rebuild<H: AttributeHost + ?Sized>(&self, host: &mut H) -> Mask {
        fn_log!("Bitmask", "rebuild", &self.attribute);

        let mask = codec::encode(&self.values, &self.fields);
        let previous = host.get_attribute(&self.attribute);
        host.set_attribute(&self.attribute, bit::to_value(mask, previous.as_ref()));
        mask
    }

    /// Replaces the values of the given fields and rebuilds the mask from the
    /// full value set. Undeclared names are ignored.
    pub fn replace<H: AttributeHost + ?Sized>(&mut self, host: &mut H, values: &ValueSet) -> Mask {
        for (name, checked) in values.iter() {
            if self.fields.contains(name) {
                self.values.insert(name, checked);
            }
        }
        self.rebuild(host)
    }
}
