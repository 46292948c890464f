//! Conversion between a mask and its named boolean view.
//!
//! `decode` and `encode` are inverses only over masks built from declared
//! fields. `encode` rebuilds the mask from the field map alone, so foreign
//! bits never survive it; per-field writes go through
//! [`bit::set_bit`](crate::common::bit::set_bit) on the live mask instead and
//! keep them.

use crate::common::ValueSet;
use crate::common::bit::{self, Mask};
use crate::field_map::FieldMap;

/// Decodes `mask` into one entry per declared field.
///
/// # Examples
///
/// ```
/// use bitmask_fields::{FieldMap, FieldEntry, codec};
///
/// let fields = FieldMap::new([("spam", FieldEntry::Bit(1)), ("deleted", FieldEntry::Bit(2))]).unwrap();
/// let values = codec::decode(0b10, &fields);
///
/// assert_eq!(values.get("spam"), Some(false));
/// assert_eq!(values.get("deleted"), Some(true));
/// ```
pub fn decode(mask: Mask, fields: &FieldMap) -> ValueSet {
    fields
        .bits()
        .map(|(name, b)| (name, bit::is_set(mask, b)))
        .collect()
}

/// Encodes `values` into a mask.
///
/// Only declared fields set to true contribute. Undeclared names are ignored.
///
/// # Examples
///
/// ```
/// use bitmask_fields::{FieldMap, FieldEntry, ValueSet, codec};
///
/// let fields = FieldMap::new([("spam", FieldEntry::Bit(1)), ("deleted", FieldEntry::Bit(2))]).unwrap();
/// let values: ValueSet = [("spam", true), ("deleted", false), ("ghost", true)].into_iter().collect();
///
/// assert_eq!(codec::encode(&values, &fields), 1);
/// ```
pub fn encode(values: &ValueSet, fields: &FieldMap) -> Mask {
    values
        .iter()
        .filter(|(_, checked)| *checked)
        .filter_map(|(name, _)| fields.bit(name))
        .fold(bit::EMPTY, |acc, b| acc | b)
}
