//! Bit primitives over a flag mask.
//!
//! A mask is the integer column of a host record. Each declared field owns
//! one or more bits of it:
//!
//! | field     | bit    |
//! |-----------|--------|
//! | spam      | 1 << 0 |
//! | deleted   | 1 << 1 |
//! | ...       | ...    |
//!
//! Bits that no field owns are foreign bits. The functions here never look at
//! field declarations, so foreign bits pass through untouched.

use serde_json::Value;

pub type Mask = u64;

pub const EMPTY: Mask = 0;

/// Adds or removes `bit` in `mask`, returning the updated mask.
/// Every other bit of `mask` is preserved.
///
/// # Examples
///
/// ```
/// use bitmask_fields::common::bit;
///
/// let mask = bit::set_bit(0b1000, 0b0001, true);
/// assert_eq!(mask, 0b1001);
///
/// let mask = bit::set_bit(mask, 0b0001, false);
/// assert_eq!(mask, 0b1000);
///
/// // clearing an unset bit is a no-op
/// assert_eq!(bit::set_bit(0b1000, 0b0010, false), 0b1000);
/// ```
pub fn set_bit(mask: Mask, bit: Mask, present: bool) -> Mask {
    if present { mask | bit } else { mask & !bit }
}

/// True when any bit of `bit` is set in `mask`.
///
/// # Examples
///
/// ```
/// use bitmask_fields::common::bit;
///
/// assert!(bit::is_set(0b0110, 0b0010));
/// assert!(!bit::is_set(0b0110, 0b0001));
/// ```
pub fn is_set(mask: Mask, bit: Mask) -> bool {
    mask & bit != 0
}

/// Bits that differ between two masks.
///
/// # Examples
///
/// ```
/// use bitmask_fields::common::bit;
///
/// assert_eq!(bit::diff(0b0101, 0b0111), 0b0010);
/// assert_eq!(bit::diff(0b0101, 0b0101), 0);
/// ```
pub fn diff(old: Mask, current: Mask) -> Mask {
    old ^ current
}

/// Bits of `changed` that lie outside `allowed`.
///
/// # Examples
///
/// ```
/// use bitmask_fields::common::bit;
///
/// assert_eq!(bit::outside(0b0010, 0b0010), 0);
/// assert_eq!(bit::outside(0b0010, 0b0001), 0b0010);
/// ```
pub fn outside(changed: Mask, allowed: Mask) -> Mask {
    changed & !allowed
}

/// Reads a mask out of a host attribute value.
///
/// Null and non-numeric values read as 0, numeric strings are parsed,
/// booleans read as 0/1. Integral floats read like integers, fractional ones
/// as 0. Negative integers keep their two's complement bits.
///
/// # Examples
///
/// ```
/// use bitmask_fields::common::bit;
/// use serde_json::json;
///
/// assert_eq!(bit::from_value(&json!(5)), 5);
/// assert_eq!(bit::from_value(&json!(6.0)), 6);
/// assert_eq!(bit::from_value(&json!("12")), 12);
/// assert_eq!(bit::from_value(&json!(null)), 0);
/// assert_eq!(bit::from_value(&json!("abc")), 0);
/// ```
pub fn from_value(value: &Value) -> Mask {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|i| i as Mask))
            .or_else(|| n.as_f64().and_then(from_integral_f64))
            .unwrap_or(EMPTY),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<Mask>()
                .ok()
                .or_else(|| s.parse::<i64>().ok().map(|i| i as Mask))
                .or_else(|| s.parse::<f64>().ok().and_then(from_integral_f64))
                .unwrap_or(EMPTY)
        }
        Value::Bool(b) => *b as Mask,
        _ => EMPTY,
    }
}

/// Integral floats inside the i64/u64 range, cast like an integer.
fn from_integral_f64(f: f64) -> Option<Mask> {
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    if f < 0.0 {
        (f >= i64::MIN as f64).then(|| f as i64 as Mask)
    } else {
        (f < Mask::MAX as f64).then(|| f as Mask)
    }
}

/// Writes a mask back in the representation the host handed out.
///
/// A host that stored a negative (signed) integer gets a signed value back,
/// so masks using the top bit keep fitting a signed column.
///
/// # Examples
///
/// ```
/// use bitmask_fields::common::bit;
/// use serde_json::json;
///
/// assert_eq!(bit::to_value(3, Some(&json!(2))), json!(3));
/// assert_eq!(bit::to_value(u64::MAX, Some(&json!(-2))), json!(-1));
/// assert_eq!(bit::to_value(u64::MAX, None), json!(u64::MAX));
/// ```
pub fn to_value(mask: Mask, previous: Option<&Value>) -> Value {
    if previous.is_some_and(is_negative) {
        Value::from(mask as i64)
    } else {
        Value::from(mask)
    }
}

fn is_negative(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_i64().is_some_and(|i| i < 0) || n.as_f64().is_some_and(|f| f < 0.0),
        Value::String(s) => s.trim().starts_with('-'),
        _ => false,
    }
}

/// Loose boolean coercion of submitted values.
///
/// Mirrors what form input usually means: `""`, `"0"`, `0`, `null`,
/// `false` and empty arrays are false, anything else is true.
///
/// # Examples
///
/// ```
/// use bitmask_fields::common::bit;
/// use serde_json::json;
///
/// assert!(bit::truthy(&json!("1")));
/// assert!(bit::truthy(&json!("off")));
/// assert!(!bit::truthy(&json!("0")));
/// assert!(!bit::truthy(&json!("")));
/// assert!(!bit::truthy(&json!(0)));
/// assert!(!bit::truthy(&json!(null)));
/// ```
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(_) => true,
    }
}
