use crate::behavior::{Bitmask, DEFAULT_ATTRIBUTE};
use crate::common::bit::{self, Mask};
use crate::common::Message;
use crate::field_map::FieldMap;
use crate::ports::provided::{ConfigError, Validator};
use crate::ports::required::Record;
use crate::{fn_log, warn_log};
use std::collections::HashMap;

/// Checks a mask change against the bits a rule may touch.
/// Returns the changed bits lying outside `allowed` on failure.
///
/// # Examples
///
/// ```
/// use bitmask_fields::validator::authorize;
///
/// assert_eq!(authorize(0b0101, 0b0111, 0b0010), Ok(()));
/// assert_eq!(authorize(0b0101, 0b0111, 0b0001), Err(0b0010));
/// ```
pub fn authorize(old: Mask, current: Mask, allowed: Mask) -> Result<(), Mask> {
    match bit::outside(bit::diff(old, current), allowed) {
        0 => Ok(()),
        violating => Err(violating),
    }
}

/// `(old, current)` masks of `attribute`. A missing snapshot reads as 0.
fn masks(record: &dyn Record, attribute: &str) -> (Mask, Mask) {
    let read = |value: Option<serde_json::Value>| {
        value.map(|v| bit::from_value(&v)).unwrap_or(bit::EMPTY)
    };
    (
        read(record.get_old_attribute(attribute)),
        read(record.get_attribute(attribute)),
    )
}

/// Allows changes only to the bits of the named fields.
///
/// Errors are reported on the mask attribute.
#[derive(Debug, Clone)]
pub struct FieldsValidator {
    names: Vec<String>,
    allowed: Mask,
    mask_attribute: String,
    message: String,
}

impl FieldsValidator {
    pub const MESSAGE: &'static str = "Only \"{names}\" fields can be modified";

    pub fn new<S: AsRef<str>>(fields: &FieldMap, names: &[S]) -> Result<Self, ConfigError> {
        let allowed = fields.allowed_mask(names)?;
        Ok(Self {
            names: names.iter().map(|n| n.as_ref().to_string()).collect(),
            allowed,
            mask_attribute: DEFAULT_ATTRIBUTE.to_string(),
            message: Self::MESSAGE.to_string(),
        })
    }

    /// Validator over the fields and mask attribute of `bitmask`
    pub fn for_bitmask<S: AsRef<str>>(bitmask: &Bitmask, names: &[S]) -> Result<Self, ConfigError> {
        Ok(Self::new(bitmask.fields(), names)?.with_mask_attribute(bitmask.attribute()))
    }

    pub fn with_mask_attribute(mut self, attribute: &str) -> Self {
        self.mask_attribute = attribute.to_string();
        self
    }

    /// Custom template; `{names}` and `{attribute}` are interpolated
    pub fn with_message(mut self, template: &str) -> Self {
        self.message = template.to_string();
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn allowed(&self) -> Mask {
        self.allowed
    }

    pub fn mask_attribute(&self) -> &str {
        &self.mask_attribute
    }
}

impl Validator for FieldsValidator {
    fn validate(&self, record: &mut dyn Record) -> bool {
        fn_log!("FieldsValidator", "validate", &self.mask_attribute);

        let (old, current) = masks(record, &self.mask_attribute);
        let Err(violating) = authorize(old, current, self.allowed) else {
            return true;
        };

        warn_log!(
            "FieldsValidator",
            "validate",
            format!(
                "changed bits {} outside {}",
                crate::common::LogFormat::format_mask(violating),
                crate::common::LogFormat::format_mask(self.allowed)
            )
        );

        let mut params = HashMap::new();
        params.insert("names".to_string(), self.names.join(", "));
        params.insert("attribute".to_string(), self.mask_attribute.clone());
        let message = Message::interpolate(&self.message, &params);
        record.report(&self.mask_attribute, &message, &params);
        false
    }
}

/// Allows changes only to the bits of a literal mask.
#[derive(Debug, Clone)]
pub struct MaskValidator {
    attribute: String,
    mask: Mask,
    message: String,
}

impl MaskValidator {
    pub const MESSAGE: &'static str = "Only \"{mask}\" bit mask in {attribute} field can be modified";

    pub fn new(attribute: &str, mask: Mask) -> Self {
        Self {
            attribute: attribute.to_string(),
            mask,
            message: Self::MESSAGE.to_string(),
        }
    }

    /// Custom template; `{mask}` and `{attribute}` are interpolated
    pub fn with_message(mut self, template: &str) -> Self {
        self.message = template.to_string();
        self
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }
}

impl Validator for MaskValidator {
    fn validate(&self, record: &mut dyn Record) -> bool {
        fn_log!("MaskValidator", "validate", &self.attribute);

        let (old, current) = masks(record, &self.attribute);
        let Err(violating) = authorize(old, current, self.mask) else {
            return true;
        };

        warn_log!(
            "MaskValidator",
            "validate",
            format!(
                "changed bits {} outside {}",
                crate::common::LogFormat::format_mask(violating),
                crate::common::LogFormat::format_mask(self.mask)
            )
        );

        let mut params = HashMap::new();
        params.insert("mask".to_string(), self.mask.to_string());
        params.insert("attribute".to_string(), self.attribute.clone());
        let message = Message::interpolate(&self.message, &params);
        record.report(&self.attribute, &message, &params);
        false
    }
}
