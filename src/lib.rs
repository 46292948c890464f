//! Named boolean flags packed into a single integer attribute of a host record.
//!
//! - [`FieldMap`] declares which bits belong to which flag name.
//! - [`codec`] converts between a mask and its [`ValueSet`].
//! - [`Bitmask`] keeps one record's flags in sync with its mask attribute.
//! - [`FieldsValidator`] and [`MaskValidator`] reject changes to bits a rule
//!   does not own.
//!
//! The host record is reached through the traits in [`ports::required`].

pub mod common;
pub mod ports;
pub mod field_map;
pub mod codec;
pub mod behavior;
pub mod validator;

pub use common::{LogFormat, Mask, ValueSet};
pub use field_map::{Field, FieldEntry, FieldMap};
pub use behavior::Bitmask;
pub use validator::{FieldsValidator, MaskValidator, authorize};

pub use ports::required::{
    AttributeHost, ErrorSink,
    Record, SnapshotSource,
};

pub use ports::provided::{ConfigError, Validator};
