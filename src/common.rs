// Common utilities

pub mod bit;
pub mod log_format;
pub mod message;
pub mod value_set;

pub use bit::Mask;
pub use log_format::LogFormat;
pub use message::Message;
pub use value_set::ValueSet;
