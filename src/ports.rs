// Ports - boundary between the host record and this library

pub mod provided;
pub mod required;

pub use provided::*;
pub use required::*;
