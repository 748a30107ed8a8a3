//! Storage layer: abstraction traits plus the JSON-document implementation.

pub mod json;
pub mod traits;

pub use traits::{BatchStorage, StudentStorage};
