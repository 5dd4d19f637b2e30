//! Core value types.

mod point;
mod record;

pub use point::Point;
pub use record::{Record, NAME_SENTINEL};
