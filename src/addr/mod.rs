//! Types and traits for prefix lengths and their masks.

mod af;
mod prefix;

pub use af::*;
pub use prefix::*;
