//! Data sources that do not involve real I/O.
//!
//! - seeded synthetic demo batches (`sample`)

pub mod sample;

pub use sample::*;
