//! Common helpers shared by the domain entities.
//!
//! - **Pure functions only** - no side effects, no I/O

pub mod sequence;

pub use sequence::{lenient_sequence, Lenient};
