#![forbid(unsafe_code)]

//! Domain types for the flag quiz: records, identifiers, score counters,
//! and a clock abstraction for deterministic time in tests.

pub mod model;
pub mod time;

pub use time::Clock;
