//! Platform abstraction layer
//!
//! Translates browser/native key events into the simulation's logical inputs.

pub mod input;

pub use input::{KeyRepeatFilter, map_key};
