//! Defines the data structures and models used throughout the application.
//!
//! `air` holds the internal schema the HTTP API serves; `openaq` holds the
//! upstream wire format and its normalization into that schema.

mod air;
mod openaq;

pub use air::*;
pub use openaq::*;
