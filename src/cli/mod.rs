//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Defines the `clap` parser for startup flags and their environment variable
//! fallbacks, and converts the parsed arguments into the service `Config`.

mod args;

pub use args::*;
