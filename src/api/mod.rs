//! Provides the data sources behind the resolver.
//!
//! Includes:
//! - `openaq`: Client for the real OpenAQ v3 API, reporting outcomes as [`Fetch`].
//! - `sample`: Built-in sample dataset used as the fallback source.

mod fetch;
mod openaq;
mod sample;
mod sample_data;

pub use fetch::*;
pub use openaq::*;
pub use sample::*;
