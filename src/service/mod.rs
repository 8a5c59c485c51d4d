//! Business logic between the HTTP layer and the data sources.
//!
//! - `aggregate`: folds station readings into city summaries.
//! - `insights`: health and activity guidance per AQI category.
//! - `resolver`: chooses between OpenAQ and the sample dataset for every query.

pub mod aggregate;
pub mod insights;
pub mod resolver;

pub use insights::Insights;
pub use resolver::Resolver;
