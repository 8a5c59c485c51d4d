use crate::error::{AppError, Result};

/// Outcome of one upstream query.
///
/// The client never propagates errors to its callers; it reports them through
/// this type so the resolver can decide to fall back explicitly.
#[derive(Debug)]
pub enum Fetch<T> {
    /// The query succeeded and returned at least one record.
    Data(Vec<T>),
    /// The query succeeded with no records, or upstream access is disabled.
    Empty,
    /// Transport error, timeout, non-success status or malformed payload.
    Failed(AppError),
}

impl<T> Fetch<T> {
    /// Wraps a raw client result. Failures are expected to be logged where they occur.
    pub(crate) fn from_result(result: Result<Vec<T>>) -> Self {
        match result {
            Ok(records) if records.is_empty() => Fetch::Empty,
            Ok(records) => Fetch::Data(records),
            Err(e) => Fetch::Failed(e),
        }
    }

    /// Records, if there are any.
    pub fn into_data(self) -> Option<Vec<T>> {
        match self {
            Fetch::Data(records) => Some(records),
            Fetch::Empty | Fetch::Failed(_) => None,
        }
    }
}

#[cfg(test)]
impl<T> Fetch<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Fetch::Failed(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Fetch::Empty)
    }
}
