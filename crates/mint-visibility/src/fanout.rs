//! Bounded-concurrency fan-out with per-item failure tolerance
//!
//! Both elaborate tools reduce to the same shape: N independent requests,
//! each of which may fail without aborting its siblings, gathered back into
//! one collection keyed by the originating descriptor.

use futures::stream::{self, StreamExt};
use std::fmt::Display;
use std::future::Future;

/// Success-or-failure result of one unit of fan-out work
///
/// Exactly one variant holds; a failure is terminal and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    Success(T),
    Failure(String),
}

impl<T> FetchOutcome<T> {
    /// Whether this outcome carries a value
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The value, if this outcome is a success
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure reason, if any
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(reason) => Some(reason),
        }
    }
}

/// Run one operation per key with at most `limit` requests in flight
///
/// Every key yields exactly one outcome and one key's failure never cancels
/// the others; the call returns only once every outcome has settled.
/// Outcomes come back paired with their keys in input order regardless of
/// completion order.
pub async fn fan_out<K, T, E, F, Fut>(
    keys: Vec<K>,
    limit: usize,
    op: F,
) -> Vec<(K, FetchOutcome<T>)>
where
    K: Clone,
    E: Display,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let tasks = keys.iter().cloned().enumerate().map(|(index, key)| {
        let fut = op(key);
        async move {
            let outcome = match fut.await {
                Ok(value) => FetchOutcome::Success(value),
                Err(e) => FetchOutcome::Failure(e.to_string()),
            };
            (index, outcome)
        }
    });

    let mut tagged: Vec<(usize, FetchOutcome<T>)> = stream::iter(tasks)
        .buffer_unordered(limit.max(1))
        .collect()
        .await;

    // Completion order is arbitrary; re-associate by input index
    tagged.sort_unstable_by_key(|(index, _)| *index);

    keys.into_iter()
        .zip(tagged)
        .map(|(key, (_, outcome))| (key, outcome))
        .collect()
}
