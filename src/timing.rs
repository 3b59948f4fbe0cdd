//! Elapsed-time wrapper for use case results

use serde::Serialize;
use std::future::Future;
use std::time::{Duration, Instant};

/// A use case's results together with how long the call took.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UseCaseResult<T> {
    pub results: T,
    #[serde(rename = "elapsed_seconds", serialize_with = "as_seconds")]
    pub elapsed: Duration,
}

fn as_seconds<S: serde::Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Await `future` and attach its elapsed time. Errors pass through untouched.
pub async fn measure<T, E, F>(future: F) -> Result<UseCaseResult<T>, E>
where
    F: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let results = future.await?;
    Ok(UseCaseResult {
        results,
        elapsed: start.elapsed(),
    })
}
