use std::{fmt::Display, future::Future};

use serde::Serialize;

/// A unit of work the [`JobEngine`](crate::job_engine::JobEngine) can run in
/// the background.
///
/// The work either produces a serializable output, which becomes the task
/// result, or fails. The error is only logged, the task just flips to `error`.
pub trait Executable: Send + 'static {
    /// Name used in logs.
    const NAME: &'static str;

    type Output: Serialize + Send + 'static;
    type Error: Display + Send + 'static;

    fn execute(self) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send + 'static;
}
