//! 执行序列器：并行或严格串行地运行一组异步操作。
//!
//! # Sequencer
//!
//! Runs a list of zero-argument asynchronous operations with one of two
//! strategies:
//!
//! - **Parallel**: every operation is started up front; the first failure
//!   fails the whole run, otherwise results come back in input order.
//! - **Serial**: operation N+1 is only started after operation N has settled.
//!   The first failure stops the run and later operations are never started.
//!
//! Classifier mutations always go through the serial path because the remote
//! collection is not safe to mutate concurrently.
//!
//! ```rust
//! use luis_sync::sequencer::run_serial;
//!
//! # tokio_test::block_on(async {
//! let ops = (1..=3).map(|i| move || async move { Ok::<_, String>(i * 10) });
//! let results = run_serial(ops).await.unwrap();
//! assert_eq!(results, vec![10, 20, 30]);
//! # });
//! ```

use futures::future::try_join_all;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    Parallel,
    #[default]
    Serial,
}

/// Start all operations at once; fail fast, keep input order.
pub async fn run_parallel<T, E, F, Fut>(ops: impl IntoIterator<Item = F>) -> Result<Vec<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    try_join_all(ops.into_iter().map(|op| op())).await
}

/// Run operations one after another, stopping at the first failure.
pub async fn run_serial<T, E, F, Fut>(ops: impl IntoIterator<Item = F>) -> Result<Vec<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let ops = ops.into_iter();
    let mut results = Vec::with_capacity(ops.size_hint().0);
    for op in ops {
        results.push(op().await?);
    }
    Ok(results)
}

pub async fn run<T, E, F, Fut>(strategy: Strategy, ops: impl IntoIterator<Item = F>) -> Result<Vec<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    match strategy {
        Strategy::Parallel => run_parallel(ops).await,
        Strategy::Serial => run_serial(ops).await,
    }
}
