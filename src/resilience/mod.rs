//! Retry and fallback building blocks shared by every stage of a run

pub mod fallback;
pub mod retry;

pub use fallback::{Fetched, first_success};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper, retry};
