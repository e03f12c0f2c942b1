mod common;

use common::{RecordingSleeper, auth_error, network_error};
use motivator::BotError;
use motivator::resilience::{RetryPolicy, retry};
use pretty_assertions::assert_eq;
use std::error::Error;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

fn policy(attempts: u32) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::from_secs(1), 2.0, Duration::from_secs(4))
}

#[tokio::test]
async fn test_transient_failure_runs_exactly_n_times_and_wraps_last_error() {
    let sleeper = RecordingSleeper::default();
    let calls = &AtomicU32::new(0);

    let result: Result<(), BotError> = retry(&policy(5), &sleeper, || async move {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        Err(BotError::Timeout(format!("attempt {n}")))
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    match result {
        Err(BotError::RetriesExhausted { attempts, source }) => {
            assert_eq!(attempts, 5);
            assert!(matches!(*source, BotError::Timeout(ref m) if m == "attempt 5"));
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_backoff_delays_grow_and_cap_with_no_sleep_after_last_attempt() {
    let sleeper = RecordingSleeper::default();

    let _ = retry(&policy(5), &sleeper, || async move { Err::<(), _>(network_error()) }).await;

    assert_eq!(
        sleeper.delays(),
        vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4),
            Duration::from_secs(4),
        ]
    );
}

#[tokio::test]
async fn test_permanent_failure_is_not_retried_or_wrapped() {
    let sleeper = RecordingSleeper::default();
    let calls = &AtomicU32::new(0);

    let result: Result<(), BotError> = retry(&policy(5), &sleeper, || async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(auth_error())
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(sleeper.delays().is_empty());
    assert!(matches!(result, Err(BotError::Unauthorized { status: 401, .. })));
}

#[tokio::test]
async fn test_success_after_transient_failures_returns_immediately() {
    let sleeper = RecordingSleeper::default();
    let calls = &AtomicU32::new(0);

    let result = retry(&policy(5), &sleeper, || async move {
        if calls.fetch_add(1, Ordering::SeqCst) < 2 {
            Err(network_error())
        } else {
            Ok("done")
        }
    })
    .await;

    assert_eq!(result.unwrap(), "done");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(sleeper.delays().len(), 2);
}

#[tokio::test]
async fn test_exhausted_error_exposes_cause_through_source_chain() {
    let sleeper = RecordingSleeper::default();

    let err = retry(&policy(2), &sleeper, || async move { Err::<(), _>(network_error()) })
        .await
        .unwrap_err();

    let cause = err.source().expect("exhaustion keeps its cause");
    assert_eq!(cause.to_string(), "Failed to send HTTP request: connection reset");
}

#[tokio::test(start_paused = true)]
async fn test_tokio_sleeper_waits_on_the_tokio_clock() {
    use motivator::resilience::TokioSleeper;

    let start = tokio::time::Instant::now();
    let calls = &AtomicU32::new(0);

    let _ = retry(&policy(3), &TokioSleeper, || async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Err::<(), _>(network_error())
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(3), "slept {elapsed:?}");
    assert!(elapsed < Duration::from_secs(4), "slept {elapsed:?}");
}
