pub mod builders;
pub mod fake_backend;

use std::sync::Once;
use std::time::Duration;

use devloop::logging::{LOG_ENV, build_filter};
use tracing_subscriber::fmt;

/// Upper bound for anything a test waits on.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

static INIT: Once = Once::new();

/// Install a test subscriber once per test binary.
///
/// Uses the same `DEVLOOP_LOG` filter as the binary, so
/// `DEVLOOP_LOG=devloop::engine=debug cargo test` narrows test output too.
/// Output goes through the test writer and only shows for failing tests.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = build_filter(None, std::env::var(LOG_ENV).ok().as_deref());
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

/// Await `f`, panicking if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("test step did not finish within {TEST_TIMEOUT:?}"),
    }
}

/// Poll `cond` every 10ms until it holds, giving up after [`TEST_TIMEOUT`].
pub async fn wait_until<F>(mut cond: F)
where
    F: FnMut() -> bool,
{
    with_timeout(async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
}
