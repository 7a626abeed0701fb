//! Shared fixtures for the is-it-ready integration tests: definition and
//! option builders, a scriptable executor, and a renderer that records
//! every frame instead of drawing it.

pub mod builders;
pub mod fake_executor;
pub mod recorder;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

/// Upper bound for any single awaited step in a test. Watch tests rely on
/// real filesystem notifications, so this is generous.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness capture.
///
/// Quiet (`warn`) unless `RUST_LOG` asks for more, e.g.
/// `RUST_LOG=is_it_ready=debug` to follow the watch loop.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Await `fut`, failing the test if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F: Future>(fut: F) -> F::Output {
    match tokio::time::timeout(TEST_TIMEOUT, fut).await {
        Ok(output) => output,
        Err(_) => panic!("step did not finish within {TEST_TIMEOUT:?}"),
    }
}
