//! Blocking wait for in-progress builds (debug mode only).

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::manifest::Manifest;
use crate::store::ManifestStore;
use crate::{Error, Result};

const POSSIBLE_LIMBO: &str = "Waiting for the bundler with no timeout configured; the request \
     can hang indefinitely. Check the status field of the stats file if pages never load.";

/// Polls a [`ManifestStore`] until the build is no longer pending.
#[derive(Debug, Clone, Copy)]
pub struct CompileWaiter {
    enabled: bool,
    poll_interval: Duration,
    /// Seconds; `None` waits forever.
    timeout: Option<f64>,
}

impl CompileWaiter {
    pub fn new(enabled: bool, poll_interval: Duration, timeout: Option<f64>) -> Self {
        Self {
            enabled,
            poll_interval,
            timeout: timeout.filter(|secs| *secs > 0.0),
        }
    }

    /// Load the manifest, blocking while the build is pending.
    ///
    /// When disabled the manifest is returned as read, whatever its status.
    pub fn wait(&self, store: &ManifestStore, bundle: &str) -> Result<Arc<Manifest>> {
        let mut manifest = store.load()?;
        if !self.enabled {
            return Ok(manifest);
        }

        // A timeout too large to represent as a deadline never fires.
        let deadline = self
            .timeout
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .and_then(|limit| Instant::now().checked_add(limit));

        while manifest.status.is_pending() {
            match (self.timeout, deadline) {
                (Some(timeout), Some(deadline)) if Instant::now() >= deadline => {
                    return Err(Error::CompileTimeout {
                        bundle: bundle.to_string(),
                        timeout,
                    });
                }
                (None, _) => tracing::warn!(bundle, "{POSSIBLE_LIMBO}"),
                _ => {}
            }

            tracing::debug!(bundle, "build in progress, polling");
            thread::sleep(self.poll_interval);
            manifest = store.load()?;
        }

        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Status;
    use crate::source::StaticSource;
    use tracing_test::traced_test;

    fn pending() -> Manifest {
        Manifest {
            status: Status::Pending,
            ..Manifest::default()
        }
    }

    #[test]
    fn disabled_waiter_returns_pending_manifest() {
        let store = ManifestStore::new(Box::new(StaticSource::new(pending())), false, None);
        let waiter = CompileWaiter::new(false, Duration::from_millis(10), Some(0.05));

        assert!(waiter.wait(&store, "main").unwrap().status.is_pending());
    }

    #[test]
    fn times_out_on_a_stuck_build() {
        let store = ManifestStore::new(Box::new(StaticSource::new(pending())), false, None);
        let waiter = CompileWaiter::new(true, Duration::from_millis(10), Some(0.1));

        let started = Instant::now();
        let err = waiter.wait(&store, "main").unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(err, Error::CompileTimeout { ref bundle, .. } if bundle == "main"));
        assert_eq!(
            err.to_string(),
            "Timed Out. Bundle `main` took more than 0.1 seconds to compile."
        );
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(300));
    }

    #[test]
    #[traced_test]
    fn returns_once_the_build_finishes() {
        let source = StaticSource::new(pending());
        let store = ManifestStore::new(Box::new(source.clone()), false, None);
        let waiter = CompileWaiter::new(true, Duration::from_millis(10), None);

        let finisher = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            source.set(Manifest::done());
        });

        let manifest = waiter.wait(&store, "main").unwrap();
        finisher.join().unwrap();
        assert_eq!(manifest.status, Status::Done);
        assert!(logs_contain("no timeout configured"));
    }

    #[test]
    #[traced_test]
    fn unrepresentable_timeout_polls_without_deadline() {
        let source = StaticSource::new(pending());
        let store = ManifestStore::new(Box::new(source.clone()), false, None);
        let waiter = CompileWaiter::new(true, Duration::from_millis(10), Some(1.5e19));

        let finisher = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            source.set(Manifest::done());
        });

        let manifest = waiter.wait(&store, "main").unwrap();
        finisher.join().unwrap();
        assert_eq!(manifest.status, Status::Done);
        assert!(!logs_contain("no timeout configured"));
    }

    #[test]
    #[traced_test]
    fn bounded_wait_does_not_warn() {
        let store = ManifestStore::new(Box::new(StaticSource::new(pending())), false, None);
        let waiter = CompileWaiter::new(true, Duration::from_millis(10), Some(0.05));

        assert!(waiter.wait(&store, "main").is_err());
        assert!(!logs_contain("no timeout configured"));
    }

    #[test]
    fn unrecognized_status_is_not_waited_on() {
        let store = ManifestStore::new(
            Box::new(StaticSource::new(Manifest::default())),
            false,
            None,
        );
        let waiter = CompileWaiter::new(true, Duration::from_millis(10), None);

        assert_eq!(
            waiter.wait(&store, "main").unwrap().status,
            Status::Unrecognized
        );
    }
}
