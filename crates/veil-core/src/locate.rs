//! Title lookup with bounded retry.
//!
//! The target process may not have created its window yet when we start,
//! so a miss is retried after a fixed delay until the attempts run out.

use std::time::Duration;

use crate::error::VeilError;
use crate::platform::{Sleep, WindowSystem};
use crate::{WindowHandle, log_debug, log_info, log_warn};

/// How many times to look for the window and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatePolicy {
    /// Total lookups, including the first. Zero is treated as one.
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl LocatePolicy {
    /// One lookup, no retry.
    pub fn single() -> Self {
        Self {
            max_attempts: 1,
            retry_delay: Duration::ZERO,
        }
    }
}

impl Default for LocatePolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// A successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    pub handle: WindowHandle,
    /// Lookups made, including the one that succeeded.
    pub attempts: u32,
}

/// Finds the top-level window titled exactly `title`.
///
/// Looks up at most `policy.max_attempts` times and returns on the first
/// hit. Sleeps `policy.retry_delay` between consecutive attempts only,
/// never after the last one. A lookup that errors counts as a miss.
pub fn locate(
    system: &impl WindowSystem,
    sleeper: &impl Sleep,
    title: &str,
    policy: &LocatePolicy,
) -> Result<Located, VeilError> {
    let max = policy.max_attempts.max(1);

    for attempt in 1..=max {
        match system.find_window(title) {
            Ok(Some(handle)) => {
                log_info!("found \"{title}\" at {handle} (attempt {attempt}/{max})");
                return Ok(Located {
                    handle,
                    attempts: attempt,
                });
            }
            Ok(None) => log_debug!("attempt {attempt}/{max}: \"{title}\" not found"),
            Err(e) => log_debug!("attempt {attempt}/{max}: lookup failed: {e}"),
        }

        if attempt < max {
            sleeper.sleep(policy.retry_delay);
        }
    }

    log_warn!("giving up on \"{title}\" after {max} attempt(s)");
    Err(VeilError::WindowNotFound {
        title: title.to_owned(),
        attempts: max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeDesktop, Failures, HANDLE, RecordingSleep, access_denied};

    fn policy(max_attempts: u32) -> LocatePolicy {
        LocatePolicy {
            max_attempts,
            retry_delay: Duration::from_millis(500),
        }
    }

    #[test]
    fn returns_immediately_when_window_exists() {
        // Arrange
        let desktop = FakeDesktop::new("Secure Window 123");
        let sleep = RecordingSleep::default();

        // Act
        let found = locate(&desktop, &sleep, "Secure Window 123", &policy(10)).unwrap();

        // Assert
        assert_eq!(found.handle, HANDLE);
        assert_eq!(found.attempts, 1);
        assert_eq!(desktop.lookups.get(), 1);
        assert_eq!(sleep.count(), 0);
    }

    #[test]
    fn retries_until_window_appears() {
        // Arrange
        let desktop = FakeDesktop::new("Secure Window 123").hidden_for(3);
        let sleep = RecordingSleep::default();

        // Act
        let found = locate(&desktop, &sleep, "Secure Window 123", &policy(10)).unwrap();

        // Assert
        assert_eq!(found.attempts, 4);
        assert_eq!(desktop.lookups.get(), 4);
        assert_eq!(sleep.count(), 3);
    }

    #[test]
    fn exhausts_all_attempts_when_window_never_exists() {
        // Arrange
        let desktop = FakeDesktop::empty();
        let sleep = RecordingSleep::default();

        // Act
        let err = locate(&desktop, &sleep, "Secure Window 123", &policy(10)).unwrap_err();

        // Assert
        assert_eq!(
            err,
            VeilError::WindowNotFound {
                title: "Secure Window 123".into(),
                attempts: 10,
            }
        );
        assert_eq!(desktop.lookups.get(), 10);
        assert_eq!(
            *sleep.pauses.borrow(),
            vec![Duration::from_millis(500); 9]
        );
    }

    #[test]
    fn never_exceeds_max_attempts() {
        for max in 1..=6 {
            // Arrange
            let desktop = FakeDesktop::empty();
            let sleep = RecordingSleep::default();

            // Act
            let _ = locate(&desktop, &sleep, "x", &policy(max));

            // Assert
            assert_eq!(desktop.lookups.get(), max);
            assert_eq!(sleep.count() as u32, max - 1);
        }
    }

    #[test]
    fn zero_attempts_still_looks_once() {
        // Arrange
        let desktop = FakeDesktop::new("Target");
        let sleep = RecordingSleep::default();

        // Act
        let found = locate(&desktop, &sleep, "Target", &policy(0));

        // Assert
        assert!(found.is_ok());
        assert_eq!(desktop.lookups.get(), 1);
    }

    #[test]
    fn single_policy_does_not_sleep() {
        // Arrange
        let desktop = FakeDesktop::empty();
        let sleep = RecordingSleep::default();

        // Act
        let err = locate(&desktop, &sleep, "Target", &LocatePolicy::single()).unwrap_err();

        // Assert
        assert!(matches!(err, VeilError::WindowNotFound { attempts: 1, .. }));
        assert_eq!(sleep.count(), 0);
    }

    #[test]
    fn lookup_errors_count_as_misses() {
        // Arrange
        let desktop = FakeDesktop::new("Target").failing(Failures {
            find: Some(access_denied()),
            ..Default::default()
        });
        let sleep = RecordingSleep::default();

        // Act
        let err = locate(&desktop, &sleep, "Target", &policy(3)).unwrap_err();

        // Assert
        assert!(matches!(err, VeilError::WindowNotFound { attempts: 3, .. }));
        assert_eq!(desktop.lookups.get(), 3);
    }

    #[test]
    fn title_match_is_exact() {
        // Arrange
        let desktop = FakeDesktop::new("Secure Window 123");
        let sleep = RecordingSleep::default();

        // Act
        let result = locate(&desktop, &sleep, "Secure Window", &LocatePolicy::single());

        // Assert
        assert!(result.is_err());
    }
}
