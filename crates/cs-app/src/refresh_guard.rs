use std::sync::atomic::{AtomicBool, Ordering};

/// Lets at most one refresh run at a time.
///
/// Change notifications can arrive while a refresh is still awaiting the
/// clipboard. Those notifications are dropped, not queued: the running
/// refresh will already see the latest content or the next notification
/// will pick it up.
#[derive(Debug, Default)]
pub struct RefreshGuard {
    in_flight: AtomicBool,
}

/// Held for the duration of one refresh; releases the guard on drop,
/// including when the refresh returns early or its future is dropped.
#[derive(Debug)]
pub struct RefreshPermit<'a> {
    guard: &'a RefreshGuard,
}

impl RefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` if a refresh is already in flight.
    pub fn try_enter(&self) -> Option<RefreshPermit<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RefreshPermit { guard: self })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for RefreshPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_enter_is_refused_while_permit_is_held() {
        let guard = RefreshGuard::new();
        let permit = guard.try_enter();
        assert!(permit.is_some());
        assert!(guard.is_in_flight());
        assert!(guard.try_enter().is_none());
    }

    #[test]
    fn dropping_the_permit_releases_the_guard() {
        let guard = RefreshGuard::new();
        {
            let _permit = guard.try_enter().expect("first enter");
        }
        assert!(!guard.is_in_flight());
        assert!(guard.try_enter().is_some());
    }
}
