use std::sync::atomic::{AtomicBool, Ordering};

/// Private mode switch.
///
/// While active, clipboard changes are not captured and the current entry
/// is not reported as selected. The side effects of switching (restoring the
/// clipboard, cancelling a pending push) live in the engine; this type only
/// holds the flag and reports transitions.
#[derive(Debug, Default)]
pub struct PrivacyGate {
    active: AtomicBool,
}

impl PrivacyGate {
    pub fn new(active: bool) -> Self {
        Self {
            active: AtomicBool::new(active),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Sets the flag. Returns `true` if the value changed.
    pub fn set(&self, active: bool) -> bool {
        self.active.swap(active, Ordering::AcqRel) != active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_transitions_only() {
        let gate = PrivacyGate::default();
        assert!(!gate.is_active());
        assert!(gate.set(true));
        assert!(!gate.set(true));
        assert!(gate.is_active());
        assert!(gate.set(false));
        assert!(!gate.set(false));
    }
}
