use std::sync::atomic::{AtomicBool, Ordering};

/// Busy flag allowing one in-flight submission per form.
#[derive(Debug, Default)]
pub(crate) struct SubmitGuard {
    busy: AtomicBool,
}

/// Held while a submission runs; clears the flag on drop.
#[derive(Debug)]
pub(crate) struct SubmitPermit<'a> {
    guard: &'a SubmitGuard,
}

impl SubmitGuard {
    pub(crate) fn try_acquire(&self) -> Option<SubmitPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitPermit { guard: self })
    }

    #[cfg(test)]
    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for SubmitPermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}
