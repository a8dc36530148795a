use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that interrupts a runner blocked on its child.
///
/// Clones share the same flag. A cancellation is consumed by the run it lands
/// in, even when the child has already exited by the time it is seen, so the
/// next run starts clean.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }

    /// Cancel this token whenever the process receives Ctrl+C.
    ///
    /// ctrlc allows a single handler per process; a second call fails.
    pub fn install_ctrlc_handler(&self) -> Result<(), ctrlc::Error> {
        let flag = Arc::clone(&self.flag);
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_flag() {
        let token = CancelToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_take_consumes_cancellation() {
        let token = CancelToken::new();
        assert!(!token.take());
        token.cancel();
        assert!(token.take());
        assert!(!token.is_cancelled());
    }
}
