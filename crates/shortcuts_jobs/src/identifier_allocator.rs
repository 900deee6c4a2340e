use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out task identifiers: 1, 2, 3, ... rendered as decimal strings.
#[derive(Default, Debug)]
pub struct IdentifierAllocator {
    count: AtomicU64,
}

impl IdentifierAllocator {
    pub fn next(&self) -> String {
        let id = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        id.to_string()
    }

    /// Last allocated value, 0 if nothing was allocated yet.
    pub fn current(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
