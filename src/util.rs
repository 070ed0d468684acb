use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Hands out sighting ids: the current time in milliseconds, bumped past the
/// last id issued so two submissions in the same millisecond never collide.
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    /// `floor` is the largest id already stored; every new id is above it.
    pub fn starting_after(floor: u64) -> Self {
        Self {
            last: AtomicU64::new(floor),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next_id_at(now_millis())
    }

    fn next_id_at(&self, now: u64) -> u64 {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(current.saturating_add(1));
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }
}
