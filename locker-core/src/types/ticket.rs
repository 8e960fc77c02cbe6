use serde::{Deserialize, Serialize};

use super::{LockerId, SizeClass};

/// Proof of deposit. Owned by the active ticket table until pickup or expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// The occupied locker
    pub locker_id: LockerId,
    /// Retrieval code, the lookup key for pickup
    pub code: String,
    /// When the package was deposited (ms)
    pub created_at: u64,
}

impl Ticket {
    pub fn new(locker_id: LockerId, code: String, now: u64) -> Self {
        Self {
            locker_id,
            code,
            created_at: now,
        }
    }

    /// Milliseconds since deposit. Never negative, even if `now` is behind.
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }

    /// Strictly older than the retention window
    pub fn is_expired(&self, now: u64, retention_ms: u64) -> bool {
        self.age(now) > retention_ms
    }
}

/// Issued on a successful pickup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub locker_id: LockerId,
}

impl Confirmation {
    pub fn message(&self) -> String {
        format!("Locker {} opened. Package retrieved.", self.locker_id)
    }
}

/// Free-locker counts per class alongside the number of occupied lockers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStatus {
    pub free_small: usize,
    pub free_medium: usize,
    pub free_large: usize,
    pub active_tickets: usize,
}

impl PoolStatus {
    pub fn free(&self, size: SizeClass) -> usize {
        match size {
            SizeClass::Small => self.free_small,
            SizeClass::Medium => self.free_medium,
            SizeClass::Large => self.free_large,
        }
    }

    /// Free plus occupied; constant for the lifetime of a store
    pub fn total(&self) -> usize {
        self.free_small + self.free_medium + self.free_large + self.active_tickets
    }
}
