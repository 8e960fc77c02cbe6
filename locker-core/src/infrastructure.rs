use crate::error::Result;
use crate::types::{LockerId, PoolStatus, SizeClass, Ticket};

// Stores hold no lock of their own. The service serializes every call, so
// an implementation may assume each method runs to completion alone.

/// Defines the contract for the locker state block: free pools plus the
/// active ticket table.
pub trait LockerStore {
    /// Take the oldest free locker from `size` or the first larger class
    /// with capacity, and record a ticket for it.
    fn allocate(&mut self, size: SizeClass, now: u64) -> Result<Ticket>;

    /// Retire the ticket for `code` and return its locker to the pool tail
    fn redeem(&mut self, code: &str) -> Result<Ticket>;

    /// Retire every ticket older than `retention_ms` at `now`
    fn reclaim_expired(&mut self, now: u64, retention_ms: u64) -> Vec<Ticket>;

    /// Free counts and occupancy
    fn status(&self) -> PoolStatus;

    /// Snapshot of the active ticket table
    fn active_tickets(&self) -> Vec<Ticket>;

    /// Free lockers of one class, oldest first
    fn free_lockers(&self, size: SizeClass) -> Vec<LockerId>;
}
