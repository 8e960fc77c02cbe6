//! Error types for the locker engine.
//!
//! Operation failures ([`LockerError`]) are recoverable and leave state
//! untouched. Construction failures ([`ConfigError`]) reject a bad
//! inventory or configuration before any state exists.

use thiserror::Error;

use crate::types::SizeClass;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockerError {
    /// The requested class and every larger class are exhausted
    #[error("No locker available for size {0}")]
    NoCapacity(SizeClass),

    /// Unknown, already redeemed, or expired code
    #[error("Invalid or expired code: {0}")]
    InvalidCode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid locker id '{0}': expected '<S|M|L>-<label>'")]
    InvalidLockerId(String),

    #[error("locker id '{0}' appears more than once in the inventory")]
    DuplicateLocker(String),

    #[error("inventory must contain at least one locker")]
    EmptyInventory,

    #[error("retention window must be greater than 0")]
    ZeroRetention,
}

pub type Result<T, E = LockerError> = std::result::Result<T, E>;
