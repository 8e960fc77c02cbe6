//! # locker-core
//!
//! The allocation engine behind a package-locker bank.
//! Provides best-fit-or-larger locker allocation over fixed size-class
//! pools, retrieval-code pickup, and time-based reclamation of stale
//! deposits, all behind a single lock.

pub mod clock;
pub mod code;
pub mod config;
pub mod error;
pub mod infrastructure;
#[path = "infrastructure_in_memory.rs"]
pub mod infrastructure_in_memory;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_test;
