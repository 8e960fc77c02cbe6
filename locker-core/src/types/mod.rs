mod primitives;
mod ticket;

pub use primitives::{LockerId, SizeClass};
pub use ticket::{Confirmation, PoolStatus, Ticket};
