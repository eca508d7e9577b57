//! Low-level building blocks shared by every algorithm.
//!
//! - `endian`: explicit word load/store in either byte order.
//! - `memory`: the page-granular scratch region used by Argon2 and scrypt.

pub mod endian;
pub mod memory;

pub use endian::Endian;
pub use memory::{MemoryRegion, PAGE_SIZE, try_zeroed};
