//! Argon2d, Argon2i and Argon2id (RFC 9106, version 0x13).
//!
//! # Algorithm Overview
//!
//! 1. **Initialization**: H0 = BLAKE2b(params ‖ password ‖ salt ‖ secret ‖ data).
//! 2. **Lane initialization**: the first two blocks of each lane are
//!    H'(H0 ‖ j ‖ lane), with H' the variable-length BLAKE2b.
//! 3. **Memory filling**: every other block is G(previous, reference),
//!    XORed over its old value after the first pass.
//! 4. **Finalization**: the last blocks of all lanes are XORed together and
//!    stretched with H' to the tag length.
//!
//! # Addressing Modes
//!
//! - **Argon2d**: the reference index comes from the previous block.
//! - **Argon2i**: the reference index comes from an address block derived
//!   from the position and a counter.
//! - **Argon2id**: Argon2i for the first two slices of the first pass,
//!   Argon2d afterwards.
//!
//! Block memory is a [`MemoryRegion`](crate::primitives::MemoryRegion)
//! owned by the [`Argon2`] engine. Lanes of one slice are filled in
//! parallel when the `parallel` feature is enabled.

pub(crate) mod block;
pub mod core;
pub(crate) mod fill;
pub mod params;
pub(crate) mod reference;

pub use self::core::{Argon2, argon2, argon2d, argon2i, argon2id};
pub use block::{BLOCK_LEN, Block};
pub use fill::Schedule;
pub use params::{ARGON2_VERSION, Argon2ParamError, Argon2Params, Argon2Variant};
