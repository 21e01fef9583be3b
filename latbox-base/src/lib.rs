//! This library is an internal component of [`latbox`],
//! which defines the lattice coordinate and box primitives.
//! Do not depend on this library; use only [`latbox`] instead.
//!
//! [`latbox`]: https://crates.io/crates/latbox/

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(any(test, feature = "arbitrary")),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
#![warn(clippy::missing_inline_in_public_items)]

#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;
#[allow(unused_extern_crates, reason = "used only with some features")]
extern crate alloc;

/// Do not use this module directly; its contents are re-exported from `latbox`.
pub mod math;
