//! Lattice coordinates, centering, and boxes.

mod grid_box;
pub use grid_box::*;
mod index_type;
pub use index_type::*;
mod int_vect;
pub use int_vect::*;
mod point_iter;
pub use point_iter::*;
#[cfg(feature = "serde")]
mod serde_impls;

/// Coordinates that are locked to the lattice: integer indices of cells or nodes.
///
/// Box extents along one axis are also expressed in this type, and may be zero or
/// negative for empty boxes. Point counts use [`u64`] instead.
pub type GridCoordinate = i32;

// Several size computations assume that `usize` is at least 32 bits.
#[cfg(target_pointer_width = "16")]
compile_error!("latbox does not support platforms with less than 32-bit `usize`");
