//! Tuning parameters for the algorithms which trade thoroughness or parallelism
//! against speed.
//!
//! None of these options change which lattice points a result covers; they only
//! affect how it is arranged into boxes and how long it takes to compute.

use crate::math::GridCoordinate;

/// Options for [`BoxList::parallel_complement_in_with()`](crate::BoxList::parallel_complement_in_with).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct ParallelComplementOptions {
    /// Reference lists with at most this many members are complemented sequentially,
    /// since splitting the work would cost more than it saves.
    pub min_members: usize,

    /// Edge length of the tiles which the bounding box is split into; each tile's
    /// complement is one unit of parallel work.
    pub chunk: GridCoordinate,
}

impl Default for ParallelComplementOptions {
    fn default() -> Self {
        Self {
            min_members: 8,
            chunk: 64,
        }
    }
}

/// Options for [`BoxList::simplify_with()`](crate::BoxList::simplify_with).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct SimplifyOptions {
    /// When not simplifying exhaustively, the number of following members (in
    /// canonical order) each member is compared against.
    pub lookahead: usize,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self { lookahead: 64 }
    }
}
