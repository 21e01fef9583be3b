//! Set algebra on collections of axis-aligned boxes in an integer lattice.
//!
//! `latbox` manipulates the index-space geometry of structured grids, such as those
//! used in adaptive mesh refinement: which cells or nodes belong to a computational
//! domain, a refinement patch, or a ghost region. It never touches data stored on
//! the grid.
//!
//! ## Overview
//!
//! * [`math::GridBox`] is a single box, tagged with an [`math::IndexType`] saying
//!   whether its coordinates count cells or nodes along each axis.
//! * [`BoxList`] is an ordered collection of boxes of one index type, representing the
//!   union of its members. It offers
//!   * geometric transforms ([`BoxList::refine()`], [`BoxList::coarsen()`],
//!     [`BoxList::accrete()`], [`BoxList::shift_half()`], [`BoxList::convert()`], …),
//!   * complements and intersections ([`complement_in()`], [`BoxList::intersect()`],
//!     [`BoxList::contains()`], [`BoxList::remove_overlap()`]),
//!   * merging adjacent boxes ([`BoxList::simplify()`]),
//!   * and decomposition of single boxes ([`BoxList::chop()`], [`BoxList::tiles()`],
//!     [`BoxList::max_size()`]).
//! * [`BoxDomain`] is a collection which is kept free of overlap.
//! * [`BoxArray`] is an immutable, cheaply shared array of boxes.
//! * [`comm`] replicates a [`BoxList`] across the participants of a parallel job.
//!
//! All of these types are generic over the number of dimensions, `D`.
//!
//! ```
//! use latbox::{BoxList, complement_in};
//! use latbox::math::GridBox;
//!
//! let domain = GridBox::cell([0, 0], [9, 9]);
//! let patches = BoxList::from_box(GridBox::cell([3, 3], [6, 6]));
//! let uncovered = complement_in(domain, &patches);
//! assert_eq!(uncovered.num_pts(), Some(84));
//! assert!(uncovered.is_disjoint());
//! ```
//!
//! ## Contracts
//!
//! Combining boxes or lists of different index types is a programmer error and
//! panics; centering is never converted implicitly. Empty boxes are ordinary values
//! which every operation accepts. Operations with a useful failure case have a
//! fallible twin (such as [`BoxList::try_push()`] and [`BoxList::try_chop()`]).
//!
//! ## Crate features
//!
//! This crate, `latbox`, defines the following feature flags:
//!
//! * `std` (default):
//!   Enable functionality which requires [`std`]. Without it, the crate is `no_std`
//!   and requires only [`alloc`].
//! * `auto-threads` (default):
//!   Enable use of threads for [`BoxList::parallel_complement_in()`], via
//!   [`rayon`]’s global thread pool.
//!   This feature does not affect the public API, only performance and dependencies.
//! * `serde`:
//!   Adds [`serde`] implementations for boxes, index types, and [`BoxList`].
//! * `arbitrary`: Adds implementations of the [`arbitrary::Arbitrary`] trait for
//!   fuzzing / property testing on types defined by this crate.
//!
//! ## Dependencies and global state
//!
//! `latbox` has no global state. It does write log messages using the [`log`] crate
//! and is therefore subject to that global configuration.
#![cfg_attr(
    not(feature = "arbitrary"),
    doc = "[`arbitrary::Arbitrary`]: https://docs.rs/arbitrary/1.4.1/arbitrary/trait.Arbitrary.html"
)]
#![cfg_attr(not(feature = "auto-threads"), doc = "[`rayon`]: https://docs.rs/rayon/")]
#![cfg_attr(not(feature = "serde"), doc = "[`serde`]: https://docs.rs/serde/")]
#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(any(test, feature = "arbitrary")),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
// Lenience for tests.
#![cfg_attr(test,
    allow(clippy::redundant_clone), // prefer regularity over efficiency
)]

#[macro_use]
extern crate alloc;
#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;

/// Lattice coordinates, centering, and single boxes.
pub mod math {
    pub use latbox_base::math::*;
}

mod box_array;
pub use box_array::BoxArray;

mod box_domain;
pub use box_domain::BoxDomain;

mod box_list;
pub use box_list::{
    BoxList, BoxListError, accrete, box_diff, coarsen, complement_in, intersect, refine,
    remove_overlap,
};

pub mod comm;

pub mod options;
