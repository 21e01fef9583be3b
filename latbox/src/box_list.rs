//! [`BoxList`], the ordered collection of boxes that all set algebra operates on.

use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use crate::box_array::BoxArray;
use crate::math::{Centering, GridBox, GridCoordinate, IndexType, IntVect};

mod chop;
mod complement;
pub use complement::*;
mod simplify;


/// An ordered sequence of [`GridBox`]es sharing one [`IndexType`], representing the
/// union of its members.
///
/// Members may overlap, may be empty, and may appear in any order; see
/// [`BoxDomain`](crate::BoxDomain) for a collection which stays disjoint.
/// Appending a box of a different index type than the list's is a programmer error
/// and panics; [`BoxList::try_push()`] is the checked alternative.
///
/// Most transforming methods operate in place and return `&mut Self` so that they
/// can be chained:
///
/// ```
/// use latbox::BoxList;
/// use latbox::math::GridBox;
///
/// let mut list = BoxList::from_box(GridBox::cell([0, 0], [3, 3]));
/// list.refine(2).accrete(1);
/// assert_eq!(list.front(), &GridBox::cell([-1, -1], [8, 8]));
/// ```
///
/// Equality compares the members in order, so two lists covering the same region
/// with differently arranged boxes are not equal.
#[derive(Clone, Debug, Default)]
pub struct BoxList<const D: usize> {
    boxes: Vec<GridBox<D>>,
    btype: IndexType<D>,
}

impl<const D: usize> BoxList<D> {
    /// Constructs an empty list of cell-centered boxes.
    #[inline]
    pub const fn new() -> Self {
        Self::with_ix_type(IndexType::cell())
    }

    /// Constructs an empty list of boxes of the given type.
    #[inline]
    pub const fn with_ix_type(btype: IndexType<D>) -> Self {
        Self {
            boxes: Vec::new(),
            btype,
        }
    }

    /// Constructs a list containing the single box `b`, taking its index type.
    #[inline]
    pub fn from_box(b: GridBox<D>) -> Self {
        Self {
            boxes: vec![b],
            btype: b.ix_type(),
        }
    }

    /// Constructs a list from boxes which must all share one index type.
    ///
    /// The list takes the type of the first box, or is cell-centered if there are no
    /// boxes.
    pub fn from_boxes(boxes: Vec<GridBox<D>>) -> Result<Self, BoxListError> {
        let btype = boxes.first().map_or_else(IndexType::cell, GridBox::ix_type);
        if let Some(odd) = boxes.iter().find(|b| b.ix_type() != btype) {
            return Err(BoxListError::mismatch(btype, odd.ix_type()));
        }
        Ok(Self { boxes, btype })
    }

    /// Appends a box.
    ///
    /// Panics if `b` does not have this list's index type.
    #[inline]
    #[track_caller]
    pub fn push(&mut self, b: GridBox<D>) {
        if let Err(e) = self.try_push(b) {
            panic!("BoxList::push: {e}");
        }
    }

    /// Appends a box, or returns an error if it does not have this list's index type.
    #[inline]
    pub fn try_push(&mut self, b: GridBox<D>) -> Result<(), BoxListError> {
        if b.ix_type() != self.btype {
            return Err(BoxListError::mismatch(self.btype, b.ix_type()));
        }
        self.boxes.push(b);
        Ok(())
    }

    /// Appends copies of all of `other`'s boxes.
    ///
    /// Panics if `other` is nonempty and has a different index type.
    #[track_caller]
    pub fn join(&mut self, other: &BoxList<D>) {
        self.check_compatible(other, "join");
        self.boxes.extend_from_slice(&other.boxes);
    }

    /// Appends copies of the given boxes.
    ///
    /// Panics if any box has a different index type; boxes before it are still appended.
    #[track_caller]
    pub fn join_boxes(&mut self, boxes: &[GridBox<D>]) {
        for &b in boxes {
            self.push(b);
        }
    }

    /// Moves all of `other`'s boxes to the end of this list, leaving `other` empty.
    ///
    /// Panics if `other` is nonempty and has a different index type.
    #[track_caller]
    pub fn catenate(&mut self, other: &mut BoxList<D>) {
        self.check_compatible(other, "catenate");
        self.boxes.append(&mut other.boxes);
    }

    /// Reserves capacity for at least `additional` more boxes.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.boxes.reserve(additional);
    }

    /// Returns the number of boxes the list can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.boxes.capacity()
    }

    /// Returns the number of boxes, including empty ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns whether the list has no boxes at all.
    ///
    /// A list of only empty boxes is *not* empty by this definition.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Returns the first box.
    ///
    /// Panics if the list is empty; see [`BoxList::first()`] for the checked version.
    #[inline]
    #[track_caller]
    pub fn front(&self) -> &GridBox<D> {
        match self.boxes.first() {
            Some(b) => b,
            None => panic!("BoxList::front: list is empty"),
        }
    }

    /// Returns the last box.
    ///
    /// Panics if the list is empty; see [`BoxList::last()`] for the checked version.
    #[inline]
    #[track_caller]
    pub fn back(&self) -> &GridBox<D> {
        match self.boxes.last() {
            Some(b) => b,
            None => panic!("BoxList::back: list is empty"),
        }
    }

    /// Returns the first box, or [`None`] if the list is empty.
    #[inline]
    pub fn first(&self) -> Option<&GridBox<D>> {
        self.boxes.first()
    }

    /// Returns the last box, or [`None`] if the list is empty.
    #[inline]
    pub fn last(&self) -> Option<&GridBox<D>> {
        self.boxes.last()
    }

    /// Iterates over the boxes in order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, GridBox<D>> {
        self.boxes.iter()
    }

    /// Returns the boxes as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[GridBox<D>] {
        &self.boxes
    }

    /// Returns the boxes, discarding the index type.
    #[inline]
    pub fn into_boxes(self) -> Vec<GridBox<D>> {
        self.boxes
    }

    /// Removes all boxes. The index type is retained.
    #[inline]
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    /// Exchanges the contents (including index types) of two lists.
    #[inline]
    pub fn swap(&mut self, other: &mut BoxList<D>) {
        mem::swap(self, other);
    }

    /// Returns the index type shared by every box in the list.
    #[inline]
    pub const fn ix_type(&self) -> IndexType<D> {
        self.btype
    }

    /// Sets the index type of an empty list.
    ///
    /// Panics if the list is not empty, since that would change what its boxes mean.
    #[inline]
    #[track_caller]
    pub fn set_ix_type(&mut self, btype: IndexType<D>) {
        assert!(
            self.boxes.is_empty(),
            "BoxList::set_ix_type: list of {} boxes is not empty",
            self.boxes.len()
        );
        self.btype = btype;
    }

    /// Returns whether every member is nonempty. An empty list is ok.
    #[inline]
    pub fn ok(&self) -> bool {
        self.boxes.iter().all(GridBox::is_ok)
    }

    /// Total number of lattice points in all members, counting overlapping points
    /// once per member that contains them.
    ///
    /// Returns [`None`] on overflow.
    #[inline]
    pub fn num_pts(&self) -> Option<u64> {
        self.boxes
            .iter()
            .try_fold(0u64, |sum, b| sum.checked_add(b.num_pts()?))
    }

    /// Removes every empty member, keeping the order of the rest.
    pub fn remove_empty(&mut self) -> &mut Self {
        self.boxes.retain(GridBox::is_ok);
        self
    }

    // --- Geometric transforms ---

    /// Refines every member by `ratio`. See [`GridBox::refine()`].
    #[track_caller]
    pub fn refine(&mut self, ratio: impl Into<IntVect<D>>) -> &mut Self {
        let ratio = ratio.into();
        self.map_boxes(|b| b.refine(ratio))
    }

    /// Coarsens every member by `ratio`. See [`GridBox::coarsen()`].
    ///
    /// Members which were disjoint may overlap afterward.
    #[track_caller]
    pub fn coarsen(&mut self, ratio: impl Into<IntVect<D>>) -> &mut Self {
        let ratio = ratio.into();
        self.map_boxes(|b| b.coarsen(ratio))
    }

    /// Grows every member by `n` points on each side. See [`GridBox::grow()`].
    pub fn accrete(&mut self, n: impl Into<IntVect<D>>) -> &mut Self {
        let n = n.into();
        self.map_boxes(|b| b.grow(n))
    }

    /// Translates every member by `n` along `axis`.
    pub fn shift(&mut self, axis: usize, n: GridCoordinate) -> &mut Self {
        self.map_boxes(|b| b.shift(axis, n))
    }

    /// Translates every member by `offset`.
    pub fn shift_by(&mut self, offset: impl Into<IntVect<D>>) -> &mut Self {
        let offset = offset.into();
        self.map_boxes(|b| b.shift_by(offset))
    }

    /// Translates every member by `num_halfs` half-cells along `axis`, toggling the
    /// list's centering on that axis if `num_halfs` is odd.
    /// See [`GridBox::shift_half()`].
    pub fn shift_half(&mut self, axis: usize, num_halfs: GridCoordinate) -> &mut Self {
        self.btype = GridBox::empty(self.btype)
            .shift_half(axis, num_halfs)
            .ix_type();
        self.map_boxes(|b| b.shift_half(axis, num_halfs))
    }

    /// Applies [`BoxList::shift_half()`] on every axis.
    pub fn shift_half_by(&mut self, num_halfs: impl Into<IntVect<D>>) -> &mut Self {
        let num_halfs = num_halfs.into();
        self.btype = GridBox::empty(self.btype)
            .shift_half_by(num_halfs)
            .ix_type();
        self.map_boxes(|b| b.shift_half_by(num_halfs))
    }

    /// Converts every member, and the list itself, to the index type `btype`.
    /// See [`GridBox::convert()`].
    pub fn convert(&mut self, btype: IndexType<D>) -> &mut Self {
        self.btype = btype;
        self.map_boxes(|b| b.convert(btype))
    }

    /// Converts the list to node centering on every axis.
    pub fn surrounding_nodes(&mut self) -> &mut Self {
        self.convert(IndexType::node())
    }

    /// Converts the list to node centering on `axis`.
    pub fn surrounding_nodes_axis(&mut self, axis: usize) -> &mut Self {
        self.convert(self.btype.with(axis, Centering::Node))
    }

    /// Converts the list to cell centering on every axis.
    pub fn enclosed_cells(&mut self) -> &mut Self {
        self.convert(IndexType::cell())
    }

    /// Converts the list to cell centering on `axis`.
    pub fn enclosed_cells_axis(&mut self, axis: usize) -> &mut Self {
        self.convert(self.btype.with(axis, Centering::Cell))
    }

    /// Returns the smallest box containing every nonempty member.
    ///
    /// If every member is empty, returns an empty box of the list's type.
    /// Panics if the list has no members at all; see [`BoxList::checked_minimal_box()`].
    #[track_caller]
    pub fn minimal_box(&self) -> GridBox<D> {
        match self.checked_minimal_box() {
            Some(b) => b,
            None => panic!("BoxList::minimal_box: list is empty"),
        }
    }

    /// Returns the smallest box containing every nonempty member, or [`None`] if the
    /// list has no members.
    ///
    /// Empty members are skipped rather than folded in, so their corners never widen
    /// the result. This differs from taking the minimum and maximum of every member's
    /// corners whenever the list holds an empty box lying outside the others.
    pub fn checked_minimal_box(&self) -> Option<GridBox<D>> {
        if self.boxes.is_empty() {
            return None;
        }
        Some(
            self.boxes
                .iter()
                .filter(|b| b.is_ok())
                .copied()
                .reduce(GridBox::min_box)
                .unwrap_or(GridBox::empty(self.btype)),
        )
    }

    fn map_boxes(&mut self, mut f: impl FnMut(GridBox<D>) -> GridBox<D>) -> &mut Self {
        for b in &mut self.boxes {
            *b = f(*b);
        }
        self
    }

    #[track_caller]
    fn check_compatible(&self, other: &BoxList<D>, operation: &str) {
        assert!(
            other.is_empty() || other.btype == self.btype,
            "BoxList::{operation}: {}",
            BoxListError::mismatch(self.btype, other.btype)
        );
    }
}

/// Returns a copy of `list` refined by `ratio`.
#[track_caller]
pub fn refine<const D: usize>(list: &BoxList<D>, ratio: impl Into<IntVect<D>>) -> BoxList<D> {
    let mut list = list.clone();
    list.refine(ratio);
    list
}

/// Returns a copy of `list` coarsened by `ratio`.
#[track_caller]
pub fn coarsen<const D: usize>(list: &BoxList<D>, ratio: impl Into<IntVect<D>>) -> BoxList<D> {
    let mut list = list.clone();
    list.coarsen(ratio);
    list
}

/// Returns a copy of `list` with every member grown by `n`.
pub fn accrete<const D: usize>(list: &BoxList<D>, n: impl Into<IntVect<D>>) -> BoxList<D> {
    let mut list = list.clone();
    list.accrete(n);
    list
}

impl<const D: usize> PartialEq for BoxList<D> {
    /// Order-sensitive comparison of the members. The index type of an empty list
    /// does not participate.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.boxes == other.boxes
    }
}
impl<const D: usize> Eq for BoxList<D> {}

impl<const D: usize> From<GridBox<D>> for BoxList<D> {
    #[inline]
    fn from(b: GridBox<D>) -> Self {
        Self::from_box(b)
    }
}

impl<const D: usize> From<&BoxArray<D>> for BoxList<D> {
    #[inline]
    fn from(array: &BoxArray<D>) -> Self {
        Self {
            boxes: array.as_slice().to_vec(),
            btype: array.ix_type(),
        }
    }
}

impl<const D: usize> Extend<GridBox<D>> for BoxList<D> {
    /// Appends each box with [`BoxList::push()`], panicking on a type mismatch.
    fn extend<T: IntoIterator<Item = GridBox<D>>>(&mut self, iter: T) {
        for b in iter {
            self.push(b);
        }
    }
}

impl<'a, const D: usize> IntoIterator for &'a BoxList<D> {
    type Item = &'a GridBox<D>;
    type IntoIter = core::slice::Iter<'a, GridBox<D>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

impl<const D: usize> IntoIterator for BoxList<D> {
    type Item = GridBox<D>;
    type IntoIter = alloc::vec::IntoIter<GridBox<D>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.boxes.into_iter()
    }
}

/// Formats a human-readable dump of the list:
///
/// ```text
/// (BoxList 2 (C,C)
/// 0 : ((0,0) (4,9) (C,C))
/// 1 : ((5,0) (9,9) (C,C))
/// )
/// ```
impl<const D: usize> fmt::Display for BoxList<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "(BoxList {} {}", self.boxes.len(), self.btype)?;
        for (i, b) in self.boxes.iter().enumerate() {
            writeln!(f, "{i} : {b}")?;
        }
        f.write_str(")")
    }
}

#[cfg(feature = "arbitrary")]
#[mutants::skip]
impl<'a, const D: usize> arbitrary::Arbitrary<'a> for BoxList<D> {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let btype: IndexType<D> = u.arbitrary()?;
        let count: usize = u.int_in_range(0..=12)?;
        let mut boxes = Vec::with_capacity(count);
        for _ in 0..count {
            let b: GridBox<D> = u.arbitrary()?;
            boxes.push(GridBox::new(b.small_end(), b.big_end(), btype));
        }
        Ok(Self { boxes, btype })
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        arbitrary::size_hint::and(
            <IndexType<D> as arbitrary::Arbitrary<'a>>::size_hint(depth),
            (1, None),
        )
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize, Serialize)]
    struct BoxListSer<const D: usize> {
        itype: IndexType<D>,
        boxes: Vec<GridBox<D>>,
    }

    impl<const D: usize> Serialize for BoxList<D> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            BoxListSer {
                itype: self.btype,
                boxes: self.boxes.clone(),
            }
            .serialize(serializer)
        }
    }

    impl<'de, const D: usize> Deserialize<'de> for BoxList<D> {
        fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
        where
            De: Deserializer<'de>,
        {
            let BoxListSer { itype, boxes } = BoxListSer::deserialize(deserializer)?;
            if let Some(odd) = boxes.iter().find(|b| b.ix_type() != itype) {
                return Err(serde::de::Error::custom(BoxListError::mismatch(
                    itype,
                    odd.ix_type(),
                )));
            }
            Ok(BoxList {
                boxes,
                btype: itype,
            })
        }
    }
}

/// Errors reported by the fallible [`BoxList`] operations.
#[derive(Clone, Debug, Eq, Hash, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum BoxListError {
    /// A box's index type differed from the list's.
    #[error("index type mismatch: expected {expected}, found {found}")]
    IndexTypeMismatch {
        /// The list's index type, formatted.
        expected: String,
        /// The offending box's index type, formatted.
        found: String,
    },

    /// A box cannot be chopped into the requested number of nonempty pieces.
    #[error("cannot chop a box of {num_pts} points into {pieces} pieces")]
    InvalidPieceCount {
        /// Requested number of pieces.
        pieces: usize,
        /// Number of lattice points in the box.
        num_pts: u64,
    },

    /// Broadcast data did not describe a box list of this dimension.
    #[error("malformed broadcast data: {0}")]
    MalformedBroadcast(&'static str),
}

impl BoxListError {
    fn mismatch<const D: usize>(expected: IndexType<D>, found: IndexType<D>) -> Self {
        Self::IndexTypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
