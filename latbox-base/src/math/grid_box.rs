//! Axis-aligned boxes of lattice points ([`GridBox`]) and related errors.

use core::fmt;
use core::ops;

use crate::math::{Centering, GridCoordinate, IndexType, IntVect, PointIter};

/// An axis-aligned box of lattice points in `D` dimensions, tagged with the
/// [`IndexType`] saying whether its indices count cells or nodes on each axis.
///
/// Both corners are *inclusive*: the box `GridBox::cell([0, 0], [9, 9])` contains
/// 100 cells. A box whose upper corner is less than its lower corner on any axis is
/// *empty*; empty boxes are legitimate values and every operation accepts them.
///
/// The same region of space is described differently under different centerings:
///
/// ```
/// use latbox_base::math::{GridBox, IndexType};
///
/// let cells = GridBox::cell([0, 0], [9, 9]);
/// let nodes = cells.surrounding_nodes();
/// assert_eq!(nodes, GridBox::node([0, 0], [10, 10]));
/// assert_eq!(nodes.enclosed_cells(), cells);
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct GridBox<const D: usize> {
    small_end: IntVect<D>,
    big_end: IntVect<D>,
    itype: IndexType<D>,
}

impl<const D: usize> GridBox<D> {
    /// Constructs a box from its inclusive corners.
    ///
    /// If `big_end` is less than `small_end` on any axis, the box is empty.
    #[inline]
    pub fn new(
        small_end: impl Into<IntVect<D>>,
        big_end: impl Into<IntVect<D>>,
        itype: IndexType<D>,
    ) -> Self {
        Self {
            small_end: small_end.into(),
            big_end: big_end.into(),
            itype,
        }
    }

    /// Constructs a cell-centered box from its inclusive corners.
    #[inline]
    pub fn cell(small_end: impl Into<IntVect<D>>, big_end: impl Into<IntVect<D>>) -> Self {
        Self::new(small_end, big_end, IndexType::cell())
    }

    /// Constructs a node-centered box from its inclusive corners.
    #[inline]
    pub fn node(small_end: impl Into<IntVect<D>>, big_end: impl Into<IntVect<D>>) -> Self {
        Self::new(small_end, big_end, IndexType::node())
    }

    /// Returns an empty box of the given type.
    ///
    /// Use this as the placeholder “nothing” value when some box is required.
    #[inline]
    pub const fn empty(itype: IndexType<D>) -> Self {
        Self {
            small_end: IntVect::ONE,
            big_end: IntVect::ZERO,
            itype,
        }
    }

    /// Constructs a box from its lower corner and its number of points along each axis.
    ///
    /// Returns [`Err`] if any size is negative or the upper corner would overflow.
    /// A size of zero is allowed and yields an empty box.
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn checked_from_lower_size(
        lower: impl Into<IntVect<D>>,
        size: impl Into<IntVect<D>>,
        itype: IndexType<D>,
    ) -> Result<Self, GridBoxError> {
        let lower = lower.into();
        let size = size.into();
        let mut big_end = IntVect::ZERO;
        for axis in 0..D {
            let length = size[axis];
            if length < 0 {
                return Err(GridBoxError::NegativeSize { axis, size: length });
            }
            big_end[axis] = lower[axis]
                .checked_add(length - 1)
                .ok_or(GridBoxError::Overflow {
                    axis,
                    lower: lower[axis],
                    size: length,
                })?;
        }
        Ok(Self {
            small_end: lower,
            big_end,
            itype,
        })
    }

    /// Constructs a box from its lower corner and its number of points along each axis.
    ///
    /// Panics if any size is negative or the upper corner would overflow.
    /// Use [`GridBox::checked_from_lower_size()`] to avoid panics.
    ///
    /// ```
    /// use latbox_base::math::{GridBox, IndexType};
    ///
    /// assert_eq!(
    ///     GridBox::from_lower_size([5, -2], [10, 4], IndexType::cell()),
    ///     GridBox::cell([5, -2], [14, 1]),
    /// );
    /// ```
    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn from_lower_size(
        lower: impl Into<IntVect<D>>,
        size: impl Into<IntVect<D>>,
        itype: IndexType<D>,
    ) -> Self {
        match Self::checked_from_lower_size(lower, size, itype) {
            Ok(b) => b,
            Err(e) => panic!("GridBox::from_lower_size: {e}"),
        }
    }

    /// Inclusive lower corner.
    #[inline]
    pub const fn small_end(&self) -> IntVect<D> {
        self.small_end
    }

    /// Inclusive upper corner.
    #[inline]
    pub const fn big_end(&self) -> IntVect<D> {
        self.big_end
    }

    /// Centering of this box.
    #[inline]
    pub const fn ix_type(&self) -> IndexType<D> {
        self.itype
    }

    /// Returns whether the box contains at least one lattice point, i.e. its upper
    /// corner is not less than its lower corner on any axis.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.small_end.all_le(&self.big_end)
    }

    /// Returns whether the box contains no lattice points. Equivalent to `!self.is_ok()`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.is_ok()
    }

    /// Returns whether both boxes have the same [`IndexType`].
    #[inline]
    pub fn same_type(&self, other: &Self) -> bool {
        self.itype == other.itype
    }

    /// Number of points along `axis`. Zero or negative if the box is empty along it.
    ///
    /// Panics if the length does not fit in a [`GridCoordinate`], which happens only
    /// for boxes spanning more than half the coordinate range;
    /// see [`GridBox::checked_length()`].
    #[inline]
    #[track_caller]
    pub fn length(&self, axis: usize) -> GridCoordinate {
        match self.checked_length(axis) {
            Some(length) => length,
            None => panic!("GridBox::length: length of {self} on axis {axis} overflows"),
        }
    }

    /// Number of points along `axis`, or [`None`] if that does not fit in a
    /// [`GridCoordinate`].
    #[inline]
    pub fn checked_length(&self, axis: usize) -> Option<GridCoordinate> {
        self.big_end[axis]
            .checked_sub(self.small_end[axis])?
            .checked_add(1)
    }

    /// Number of points along each axis.
    ///
    /// Panics under the same conditions as [`GridBox::length()`];
    /// see [`GridBox::checked_size()`].
    #[inline]
    #[track_caller]
    pub fn size(&self) -> IntVect<D> {
        match self.checked_size() {
            Some(size) => size,
            None => panic!("GridBox::size: size of {self} overflows"),
        }
    }

    /// Number of points along each axis, or [`None`] if any of them does not fit in a
    /// [`GridCoordinate`].
    #[inline]
    pub fn checked_size(&self) -> Option<IntVect<D>> {
        let mut size = IntVect::ZERO;
        for axis in 0..D {
            size[axis] = self.checked_length(axis)?;
        }
        Some(size)
    }

    /// Returns the longest axis and its length. Ties are won by the lowest axis.
    ///
    /// Panics if `D` is zero, or if a length overflows as in [`GridBox::length()`].
    #[inline]
    #[track_caller]
    pub fn long_side(&self) -> (usize, GridCoordinate) {
        assert!(D > 0, "GridBox::long_side: zero-dimensional box has no sides");
        let mut best = (0, self.length(0));
        for axis in 1..D {
            let length = self.length(axis);
            if length > best.1 {
                best = (axis, length);
            }
        }
        best
    }

    /// Number of lattice points in the box; zero if it is empty.
    ///
    /// Returns [`None`] if the count does not fit in a [`u64`].
    ///
    /// ```
    /// use latbox_base::math::GridBox;
    ///
    /// assert_eq!(GridBox::cell([0, 0, 0], [9, 19, 29]).num_pts(), Some(6000));
    /// assert_eq!(GridBox::cell([0, 0, 0], [9, -1, 29]).num_pts(), Some(0));
    /// ```
    #[inline]
    pub fn num_pts(&self) -> Option<u64> {
        if self.is_empty() {
            return Some(0);
        }
        (0..D).try_fold(1u64, |product, axis| {
            // Cannot fail: a nonempty box has positive lengths.
            let length = u64::try_from(i64::from(self.big_end[axis]) - i64::from(self.small_end[axis]) + 1).ok()?;
            product.checked_mul(length)
        })
    }

    /// Returns whether the box includes the given lattice point.
    #[inline]
    pub fn contains_point(&self, point: impl Into<IntVect<D>>) -> bool {
        let point = point.into();
        self.small_end.all_le(&point) && point.all_le(&self.big_end)
    }

    /// Returns whether `other`'s corners lie within `self`.
    ///
    /// This compares corners only; set-algebra callers should treat empty boxes
    /// separately.
    ///
    /// Panics if the boxes have different index types.
    #[inline]
    #[track_caller]
    pub fn contains(&self, other: &Self) -> bool {
        self.assert_same_type(other, "contains");
        self.small_end.all_le(&other.small_end) && other.big_end.all_le(&self.big_end)
    }

    /// Returns whether the two boxes have at least one lattice point in common.
    ///
    /// Boxes which merely touch (cell boxes whose ranges are adjacent) do not intersect.
    ///
    /// Panics if the boxes have different index types.
    #[inline]
    #[track_caller]
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(*other).is_ok()
    }

    /// Returns the box of lattice points which are in both `self` and `other`.
    ///
    /// The result is empty if they do not intersect. This is also available as the
    /// `&` operator.
    ///
    /// Panics if the boxes have different index types.
    ///
    /// ```
    /// use latbox_base::math::GridBox;
    ///
    /// let a = GridBox::cell([0, 0], [9, 9]);
    /// assert_eq!(a & GridBox::cell([5, -5], [20, 5]), GridBox::cell([5, 0], [9, 5]));
    /// assert!((a & GridBox::cell([10, 0], [12, 9])).is_empty());
    /// ```
    #[inline]
    #[track_caller]
    #[must_use]
    pub fn intersection(self, other: Self) -> Self {
        self.assert_same_type(&other, "intersection");
        Self {
            small_end: self.small_end.max(other.small_end),
            big_end: self.big_end.min(other.big_end),
            itype: self.itype,
        }
    }

    /// Returns the smallest box containing the corners of both boxes.
    ///
    /// Panics if the boxes have different index types.
    #[inline]
    #[track_caller]
    #[must_use]
    pub fn min_box(self, other: Self) -> Self {
        self.assert_same_type(&other, "min_box");
        Self {
            small_end: self.small_end.min(other.small_end),
            big_end: self.big_end.max(other.big_end),
            itype: self.itype,
        }
    }

    /// Returns a copy with the lower corner on `axis` replaced.
    #[inline]
    #[must_use]
    pub fn with_small(mut self, axis: usize, value: GridCoordinate) -> Self {
        self.small_end[axis] = value;
        self
    }

    /// Returns a copy with the upper corner on `axis` replaced.
    #[inline]
    #[must_use]
    pub fn with_big(mut self, axis: usize, value: GridCoordinate) -> Self {
        self.big_end[axis] = value;
        self
    }

    /// Translates the box by `n` points along `axis`.
    #[inline]
    #[must_use]
    pub fn shift(mut self, axis: usize, n: GridCoordinate) -> Self {
        self.small_end[axis] += n;
        self.big_end[axis] += n;
        self
    }

    /// Translates the box by `offset`.
    #[inline]
    #[must_use]
    pub fn shift_by(self, offset: impl Into<IntVect<D>>) -> Self {
        let offset = offset.into();
        Self {
            small_end: self.small_end + offset,
            big_end: self.big_end + offset,
            itype: self.itype,
        }
    }

    /// Translates the box by `num_halfs` half-cell widths along `axis`.
    ///
    /// An odd number of halves toggles the centering on that axis:
    ///
    /// ```
    /// use latbox_base::math::{Centering, GridBox, IndexType};
    ///
    /// let cells = GridBox::cell([0, 0], [3, 3]);
    /// // Cell i is centered at i + ½, so moving right by ½ lands on node i + 1.
    /// assert_eq!(
    ///     cells.shift_half(0, 1),
    ///     GridBox::new([1, 0], [4, 3], IndexType::cell().with(0, Centering::Node)),
    /// );
    /// assert_eq!(cells.shift_half(0, 1).shift_half(0, -1), cells);
    /// ```
    #[inline]
    #[must_use]
    pub fn shift_half(mut self, axis: usize, num_halfs: GridCoordinate) -> Self {
        let odd = num_halfs.rem_euclid(2);
        let was_node = self.itype.is_node(axis);
        let mut nshift = num_halfs / 2;
        if odd == 1 {
            self.itype = self.itype.flipped(axis);
        }
        if num_halfs < 0 {
            if was_node {
                nshift -= odd;
            }
        } else if !was_node {
            nshift += odd;
        }
        self.shift(axis, nshift)
    }

    /// Applies [`GridBox::shift_half()`] on every axis.
    #[inline]
    #[must_use]
    pub fn shift_half_by(self, num_halfs: impl Into<IntVect<D>>) -> Self {
        let num_halfs = num_halfs.into();
        (0..D).fold(self, |b, axis| b.shift_half(axis, num_halfs[axis]))
    }

    /// Moves every face outward by `n` points (inward where `n` is negative).
    #[inline]
    #[must_use]
    pub fn grow(self, n: impl Into<IntVect<D>>) -> Self {
        let n = n.into();
        Self {
            small_end: self.small_end - n,
            big_end: self.big_end + n,
            itype: self.itype,
        }
    }

    /// Moves both faces perpendicular to `axis` outward by `n` points.
    #[inline]
    #[must_use]
    pub fn grow_axis(mut self, axis: usize, n: GridCoordinate) -> Self {
        self.small_end[axis] -= n;
        self.big_end[axis] += n;
        self
    }

    /// Scales the box up by `ratio`, so that it covers the same region of space on a
    /// lattice `ratio` times finer.
    ///
    /// Panics if any component of `ratio` is not positive.
    ///
    /// ```
    /// use latbox_base::math::GridBox;
    ///
    /// assert_eq!(GridBox::cell([1, 2], [3, 4]).refine(2), GridBox::cell([2, 4], [7, 9]));
    /// assert_eq!(GridBox::node([1, 2], [3, 4]).refine(2), GridBox::node([2, 4], [6, 8]));
    /// ```
    #[inline]
    #[track_caller]
    #[must_use]
    pub fn refine(self, ratio: impl Into<IntVect<D>>) -> Self {
        let ratio = ratio.into();
        assert!(
            ratio.all_positive(),
            "GridBox::refine: ratio must be positive, not {ratio}"
        );
        // Cell upper bounds refine to the last fine cell within the coarse cell.
        let cell_offset = IntVect::ONE - self.itype.node_offsets();
        Self {
            small_end: self.small_end * ratio,
            big_end: (self.big_end + cell_offset) * ratio - cell_offset,
            itype: self.itype,
        }
    }

    /// Scales the box down by `ratio`, rounding outward so that the result covers
    /// every point of the original.
    ///
    /// When the box's extent is divisible by `ratio`, this is the exact inverse of
    /// [`GridBox::refine()`].
    ///
    /// Panics if any component of `ratio` is not positive.
    ///
    /// ```
    /// use latbox_base::math::GridBox;
    ///
    /// assert_eq!(GridBox::cell([2, 4], [7, 9]).coarsen(2), GridBox::cell([1, 2], [3, 4]));
    /// assert_eq!(GridBox::cell([-3, 0], [2, 0]).coarsen(2), GridBox::cell([-2, 0], [1, 0]));
    /// assert_eq!(GridBox::node([-3, 0], [3, 0]).coarsen(2), GridBox::node([-2, 0], [2, 0]));
    /// ```
    #[inline]
    #[track_caller]
    #[must_use]
    pub fn coarsen(self, ratio: impl Into<IntVect<D>>) -> Self {
        let ratio = ratio.into();
        assert!(
            ratio.all_positive(),
            "GridBox::coarsen: ratio must be positive, not {ratio}"
        );
        let mut big_end = self.big_end.coarsen(ratio);
        for axis in 0..D {
            // A node which is not on the coarse lattice rounds up to the next coarse node.
            if self.itype.is_node(axis) && self.big_end[axis].rem_euclid(ratio[axis]) != 0 {
                big_end[axis] += 1;
            }
        }
        Self {
            small_end: self.small_end.coarsen(ratio),
            big_end,
            itype: self.itype,
        }
    }

    /// Changes the index type, adjusting the upper corner so that the box describes
    /// the same cells: a cell axis that becomes node-centered gains the node past its
    /// last cell, and a node axis that becomes cell-centered loses it.
    #[inline]
    #[must_use]
    pub fn convert(self, itype: IndexType<D>) -> Self {
        Self {
            small_end: self.small_end,
            big_end: self.big_end + itype.node_offsets() - self.itype.node_offsets(),
            itype,
        }
    }

    /// Converts every axis to node centering.
    #[inline]
    #[must_use]
    pub fn surrounding_nodes(self) -> Self {
        self.convert(IndexType::node())
    }

    /// Converts `axis` to node centering.
    #[inline]
    #[must_use]
    pub fn surrounding_nodes_axis(self, axis: usize) -> Self {
        self.convert(self.itype.with(axis, Centering::Node))
    }

    /// Converts every axis to cell centering.
    #[inline]
    #[must_use]
    pub fn enclosed_cells(self) -> Self {
        self.convert(IndexType::cell())
    }

    /// Converts `axis` to cell centering.
    #[inline]
    #[must_use]
    pub fn enclosed_cells_axis(self, axis: usize) -> Self {
        self.convert(self.itype.with(axis, Centering::Cell))
    }

    /// Splits the box into the points below `point` on `axis` and the points at or
    /// above it. The two halves are disjoint and together are exactly `self`.
    ///
    /// Panics unless `point` lies strictly inside the box's range on `axis`, so that
    /// both halves are nonempty.
    ///
    /// ```
    /// use latbox_base::math::GridBox;
    ///
    /// assert_eq!(
    ///     GridBox::cell([0, 0], [9, 9]).chop(1, 4),
    ///     (GridBox::cell([0, 0], [9, 3]), GridBox::cell([0, 4], [9, 9])),
    /// );
    /// ```
    #[inline]
    #[track_caller]
    pub fn chop(self, axis: usize, point: GridCoordinate) -> (Self, Self) {
        assert!(
            self.small_end[axis] < point && point <= self.big_end[axis],
            "GridBox::chop: point {point} not in ({lo}, {hi}] on axis {axis}",
            lo = self.small_end[axis],
            hi = self.big_end[axis],
        );
        (
            self.with_big(axis, point - 1),
            self.with_small(axis, point),
        )
    }

    /// Iterates over every lattice point in the box, with axis 0 varying fastest.
    #[inline]
    pub fn iter_points(self) -> PointIter<D> {
        PointIter::new(self)
    }

    #[inline]
    #[track_caller]
    fn assert_same_type(&self, other: &Self, operation: &str) {
        assert!(
            self.itype == other.itype,
            "GridBox::{operation}: mismatched index types {} and {}",
            self.itype,
            other.itype
        );
    }
}

impl<const D: usize> ops::BitAnd for GridBox<D> {
    type Output = Self;

    /// Equivalent to [`GridBox::intersection()`].
    #[inline]
    #[track_caller]
    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl<const D: usize> fmt::Debug for GridBox<D> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut t = f.debug_tuple("GridBox");
        for axis in 0..D {
            t.field(&(self.small_end[axis]..=self.big_end[axis]));
        }
        t.field(&self.itype).finish()
    }
}

/// Formats as `((lo) (hi) (type))`, e.g. `((0,0) (9,9) (C,C))`.
impl<const D: usize> fmt::Display for GridBox<D> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.small_end, self.big_end, self.itype)
    }
}

#[cfg(feature = "arbitrary")]
#[mutants::skip]
impl<'a, const D: usize> arbitrary::Arbitrary<'a> for GridBox<D> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let lower: IntVect<D> = u.arbitrary()?;
        let mut size = IntVect::ZERO;
        for axis in 0..D {
            size[axis] = u.int_in_range(0..=16)?;
        }
        Ok(Self::from_lower_size(lower, size, u.arbitrary()?))
    }

    #[allow(clippy::missing_inline_in_public_items)]
    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        arbitrary::size_hint::and_all(&[
            <IntVect<D> as arbitrary::Arbitrary<'a>>::size_hint(depth),
            (D, Some(D)),
            <IndexType<D> as arbitrary::Arbitrary<'a>>::size_hint(depth),
        ])
    }
}

/// Error when a [`GridBox`] cannot be constructed from the given input.
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, PartialEq)]
#[non_exhaustive]
pub enum GridBoxError {
    /// size {size} on axis {axis} is negative
    NegativeSize {
        /// Axis of the offending size.
        axis: usize,
        /// The offending size.
        size: GridCoordinate,
    },
    /// lower bound {lower} plus size {size} on axis {axis} overflows
    Overflow {
        /// Axis on which overflow occurred.
        axis: usize,
        /// Lower corner coordinate.
        lower: GridCoordinate,
        /// Requested size.
        size: GridCoordinate,
    },
}

impl core::error::Error for GridBoxError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString as _;

    #[test]
    fn zero_size_is_empty() {
        let b = GridBox::from_lower_size([1, 2, 3], [0, 1, 1], IndexType::cell());
        assert_eq!(b, GridBox::cell([1, 2, 3], [0, 2, 3]));
        assert!(b.is_empty());
        assert_eq!(b.num_pts(), Some(0));
    }

    #[test]
    fn from_lower_size_errors() {
        assert_eq!(
            GridBox::checked_from_lower_size([0, 0], [3, -1], IndexType::cell()),
            Err(GridBoxError::NegativeSize { axis: 1, size: -1 })
        );
        assert_eq!(
            GridBox::checked_from_lower_size([GridCoordinate::MAX, 0], [3, 1], IndexType::cell())
                .unwrap_err()
                .to_string(),
            "lower bound 2147483647 plus size 3 on axis 0 overflows"
        );
    }

    #[test]
    #[should_panic(expected = "GridBox::from_lower_size: size -1 on axis 1 is negative")]
    fn from_lower_size_panic() {
        let _ = GridBox::from_lower_size([0, 0], [3, -1], IndexType::cell());
    }

    #[test]
    fn refine_coarsen_round_trip() {
        for itype in [IndexType::cell(), IndexType::node(), IndexType::cell().flipped(1)] {
            let b = GridBox::new([-3, 4, 0], [5, 9, 0], itype);
            for ratio in [IntVect([2, 2, 2]), IntVect([4, 3, 1])] {
                assert_eq!(b.refine(ratio).coarsen(ratio), b, "{itype} {ratio}");
            }
        }
    }

    #[test]
    fn coarsen_covers_original() {
        let b = GridBox::cell([-3, 1], [6, 4]);
        let coarse = b.coarsen(4);
        assert_eq!(coarse, GridBox::cell([-1, 0], [1, 1]));
        assert!(coarse.refine(4).contains(&b));
    }

    #[test]
    #[should_panic(expected = "GridBox::refine: ratio must be positive, not (0,1)")]
    fn refine_by_zero() {
        let _ = GridBox::cell([0, 0], [1, 1]).refine([0, 1]);
    }

    #[test]
    fn shift_half_cases() {
        let cell = GridBox::cell([4], [6]);
        let node = GridBox::node([4], [6]);
        assert_eq!(cell.shift_half(0, 1), GridBox::node([5], [7]));
        assert_eq!(node.shift_half(0, 1), GridBox::cell([4], [6]));
        assert_eq!(cell.shift_half(0, -1), GridBox::node([4], [6]));
        assert_eq!(node.shift_half(0, -1), GridBox::cell([3], [5]));
        assert_eq!(cell.shift_half(0, 2), cell.shift(0, 1));
        assert_eq!(cell.shift_half(0, 3), GridBox::node([6], [8]));
        assert_eq!(node.shift_half(0, -3), GridBox::cell([2], [4]));
    }

    #[test]
    fn convert_round_trip() {
        let b = GridBox::cell([0, 0, 0], [3, 4, 5]);
        let face = b.surrounding_nodes_axis(2);
        assert_eq!(face.big_end(), IntVect([3, 4, 6]));
        assert_eq!(face.enclosed_cells_axis(2), b);
        assert_eq!(b.surrounding_nodes().enclosed_cells(), b);
        assert_eq!(face.convert(IndexType::node()), b.surrounding_nodes());
    }

    #[test]
    fn intersects_touching() {
        let a = GridBox::cell([0, 0], [4, 4]);
        assert!(!a.intersects(&GridBox::cell([5, 0], [9, 4])));
        assert!(a.intersects(&GridBox::cell([4, 4], [9, 9])));
        // Node boxes sharing a face do share lattice points.
        let n = GridBox::node([0, 0], [4, 4]);
        assert!(n.intersects(&GridBox::node([4, 0], [8, 4])));
    }

    #[test]
    #[should_panic(expected = "GridBox::intersection: mismatched index types (C,C) and (N,N)")]
    fn intersection_type_mismatch() {
        let _ = GridBox::cell([0, 0], [1, 1]) & GridBox::node([0, 0], [1, 1]);
    }

    #[test]
    fn long_side_ties() {
        assert_eq!(GridBox::cell([0, 0, 0], [4, 9, 9]).long_side(), (1, 10));
    }

    #[test]
    fn full_range_lengths() {
        let wide = GridBox::cell([i32::MIN, 0], [i32::MAX, 0]);
        assert_eq!(wide.checked_length(0), None);
        assert_eq!(wide.checked_length(1), Some(1));
        assert_eq!(wide.checked_size(), None);
        assert_eq!(wide.num_pts(), Some(1 << 32));
        let half = GridBox::cell([1, 0], [i32::MAX, 0]);
        assert_eq!(half.checked_size(), Some(IntVect([i32::MAX, 1])));
    }

    #[test]
    #[should_panic(expected = "GridBox::length: length of ((-2147483648,0) (2147483647,0) (C,C)) on axis 0 overflows")]
    fn full_range_length_panics() {
        let _ = GridBox::cell([i32::MIN, 0], [i32::MAX, 0]).length(0);
    }

    #[test]
    #[should_panic(expected = "GridBox::chop: point 0 not in (0, 9] on axis 0")]
    fn chop_at_edge() {
        let _ = GridBox::cell([0, 0], [9, 9]).chop(0, 0);
    }

    #[test]
    fn display_and_debug() {
        let b = GridBox::new([0, -1], [9, 9], IndexType::cell().flipped(1));
        assert_eq!(b.to_string(), "((0,-1) (9,9) (C,N))");
        assert_eq!(format!("{b:?}"), "GridBox(0..=9, -1..=9, IndexType(C,N))");
    }
}
