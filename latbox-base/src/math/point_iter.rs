use core::iter::FusedIterator;

use crate::math::{GridBox, IntVect};

/// Iterator produced by [`GridBox::iter_points()`].
///
/// Points are produced with axis 0 varying fastest, which is ascending order under
/// [`IntVect::lex_cmp()`].
#[derive(Clone, Debug)]
pub struct PointIter<const D: usize> {
    lower: IntVect<D>,
    upper: IntVect<D>,
    /// Next point to produce, or [`None`] if exhausted.
    next: Option<IntVect<D>>,
}

impl<const D: usize> PointIter<D> {
    #[inline]
    pub(in crate::math) fn new(bounds: GridBox<D>) -> Self {
        Self {
            lower: bounds.small_end(),
            upper: bounds.big_end(),
            next: bounds.is_ok().then(|| bounds.small_end()),
        }
    }

    /// Number of points not yet produced, or [`None`] if it does not fit in a `u128`.
    fn remaining(&self) -> Option<u128> {
        let Some(next) = self.next else {
            return Some(0);
        };
        let mut passed: u128 = 0;
        let mut stride: u128 = 1;
        for axis in 0..D {
            let lower = i64::from(self.lower[axis]);
            let extent = (i64::from(self.upper[axis]) - lower + 1).unsigned_abs();
            let offset = (i64::from(next[axis]) - lower).unsigned_abs();
            passed = passed.checked_add(u128::from(offset).checked_mul(stride)?)?;
            stride = stride.checked_mul(u128::from(extent))?;
        }
        stride.checked_sub(passed)
    }
}

impl<const D: usize> Iterator for PointIter<D> {
    type Item = IntVect<D>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        let mut following = current;
        self.next = None;
        for axis in 0..D {
            if following[axis] < self.upper[axis] {
                following[axis] += 1;
                self.next = Some(following);
                break;
            }
            // Carry into the next axis.
            following[axis] = self.lower[axis];
        }

        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining().map(usize::try_from) {
            Some(Ok(remaining)) => (remaining, Some(remaining)),
            // More points than `usize` can count.
            _ => (usize::MAX, None),
        }
    }
}

/// Exact as long as the remaining count fits in a `usize`.
impl<const D: usize> ExactSizeIterator for PointIter<D> {}
impl<const D: usize> FusedIterator for PointIter<D> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn order_and_count() {
        let b = GridBox::cell([10, 20], [11, 22]);
        assert_eq!(
            b.iter_points().collect::<Vec<_>>(),
            vec![
                IntVect([10, 20]),
                IntVect([11, 20]),
                IntVect([10, 21]),
                IntVect([11, 21]),
                IntVect([10, 22]),
                IntVect([11, 22]),
            ]
        );
    }

    #[test]
    fn size_hint_counts_down() {
        let b = GridBox::cell([-2, 5, 0], [1, 7, 2]);
        let expected = 4 * 3 * 3;
        let mut iter = b.iter_points();
        for remaining in (1..=expected).rev() {
            assert_eq!(iter.size_hint(), (remaining, Some(remaining)));
            assert!(iter.next().is_some());
        }
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
        assert_eq!(iter.size_hint(), (0, Some(0)));
    }

    #[test]
    fn size_hint_at_extremes() {
        let b = GridBox::node([i32::MIN, i32::MAX - 1], [i32::MIN + 1, i32::MAX]);
        assert_eq!(b.iter_points().len(), 4);
        #[cfg(target_pointer_width = "64")]
        {
            let wide = GridBox::cell([i32::MIN, 0], [i32::MAX, 0]);
            assert_eq!(wide.iter_points().size_hint(), (1 << 32, Some(1 << 32)));
        }
    }

    #[test]
    fn empty_box_has_no_points() {
        let b = GridBox::cell([0, 0, 0], [4, -1, 4]);
        assert_eq!(b.iter_points().count(), 0);
    }

    #[test]
    fn single_point() {
        let b = GridBox::node([3, 3, 3], [3, 3, 3]);
        assert_eq!(b.iter_points().collect::<Vec<_>>(), vec![IntVect([3, 3, 3])]);
    }
}
