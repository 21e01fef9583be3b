use core::fmt;

use crate::box_list::{BoxList, box_diff, complement_in, remove_overlap};
use crate::math::{GridBox, GridCoordinate, IndexType, IntVect};

/// A collection of boxes which never overlap one another.
///
/// Every mutation preserves that invariant: boxes being added are first reduced to
/// the parts not already covered, and transforms which could create overlap are
/// followed by overlap removal. All of this is done through [`BoxList`]'s public
/// operations.
///
/// ```
/// use latbox::BoxDomain;
/// use latbox::math::{GridBox, IndexType};
///
/// let mut domain = BoxDomain::new(IndexType::cell());
/// domain.add(GridBox::cell([0, 0], [9, 9]));
/// domain.add(GridBox::cell([5, 5], [14, 14]));
/// assert!(domain.as_list().is_disjoint());
/// assert_eq!(domain.num_pts(), Some(100 + 100 - 25));
/// ```
#[derive(Clone, Default, Eq, PartialEq)]
pub struct BoxDomain<const D: usize> {
    list: BoxList<D>,
}

impl<const D: usize> BoxDomain<D> {
    /// Constructs an empty domain of the given index type.
    pub const fn new(btype: IndexType<D>) -> Self {
        Self {
            list: BoxList::with_ix_type(btype),
        }
    }

    /// Constructs a domain covering the same points as `list`.
    pub fn from_list(list: &BoxList<D>) -> Self {
        Self {
            list: remove_overlap(list),
        }
    }

    /// Returns the disjoint boxes.
    pub fn as_list(&self) -> &BoxList<D> {
        &self.list
    }

    /// Returns the disjoint boxes.
    pub fn into_list(self) -> BoxList<D> {
        self.list
    }

    /// Iterates over the disjoint boxes.
    pub fn iter(&self) -> core::slice::Iter<'_, GridBox<D>> {
        self.list.iter()
    }

    /// Returns the number of boxes.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns whether the domain has no boxes.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the index type of the boxes.
    pub const fn ix_type(&self) -> IndexType<D> {
        self.list.ix_type()
    }

    /// Returns whether every box is nonempty.
    pub fn ok(&self) -> bool {
        self.list.ok()
    }

    /// Number of lattice points covered. Since the boxes are disjoint, this is the
    /// size of the covered region. Returns [`None`] on overflow.
    pub fn num_pts(&self) -> Option<u64> {
        self.list.num_pts()
    }

    /// Returns the smallest box containing the domain. See [`BoxList::minimal_box()`].
    #[track_caller]
    pub fn minimal_box(&self) -> GridBox<D> {
        self.list.minimal_box()
    }

    /// Returns whether every point of `other` is covered. See [`BoxList::contains()`].
    #[track_caller]
    pub fn contains(&self, other: &BoxList<D>) -> bool {
        self.list.contains(other)
    }

    /// Adds the points of `b` to the domain.
    ///
    /// Panics if `b` has a different index type.
    #[track_caller]
    pub fn add(&mut self, b: GridBox<D>) -> &mut Self {
        let mut fresh = complement_in(b, &self.list);
        self.list.catenate(&mut fresh);
        self.check_invariant();
        self
    }

    /// Adds the points of every member of `list` to the domain.
    #[track_caller]
    pub fn add_list(&mut self, list: &BoxList<D>) -> &mut Self {
        for &b in list {
            self.add(b);
        }
        self
    }

    /// Removes the points of `b` from the domain.
    #[track_caller]
    pub fn rm(&mut self, b: GridBox<D>) -> &mut Self {
        let mut remaining = BoxList::with_ix_type(self.list.ix_type());
        for &member in &self.list {
            remaining.catenate(&mut box_diff(member, b));
        }
        self.list = remaining;
        self.check_invariant();
        self
    }

    /// Restricts the domain to the points of `b`.
    #[track_caller]
    pub fn intersect(&mut self, b: &GridBox<D>) -> &mut Self {
        self.list.intersect(b).remove_empty();
        self
    }

    /// Replaces the domain with the points of `b` not covered by `list`.
    #[track_caller]
    pub fn complement_in(&mut self, b: GridBox<D>, list: &BoxList<D>) -> &mut Self {
        self.list.complement_in(b, list);
        self.check_invariant();
        self
    }

    /// Merges boxes where possible. See [`BoxList::simplify()`].
    pub fn simplify(&mut self, best: bool) -> usize {
        self.list.simplify(best)
    }

    /// Refines every box. Refinement maps disjoint boxes to disjoint boxes.
    #[track_caller]
    pub fn refine(&mut self, ratio: impl Into<IntVect<D>>) -> &mut Self {
        self.list.refine(ratio);
        self
    }

    /// Coarsens every box, then removes any overlap this created.
    #[track_caller]
    pub fn coarsen(&mut self, ratio: impl Into<IntVect<D>>) -> &mut Self {
        self.list.coarsen(ratio).remove_overlap();
        self.check_invariant();
        self
    }

    /// Grows every box by `n`, then removes any overlap this created.
    pub fn accrete(&mut self, n: impl Into<IntVect<D>>) -> &mut Self {
        self.list.accrete(n).remove_overlap();
        self.check_invariant();
        self
    }

    /// Translates every box by `n` along `axis`.
    pub fn shift(&mut self, axis: usize, n: GridCoordinate) -> &mut Self {
        self.list.shift(axis, n);
        self
    }

    fn check_invariant(&self) {
        debug_assert!(self.list.is_disjoint(), "BoxDomain is not disjoint: {}", self.list);
    }
}

impl<const D: usize> From<BoxDomain<D>> for BoxList<D> {
    fn from(domain: BoxDomain<D>) -> Self {
        domain.list
    }
}

impl<'a, const D: usize> IntoIterator for &'a BoxDomain<D> {
    type Item = &'a GridBox<D>;
    type IntoIter = core::slice::Iter<'a, GridBox<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl<const D: usize> fmt::Debug for BoxDomain<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoxDomain").field(&self.list).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_overlapping_stays_disjoint() {
        let mut domain = BoxDomain::new(IndexType::cell());
        domain
            .add(GridBox::cell([0, 0], [9, 9]))
            .add(GridBox::cell([5, 5], [14, 14]))
            .add(GridBox::cell([2, 2], [3, 3]));
        assert!(domain.as_list().is_disjoint());
        assert_eq!(domain.num_pts(), Some(175));
    }

    #[test]
    fn rm_punches_hole() {
        let mut domain = BoxDomain::from_list(&BoxList::from_box(GridBox::cell([0, 0], [9, 9])));
        domain.rm(GridBox::cell([3, 3], [6, 6]));
        assert_eq!(domain.num_pts(), Some(84));
        assert!(!domain.contains(&BoxList::from_box(GridBox::cell([4, 4], [4, 4]))));
        assert!(domain.contains(&BoxList::from_box(GridBox::cell([0, 0], [9, 2]))));
    }

    #[test]
    fn accrete_removes_overlap() {
        let mut domain = BoxDomain::new(IndexType::cell());
        domain
            .add(GridBox::cell([0, 0], [3, 3]))
            .add(GridBox::cell([4, 0], [7, 3]));
        domain.accrete(1);
        assert!(domain.as_list().is_disjoint());
        assert_eq!(domain.minimal_box(), GridBox::cell([-1, -1], [8, 4]));
        assert_eq!(domain.num_pts(), Some(10 * 6));
    }

    #[test]
    fn coarsen_removes_overlap() {
        let mut domain = BoxDomain::new(IndexType::cell());
        domain
            .add(GridBox::cell([0, 0], [2, 3]))
            .add(GridBox::cell([3, 0], [5, 3]));
        domain.coarsen(2);
        assert!(domain.as_list().is_disjoint());
        assert_eq!(domain.num_pts(), Some(3 * 2));
    }

    #[test]
    fn intersect_drops_empty() {
        let mut domain = BoxDomain::new(IndexType::cell());
        domain
            .add(GridBox::cell([0, 0], [3, 3]))
            .add(GridBox::cell([10, 0], [13, 3]));
        domain.intersect(&GridBox::cell([2, 0], [5, 5]));
        assert_eq!(domain.as_list().as_slice(), [GridBox::cell([2, 0], [3, 3])]);
    }
}
