//! Complement, intersection, and overlap removal.

use alloc::vec::Vec;
use core::mem;

use itertools::Itertools as _;
#[cfg(feature = "auto-threads")]
use rayon::iter::{IntoParallelIterator as _, ParallelIterator as _};

use crate::box_array::BoxArray;
use crate::box_list::BoxList;
use crate::math::{GridBox, IndexType};
use crate::options::ParallelComplementOptions;

/// Returns the part of `a` which is not in `b`, as at most `2 * D` disjoint slabs.
///
/// If `a` is empty the result is empty; if `b` is empty or does not intersect `a`,
/// the result is `a` itself.
///
/// Panics if the boxes have different index types.
///
/// ```
/// use latbox::box_diff;
/// use latbox::math::GridBox;
///
/// let diff = box_diff(GridBox::cell([0, 0], [9, 9]), GridBox::cell([5, 0], [20, 9]));
/// assert_eq!(diff.as_slice(), [GridBox::cell([0, 0], [4, 9])]);
/// ```
#[track_caller]
pub fn box_diff<const D: usize>(a: GridBox<D>, b: GridBox<D>) -> BoxList<D> {
    let mut out = BoxList::with_ix_type(a.ix_type());
    diff_into(a, b, &mut out.boxes);
    out
}

/// Core of [`box_diff()`], appending to `out`.
///
/// Slabs are cut starting from the highest axis, so the pieces come out roughly in
/// canonical order.
#[track_caller]
fn diff_into<const D: usize>(a: GridBox<D>, b: GridBox<D>, out: &mut Vec<GridBox<D>>) {
    if a.is_empty() {
        return;
    }
    if !a.intersects(&b) {
        out.push(a);
        return;
    }
    if b.contains(&a) {
        return;
    }
    let mut rest = a;
    for axis in (0..D).rev() {
        let b_lo = b.small_end()[axis];
        let b_hi = b.big_end()[axis];
        if rest.small_end()[axis] < b_lo {
            out.push(rest.with_big(axis, b_lo - 1));
            rest = rest.with_small(axis, b_lo);
        }
        if rest.big_end()[axis] > b_hi {
            out.push(rest.with_small(axis, b_hi + 1));
            rest = rest.with_big(axis, b_hi);
        }
    }
}

/// Computes the part of `b` not covered by any of `reference`.
///
/// Each reference box is applied to every surviving fragment in turn, so the
/// fragment list only ever shrinks in area and each reference box is visited once.
#[track_caller]
fn complement_boxes<const D: usize>(b: GridBox<D>, reference: &[GridBox<D>]) -> Vec<GridBox<D>> {
    let mut fragments = Vec::new();
    if b.is_empty() {
        return fragments;
    }
    fragments.push(b);
    let mut next = Vec::new();
    for &r in reference {
        if !r.intersects(&b) {
            continue;
        }
        for fragment in fragments.drain(..) {
            diff_into(fragment, r, &mut next);
        }
        mem::swap(&mut fragments, &mut next);
        if fragments.is_empty() {
            break;
        }
    }
    fragments
}

/// Returns the part of box `b` which is not covered by any member of `list`.
///
/// The result is disjoint, disjoint from `list`, and has `b`'s index type.
///
/// Panics if `list` is nonempty and of a different index type than `b`.
///
/// ```
/// use latbox::{BoxList, complement_in};
/// use latbox::math::GridBox;
///
/// let hole = BoxList::from_box(GridBox::cell([3, 3], [6, 6]));
/// let ring = complement_in(GridBox::cell([0, 0], [9, 9]), &hole);
/// assert_eq!(ring.num_pts(), Some(100 - 16));
/// ```
#[track_caller]
pub fn complement_in<const D: usize>(b: GridBox<D>, list: &BoxList<D>) -> BoxList<D> {
    let mut out = BoxList::with_ix_type(b.ix_type());
    out.complement_in(b, list);
    out
}

/// Returns `list` intersected with `b`, with empty results removed.
#[track_caller]
pub fn intersect<const D: usize>(list: &BoxList<D>, b: &GridBox<D>) -> BoxList<D> {
    let mut out = list.clone();
    out.intersect(b).remove_empty();
    out
}

/// Returns a disjoint list covering the same points as `list`.
pub fn remove_overlap<const D: usize>(list: &BoxList<D>) -> BoxList<D> {
    let mut out = list.clone();
    out.remove_overlap();
    out
}

impl<const D: usize> BoxList<D> {
    /// Replaces the contents of this list with the part of `b` not covered by `list`.
    /// See the free function [`complement_in()`](crate::complement_in).
    #[track_caller]
    pub fn complement_in(&mut self, b: GridBox<D>, list: &BoxList<D>) -> &mut Self {
        self.complement_in_slice(b, list.ix_type(), list.as_slice())
    }

    /// As [`BoxList::complement_in()`], with the reference boxes taken from a
    /// [`BoxArray`].
    #[track_caller]
    pub fn complement_in_array(&mut self, b: GridBox<D>, array: &BoxArray<D>) -> &mut Self {
        self.complement_in_slice(b, array.ix_type(), array.as_slice())
    }

    #[track_caller]
    fn complement_in_slice(
        &mut self,
        b: GridBox<D>,
        reference_type: IndexType<D>,
        reference: &[GridBox<D>],
    ) -> &mut Self {
        assert!(
            reference.is_empty() || reference_type == b.ix_type(),
            "BoxList::complement_in: box type {} differs from reference type {reference_type}",
            b.ix_type(),
        );
        self.boxes = complement_boxes(b, reference);
        self.btype = b.ix_type();
        log::trace!(
            "complement_in: {} reference boxes left {} fragments",
            reference.len(),
            self.boxes.len()
        );
        self
    }

    /// Computes the same region as [`BoxList::complement_in()`], splitting the work
    /// into independent tiles which are processed in parallel when the
    /// `auto-threads` feature is enabled. Only the part of `b` inside the bounding box
    /// of `list` is tiled; the rest of `b` is kept whole.
    ///
    /// Uses [`ParallelComplementOptions::default()`]. The fragments are coalesced
    /// with [`BoxList::simplify()`] afterward, so the arrangement of boxes differs from
    /// the sequential version even though the covered points are the same.
    #[track_caller]
    pub fn parallel_complement_in(&mut self, b: GridBox<D>, list: &BoxList<D>) -> &mut Self {
        self.parallel_complement_in_with(b, list, &ParallelComplementOptions::default())
    }

    /// As [`BoxList::parallel_complement_in()`] with explicit options.
    #[track_caller]
    pub fn parallel_complement_in_with(
        &mut self,
        b: GridBox<D>,
        list: &BoxList<D>,
        options: &ParallelComplementOptions,
    ) -> &mut Self {
        if list.len() <= options.min_members || b.is_empty() {
            return self.complement_in(b, list);
        }
        assert!(
            list.ix_type() == b.ix_type(),
            "BoxList::parallel_complement_in: box type {} differs from reference type {}",
            b.ix_type(),
            list.ix_type(),
        );

        // Nothing outside the reference bounds is covered, so only their overlap with
        // `b` needs tiling.
        let bounds = list.minimal_box();
        let mut outside = Vec::new();
        diff_into(b, bounds, &mut outside);
        let mut tiles = BoxList::from_box(b.intersection(bounds));
        tiles.remove_empty().max_size(options.chunk);
        log::debug!(
            "parallel_complement_in: {} reference boxes over {} tiles of at most {}",
            list.len(),
            tiles.len(),
            options.chunk,
        );
        let reference = list.as_slice();

        #[cfg(feature = "auto-threads")]
        let pieces: Vec<Vec<GridBox<D>>> = tiles
            .boxes
            .into_par_iter()
            .map(|tile| complement_boxes(tile, reference))
            .collect();
        #[cfg(not(feature = "auto-threads"))]
        let pieces: Vec<Vec<GridBox<D>>> = tiles
            .boxes
            .into_iter()
            .map(|tile| complement_boxes(tile, reference))
            .collect();

        outside.extend(pieces.into_iter().flatten());
        self.boxes = outside;
        self.btype = b.ix_type();
        self.simplify(false);
        self
    }

    /// Replaces every member with its intersection with `b`.
    ///
    /// Members which do not intersect `b` become empty boxes and stay in the list;
    /// follow with [`BoxList::remove_empty()`] to drop them.
    ///
    /// Panics if the list is nonempty and of a different index type than `b`.
    #[track_caller]
    pub fn intersect(&mut self, b: &GridBox<D>) -> &mut Self {
        for member in &mut self.boxes {
            *member = member.intersection(*b);
        }
        self
    }

    /// Replaces the contents with every nonempty pairwise intersection of a member of
    /// this list with a member of `other`.
    #[track_caller]
    pub fn intersect_list(&mut self, other: &BoxList<D>) -> &mut Self {
        self.check_compatible(other, "intersect_list");
        self.boxes = self
            .boxes
            .iter()
            .cartesian_product(other.boxes.iter())
            .map(|(&a, &c)| a.intersection(c))
            .filter(GridBox::is_ok)
            .collect();
        self
    }

    /// Returns whether no two members share a lattice point.
    pub fn is_disjoint(&self) -> bool {
        self.boxes
            .iter()
            .tuple_combinations()
            .all(|(a, b)| !a.intersects(b))
    }

    /// Returns whether every point of every member of `other` is covered by this
    /// list.
    ///
    /// Returns `false` if either list has no members.
    #[track_caller]
    pub fn contains(&self, other: &BoxList<D>) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.check_compatible(other, "contains");
        other
            .boxes
            .iter()
            .all(|&b| complement_boxes(b, &self.boxes).is_empty())
    }

    /// Rearranges the members so that no two overlap, covering the same points, and
    /// then merges what it can with [`BoxList::simplify()`]. Empty members are dropped.
    pub fn remove_overlap(&mut self) -> &mut Self {
        let mut disjoint: Vec<GridBox<D>> = Vec::with_capacity(self.boxes.len());
        for b in mem::take(&mut self.boxes) {
            let fresh = complement_boxes(b, &disjoint);
            disjoint.extend(fresh);
        }
        self.boxes = disjoint;
        self.simplify(false);
        self
    }
}
