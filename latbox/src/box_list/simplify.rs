//! Coalescing adjacent members.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::mem;

use crate::box_list::BoxList;
use crate::math::GridBox;
use crate::options::SimplifyOptions;

/// Returns the union of `a` and `b` if it is exactly a box: that is, the two agree on
/// every axis but at most one, and on that axis their ranges overlap or abut.
///
/// Empty boxes never merge.
fn try_merge<const D: usize>(a: GridBox<D>, b: GridBox<D>) -> Option<GridBox<D>> {
    if a.is_empty() || b.is_empty() || !a.same_type(&b) {
        return None;
    }
    let mut differing_axis = None;
    for axis in 0..D {
        if a.small_end()[axis] == b.small_end()[axis] && a.big_end()[axis] == b.big_end()[axis] {
            continue;
        }
        if differing_axis.is_some() {
            return None;
        }
        differing_axis = Some(axis);
    }
    match differing_axis {
        // Duplicates.
        None => Some(a),
        Some(axis) => {
            let touching = a.small_end()[axis] <= b.big_end()[axis].saturating_add(1)
                && b.small_end()[axis] <= a.big_end()[axis].saturating_add(1);
            touching.then(|| a.min_box(b))
        }
    }
}

/// Canonical ordering: lower corner with the highest axis most significant, then
/// upper corner likewise.
pub(crate) fn canonical_cmp<const D: usize>(a: &GridBox<D>, b: &GridBox<D>) -> Ordering {
    a.small_end()
        .lex_cmp(&b.small_end())
        .then_with(|| a.big_end().lex_cmp(&b.big_end()))
}

/// One round of merging. Each surviving box is compared with at most `lookahead`
/// following boxes. Returns the number of merges performed.
fn merge_round<const D: usize>(boxes: &mut Vec<GridBox<D>>, lookahead: usize) -> usize {
    let mut slots: Vec<Option<GridBox<D>>> = mem::take(boxes).into_iter().map(Some).collect();
    let mut merges = 0;
    for i in 0..slots.len() {
        let Some(mut current) = slots[i] else {
            continue;
        };
        let end = slots.len().min(i.saturating_add(1).saturating_add(lookahead));
        for j in (i + 1)..end {
            let Some(candidate) = slots[j] else {
                continue;
            };
            // Sorted on the highest axis, so no later box can touch this one.
            if D > 0
                && current.is_ok()
                && candidate.small_end()[D - 1] > current.big_end()[D - 1].saturating_add(1)
            {
                break;
            }
            if let Some(merged) = try_merge(current, candidate) {
                current = merged;
                slots[j] = None;
                merges += 1;
            }
        }
        slots[i] = Some(current);
    }
    *boxes = slots.into_iter().flatten().collect();
    merges
}

impl<const D: usize> BoxList<D> {
    /// Merges members which together form a box, repeating until no more merges are
    /// found, and returns the number of merges performed. The members are sorted into
    /// canonical order first.
    ///
    /// If `best` is true, every pair of members is considered; otherwise each member
    /// is only compared with a bounded number of its successors
    /// ([`SimplifyOptions::lookahead`]), which is faster on long lists but may leave
    /// some merges undone.
    ///
    /// The covered points are unchanged and the length never increases.
    ///
    /// ```
    /// use latbox::BoxList;
    /// use latbox::math::GridBox;
    ///
    /// let mut list = BoxList::from_box(GridBox::cell([5, 0], [9, 9]));
    /// list.push(GridBox::cell([0, 0], [4, 9]));
    /// assert_eq!(list.simplify(true), 1);
    /// assert_eq!(list.as_slice(), [GridBox::cell([0, 0], [9, 9])]);
    /// ```
    pub fn simplify(&mut self, best: bool) -> usize {
        self.simplify_with(best, &SimplifyOptions::default())
    }

    /// As [`BoxList::simplify()`] with explicit options.
    pub fn simplify_with(&mut self, best: bool, options: &SimplifyOptions) -> usize {
        let lookahead = if best { usize::MAX } else { options.lookahead };
        self.boxes.sort_by(canonical_cmp);
        let mut total = 0;
        loop {
            let merges = merge_round(&mut self.boxes, lookahead);
            if merges == 0 {
                break;
            }
            total += merges;
        }
        log::trace!(
            "simplify(best={best}): {total} merges, {} boxes remain",
            self.boxes.len()
        );
        total
    }

    /// Merges consecutive members in a single pass, without sorting, and returns the
    /// number of merges performed.
    ///
    /// This finds every merge [`BoxList::simplify()`] would find in its first round
    /// only if the list is already in canonical order; that is not checked.
    pub fn ordered_simplify(&mut self) -> usize {
        let mut merges = 0;
        let mut out: Vec<GridBox<D>> = Vec::with_capacity(self.boxes.len());
        for b in mem::take(&mut self.boxes) {
            if let Some(last) = out.last_mut() {
                if let Some(merged) = try_merge(*last, b) {
                    *last = merged;
                    merges += 1;
                    continue;
                }
            }
            out.push(b);
        }
        self.boxes = out;
        merges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_rules() {
        let a = GridBox::cell([0, 0], [4, 9]);
        assert_eq!(
            try_merge(a, GridBox::cell([5, 0], [9, 9])),
            Some(GridBox::cell([0, 0], [9, 9]))
        );
        // overlapping on the differing axis
        assert_eq!(
            try_merge(a, GridBox::cell([3, 0], [9, 9])),
            Some(GridBox::cell([0, 0], [9, 9]))
        );
        // gap
        assert_eq!(try_merge(a, GridBox::cell([6, 0], [9, 9])), None);
        // two differing axes
        assert_eq!(try_merge(a, GridBox::cell([5, 0], [9, 8])), None);
        assert_eq!(try_merge(a, a), Some(a));
        assert_eq!(try_merge(a, GridBox::cell([5, 0], [4, 9])), None);
    }

    #[test]
    fn bounded_lookahead_can_miss() {
        // `tall` sorts between the two halves of the row, hiding them from each other
        // when only one successor is examined.
        let left = GridBox::cell([0, 0], [4, 0]);
        let right = GridBox::cell([5, 0], [9, 0]);
        let tall = GridBox::cell([2, 0], [2, 5]);
        let list = BoxList::from_boxes(vec![left, right, tall]).unwrap();

        let mut fast = list.clone();
        assert_eq!(fast.simplify_with(false, &SimplifyOptions { lookahead: 1 }), 0);
        assert_eq!(fast.len(), 3);

        let mut best = list.clone();
        assert_eq!(best.simplify(true), 1);
        assert_eq!(
            best.as_slice(),
            [left.min_box(right), tall]
        );
    }
}
