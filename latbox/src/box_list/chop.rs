//! Partitioning single boxes: chopping into a number of pieces, tiling, and
//! limiting member size.

use alloc::vec::Vec;

use crate::box_list::simplify::canonical_cmp;
use crate::box_list::{BoxList, BoxListError};
use crate::math::{GridBox, GridCoordinate, IntVect};

/// Number of points of `b` along `axis`. Unlike [`GridBox::length()`], this cannot
/// overflow.
fn extent<const D: usize>(b: &GridBox<D>, axis: usize) -> i64 {
    i64::from(b.big_end()[axis]) - i64::from(b.small_end()[axis]) + 1
}

/// Splits `length` points starting at `lo` into `count` consecutive runs whose
/// lengths differ by at most one, longer runs first.
fn even_runs(lo: GridCoordinate, length: i64, count: i64) -> Vec<(GridCoordinate, GridCoordinate)> {
    let base = length / count;
    let extra = length.rem_euclid(count);
    let mut runs = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
    let mut start = i64::from(lo);
    for i in 0..count {
        let end = start + base + i64::from(i < extra) - 1;
        runs.push((start as GridCoordinate, end as GridCoordinate));
        start = end + 1;
    }
    runs
}

/// Splits `lo..=hi` into runs of `tile` points, the last holding whatever remains.
fn tile_runs(
    lo: GridCoordinate,
    hi: GridCoordinate,
    tile: GridCoordinate,
) -> Vec<(GridCoordinate, GridCoordinate)> {
    let hi = i64::from(hi);
    let mut runs = Vec::new();
    let mut start = i64::from(lo);
    while start <= hi {
        let end = (start + i64::from(tile) - 1).min(hi);
        runs.push((start as GridCoordinate, end as GridCoordinate));
        start = end + 1;
    }
    runs
}

/// Forms every box whose range on each axis is one of that axis's runs, in canonical
/// order (axis 0 varying fastest).
fn product_of_runs<const D: usize>(
    b: GridBox<D>,
    runs: &[Vec<(GridCoordinate, GridCoordinate)>; D],
) -> impl Iterator<Item = GridBox<D>> + '_ {
    let upper: IntVect<D> =
        IntVect(core::array::from_fn(|axis| runs[axis].len() as GridCoordinate - 1));
    GridBox::cell(IntVect::ZERO, upper)
        .iter_points()
        .map(move |index| {
            let mut piece = b;
            for axis in 0..D {
                let (lo, hi) = runs[axis][index[axis] as usize];
                piece = piece.with_small(axis, lo).with_big(axis, hi);
            }
            piece
        })
}

/// Chooses how many pieces to cut along each axis so that their product is `n`, no
/// axis is cut into more pieces than it has points, and the resulting pieces are as
/// close to cubes as possible. Returns [`None`] if no such choice exists.
fn best_grid<const D: usize>(lengths: [i64; D], n: usize) -> Option<[i64; D]> {
    // Lower is better: longest piece extent, then negated shortest piece extent.
    type Score = (i64, i64);

    fn search<const D: usize>(
        lengths: [i64; D],
        axis: usize,
        remaining: usize,
        counts: &mut [i64; D],
        best: &mut Option<(Score, [i64; D])>,
    ) {
        if axis == D {
            if remaining != 1 {
                return;
            }
            let mut longest = 0;
            let mut shortest = i64::MAX;
            for a in 0..D {
                let len = lengths[a];
                let floor = len / counts[a];
                let ceil = floor + i64::from(len.rem_euclid(counts[a]) != 0);
                longest = longest.max(ceil);
                shortest = shortest.min(floor);
            }
            let score = (longest, -shortest);
            if best.as_ref().is_none_or(|(best_score, _)| score < *best_score) {
                *best = Some((score, *counts));
            }
            return;
        }
        let mut small = 1;
        while small <= remaining / small {
            if remaining % small == 0 {
                let pair = [small, remaining / small];
                let factors = if pair[0] == pair[1] { &pair[..1] } else { &pair[..] };
                for &factor in factors {
                    if let Ok(count) = i64::try_from(factor)
                        && count <= lengths[axis]
                    {
                        counts[axis] = count;
                        search(lengths, axis + 1, remaining / factor, counts, best);
                    }
                }
            }
            small += 1;
        }
    }

    let mut best = None;
    search(lengths, 0, n, &mut [1; D], &mut best);
    best.map(|(_, counts)| counts)
}

/// Splits `b` into `n` nonempty pieces by repeatedly halving its longest side and
/// dividing the piece count in proportion to the halves' sizes.
fn bisect<const D: usize>(b: GridBox<D>, n: u64, out: &mut Vec<GridBox<D>>) {
    if n <= 1 {
        out.push(b);
        return;
    }
    // Longest side, ties to the lowest axis. It is at least 2 because `b` has at
    // least `n` points.
    let (axis, length) = (0..D)
        .map(|axis| (axis, extent(&b, axis)))
        .fold((0, 0), |best, candidate| if candidate.1 > best.1 { candidate } else { best });
    let lower_length = length / 2;
    let point = i64::from(b.small_end()[axis]) + lower_length;
    let (lower, upper) = b.chop(axis, point as GridCoordinate);
    let lower_pts = lower.num_pts().unwrap_or(u64::MAX);
    let upper_pts = upper.num_pts().unwrap_or(u64::MAX);
    let proportional = u128::from(n) * u128::from(lower_length.unsigned_abs())
        / u128::from(length.unsigned_abs());
    let n_lower = u64::try_from(proportional)
        .unwrap_or(u64::MAX)
        .clamp(n.saturating_sub(upper_pts).max(1), lower_pts.min(n - 1));
    bisect(lower, n_lower, out);
    bisect(upper, n - n_lower, out);
}

impl<const D: usize> BoxList<D> {
    /// Partitions `b` into `n` nonempty, disjoint pieces which exactly cover it.
    ///
    /// The pieces form a grid, with each axis cut into runs whose lengths differ by at
    /// most one, and the grid's shape is chosen to make the pieces as close to cubes
    /// as possible. If `n` cannot be arranged as a grid that fits in `b` (for example,
    /// a prime larger than every side), the box is instead bisected recursively; the
    /// pieces then still cover `b` exactly but may differ more in size.
    ///
    /// Panics if `n` is zero or greater than the number of points in `b`;
    /// see [`BoxList::try_chop()`].
    ///
    /// ```
    /// use latbox::BoxList;
    /// use latbox::math::GridBox;
    ///
    /// let pieces = BoxList::chop(GridBox::cell([0, 0], [9, 9]), 4);
    /// assert_eq!(
    ///     pieces.as_slice(),
    ///     [
    ///         GridBox::cell([0, 0], [4, 4]),
    ///         GridBox::cell([5, 0], [9, 4]),
    ///         GridBox::cell([0, 5], [4, 9]),
    ///         GridBox::cell([5, 5], [9, 9]),
    ///     ]
    /// );
    /// ```
    #[track_caller]
    pub fn chop(b: GridBox<D>, n: usize) -> Self {
        match Self::try_chop(b, n) {
            Ok(list) => list,
            Err(e) => panic!("BoxList::chop: {e}"),
        }
    }

    /// As [`BoxList::chop()`], but returns an error instead of panicking if `n` is zero
    /// or greater than the number of points in `b`.
    pub fn try_chop(b: GridBox<D>, n: usize) -> Result<Self, BoxListError> {
        let num_pts = b.num_pts().unwrap_or(u64::MAX);
        let pieces = u64::try_from(n).unwrap_or(u64::MAX);
        if n == 0 || pieces > num_pts {
            return Err(BoxListError::InvalidPieceCount { pieces: n, num_pts });
        }

        let mut out = BoxList::with_ix_type(b.ix_type());
        let lengths: [i64; D] = core::array::from_fn(|axis| extent(&b, axis));
        if let Some(counts) = best_grid(lengths, n) {
            let runs = core::array::from_fn(|axis| {
                even_runs(b.small_end()[axis], lengths[axis], counts[axis])
            });
            out.boxes.extend(product_of_runs(b, &runs));
        } else {
            log::warn!("BoxList::chop: no {n}-piece grid fits {b}; bisecting instead");
            bisect(b, pieces, &mut out.boxes);
            out.boxes.sort_by(canonical_cmp);
        }
        Ok(out)
    }

    /// Partitions `b` into `n` slabs perpendicular to `axis`, whose lengths along
    /// `axis` differ by at most one.
    ///
    /// Panics if `n` is zero or greater than the number of points of `b` along `axis`.
    #[track_caller]
    pub fn chop_axis(b: GridBox<D>, n: usize, axis: usize) -> Self {
        let length = extent(&b, axis);
        let count = i64::try_from(n).unwrap_or(i64::MAX);
        assert!(
            n > 0 && count <= length,
            "BoxList::chop_axis: cannot cut length {length} on axis {axis} into {n} slabs"
        );
        let mut out = BoxList::with_ix_type(b.ix_type());
        for (lo, hi) in even_runs(b.small_end()[axis], length, count) {
            out.boxes.push(b.with_small(axis, lo).with_big(axis, hi));
        }
        out
    }

    /// Partitions `b` into tiles of `tile_size` points on each axis, except that the
    /// last tile along each axis holds the remainder. Tiles are listed with axis 0
    /// varying fastest.
    ///
    /// An empty `b` produces an empty list.
    /// Panics if any component of `tile_size` is not positive.
    ///
    /// ```
    /// use latbox::BoxList;
    /// use latbox::math::GridBox;
    ///
    /// let tiles = BoxList::tiles(GridBox::cell([0, 0], [9, 3]), [4, 4]);
    /// assert_eq!(
    ///     tiles.as_slice(),
    ///     [
    ///         GridBox::cell([0, 0], [3, 3]),
    ///         GridBox::cell([4, 0], [7, 3]),
    ///         GridBox::cell([8, 0], [9, 3]),
    ///     ]
    /// );
    /// ```
    #[track_caller]
    pub fn tiles(b: GridBox<D>, tile_size: impl Into<IntVect<D>>) -> Self {
        let tile_size = tile_size.into();
        assert!(
            tile_size.all_positive(),
            "BoxList::tiles: tile size must be positive, not {tile_size}"
        );
        let mut out = BoxList::with_ix_type(b.ix_type());
        if b.is_ok() {
            let runs = core::array::from_fn(|axis| {
                tile_runs(b.small_end()[axis], b.big_end()[axis], tile_size[axis])
            });
            out.boxes.extend(product_of_runs(b, &runs));
        }
        out
    }

    /// Splits every member that is longer than `chunk` along some axis into
    /// near-equal pieces no longer than `chunk`. The pieces of each member take its
    /// place in the list and exactly cover it.
    ///
    /// Panics if any component of `chunk` is not positive.
    #[track_caller]
    pub fn max_size(&mut self, chunk: impl Into<IntVect<D>>) -> &mut Self {
        let chunk = chunk.into();
        assert!(
            chunk.all_positive(),
            "BoxList::max_size: chunk must be positive, not {chunk}"
        );
        let fits = |b: &GridBox<D>| (0..D).all(|axis| extent(b, axis) <= i64::from(chunk[axis]));
        if self.boxes.iter().all(|b| b.is_empty() || fits(b)) {
            return self;
        }
        let mut out = Vec::with_capacity(self.boxes.len());
        for b in self.boxes.drain(..) {
            if b.is_empty() {
                out.push(b);
                continue;
            }
            let runs = core::array::from_fn(|axis| {
                let length = extent(&b, axis);
                let chunk = i64::from(chunk[axis]);
                let count = length / chunk + i64::from(length.rem_euclid(chunk) != 0);
                even_runs(b.small_end()[axis], length, count)
            });
            out.extend(product_of_runs(b, &runs));
        }
        self.boxes = out;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_runs_spread_remainder() {
        assert_eq!(even_runs(10, 10, 3), vec![(10, 13), (14, 16), (17, 19)]);
        assert_eq!(even_runs(0, 3, 3), vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(
            even_runs(i32::MIN, 1 << 32, 2),
            vec![(i32::MIN, -1), (0, i32::MAX)]
        );
    }

    #[test]
    fn tile_runs_remainder_last() {
        assert_eq!(tile_runs(-5, 4, 4), vec![(-5, -2), (-1, 2), (3, 4)]);
        assert_eq!(tile_runs(0, 3, 8), vec![(0, 3)]);
        assert_eq!(
            tile_runs(i32::MIN, i32::MAX, i32::MAX),
            vec![(i32::MIN, -2), (-1, i32::MAX - 1), (i32::MAX, i32::MAX)]
        );
    }

    #[test]
    fn best_grid_prefers_cubes() {
        assert_eq!(best_grid([10, 10], 4), Some([2, 2]));
        assert_eq!(best_grid([40, 10], 4), Some([4, 1]));
        assert_eq!(best_grid([8, 8, 8], 8), Some([2, 2, 2]));
        assert_eq!(best_grid([3, 3], 9), Some([3, 3]));
        assert_eq!(best_grid([1 << 32, 1], 2), Some([2, 1]));
        // 7 is prime and longer than every side.
        assert_eq!(best_grid([4, 4], 7), None);
    }

    #[test]
    fn bisect_counts() {
        let b = GridBox::cell([0, 0], [3, 1]);
        let mut out = Vec::new();
        bisect(b, 7, &mut out);
        assert_eq!(out.len(), 7);
        assert!(out.iter().all(GridBox::is_ok));
        assert_eq!(out.iter().map(|p| p.num_pts().unwrap()).sum::<u64>(), 8);
    }
}
