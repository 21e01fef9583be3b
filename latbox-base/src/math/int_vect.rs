use core::cmp::Ordering;
use core::fmt;
use core::ops;

use crate::math::GridCoordinate;

/// A vector of `D` lattice coordinates.
///
/// Box corners, refinement ratios, growth margins, offsets, and tile sizes are all
/// [`IntVect`]s. Functions which accept “a scalar or one value per axis” take
/// `impl Into<IntVect<D>>`, so that both `2` and `[2, 4]` are accepted:
///
/// ```
/// use latbox_base::math::IntVect;
///
/// assert_eq!(IntVect::<3>::from(2), IntVect([2, 2, 2]));
/// assert_eq!(IntVect::from([1, 2, 3]), IntVect([1, 2, 3]));
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct IntVect<const D: usize>(pub [GridCoordinate; D]);

impl<const D: usize> IntVect<D> {
    /// The vector with every component zero.
    pub const ZERO: Self = Self([0; D]);

    /// The vector with every component one.
    pub const ONE: Self = Self([1; D]);

    /// Constructs a vector with every component equal to `value`.
    #[inline]
    pub const fn splat(value: GridCoordinate) -> Self {
        Self([value; D])
    }

    /// Returns the components as an array.
    #[inline]
    pub const fn to_array(self) -> [GridCoordinate; D] {
        self.0
    }

    /// Applies `f` to each component.
    #[inline]
    #[must_use]
    pub fn map(self, f: impl FnMut(GridCoordinate) -> GridCoordinate) -> Self {
        Self(self.0.map(f))
    }

    /// Combines corresponding components of `self` and `other` with `f`.
    #[inline]
    #[must_use]
    pub fn zip_map(
        self,
        other: Self,
        mut f: impl FnMut(GridCoordinate, GridCoordinate) -> GridCoordinate,
    ) -> Self {
        Self(core::array::from_fn(|axis| f(self.0[axis], other.0[axis])))
    }

    /// Component-wise minimum.
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        self.zip_map(other, Ord::min)
    }

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        self.zip_map(other, Ord::max)
    }

    /// Returns whether every component of `self` is less than or equal to the
    /// corresponding component of `other`.
    #[inline]
    pub fn all_le(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }

    /// Returns whether every component is positive.
    #[inline]
    pub fn all_positive(&self) -> bool {
        self.0.iter().all(|&c| c > 0)
    }

    /// Divides each component by the corresponding component of `ratio`, rounding
    /// toward negative infinity.
    ///
    /// Panics if any component of `ratio` is not positive.
    #[inline]
    #[track_caller]
    #[must_use]
    pub fn coarsen(self, ratio: Self) -> Self {
        assert!(
            ratio.all_positive(),
            "IntVect::coarsen: ratio must be positive, not {ratio}"
        );
        self.zip_map(ratio, GridCoordinate::div_euclid)
    }

    /// Compares two vectors lexicographically with the *highest* axis most
    /// significant.
    ///
    /// This is the canonical ordering of box lower corners: it agrees with the order
    /// in which tiles and lattice points are generated (axis 0 varying fastest).
    ///
    /// ```
    /// use core::cmp::Ordering;
    /// use latbox_base::math::IntVect;
    ///
    /// assert_eq!(IntVect([5, 0]).lex_cmp(&IntVect([0, 1])), Ordering::Less);
    /// assert_eq!(IntVect([1, 1]).lex_cmp(&IntVect([0, 1])), Ordering::Greater);
    /// ```
    #[inline]
    pub fn lex_cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl<const D: usize> Default for IntVect<D> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const D: usize> From<[GridCoordinate; D]> for IntVect<D> {
    #[inline]
    fn from(value: [GridCoordinate; D]) -> Self {
        Self(value)
    }
}

impl<const D: usize> From<GridCoordinate> for IntVect<D> {
    #[inline]
    fn from(value: GridCoordinate) -> Self {
        Self::splat(value)
    }
}

impl<const D: usize> From<IntVect<D>> for [GridCoordinate; D] {
    #[inline]
    fn from(value: IntVect<D>) -> Self {
        value.0
    }
}

impl<const D: usize> ops::Index<usize> for IntVect<D> {
    type Output = GridCoordinate;

    #[inline]
    fn index(&self, axis: usize) -> &Self::Output {
        &self.0[axis]
    }
}

impl<const D: usize> ops::IndexMut<usize> for IntVect<D> {
    #[inline]
    fn index_mut(&mut self, axis: usize) -> &mut Self::Output {
        &mut self.0[axis]
    }
}

macro_rules! impl_componentwise_op {
    ($trait:ident $method:ident $assign_trait:ident $assign_method:ident) => {
        impl<const D: usize> ops::$trait for IntVect<D> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                self.zip_map(rhs, ops::$trait::$method)
            }
        }
        impl<const D: usize> ops::$assign_trait for IntVect<D> {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = ops::$trait::$method(*self, rhs);
            }
        }
    };
}
impl_componentwise_op!(Add add AddAssign add_assign);
impl_componentwise_op!(Sub sub SubAssign sub_assign);
impl_componentwise_op!(Mul mul MulAssign mul_assign);

impl<const D: usize> ops::Neg for IntVect<D> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map(ops::Neg::neg)
    }
}

impl<const D: usize> fmt::Debug for IntVect<D> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntVect({:?})", self.0)
    }
}

/// Formats as `(x,y,...)`, with no spaces.
impl<const D: usize> fmt::Display for IntVect<D> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (axis, c) in self.0.iter().enumerate() {
            if axis > 0 {
                f.write_str(",")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(")")
    }
}

#[cfg(feature = "arbitrary")]
#[mutants::skip]
impl<'a, const D: usize> arbitrary::Arbitrary<'a> for IntVect<D> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        // Kept small so that derived boxes can be refined and enumerated without overflow.
        let mut components = [0; D];
        for c in &mut components {
            *c = u.int_in_range(-64..=64)?;
        }
        Ok(Self(components))
    }

    #[allow(clippy::missing_inline_in_public_items)]
    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (D, Some(D * 4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString as _;

    #[test]
    fn display() {
        assert_eq!(IntVect([1, -2, 30]).to_string(), "(1,-2,30)");
        assert_eq!(IntVect::<0>([]).to_string(), "()");
    }

    #[test]
    fn coarsen_rounds_down() {
        assert_eq!(IntVect([7, -1, -4, 0]).coarsen(IntVect::splat(2)), IntVect([3, -1, -2, 0]));
    }

    #[test]
    #[should_panic(expected = "IntVect::coarsen: ratio must be positive, not (2,0)")]
    fn coarsen_by_zero() {
        let _ = IntVect([1, 1]).coarsen(IntVect([2, 0]));
    }

    #[test]
    fn lex_cmp_highest_axis_first() {
        let mut points = vec![IntVect([1, 0]), IntVect([0, 1]), IntVect([0, 0]), IntVect([1, 1])];
        points.sort_by(IntVect::lex_cmp);
        assert_eq!(
            points,
            vec![IntVect([0, 0]), IntVect([1, 0]), IntVect([0, 1]), IntVect([1, 1])]
        );
    }

    #[test]
    fn arithmetic() {
        let a = IntVect([1, 2, 3]);
        let b = IntVect([10, 20, 30]);
        assert_eq!(a + b, IntVect([11, 22, 33]));
        assert_eq!(b - a, IntVect([9, 18, 27]));
        assert_eq!(a * IntVect::splat(2), IntVect([2, 4, 6]));
        assert_eq!(-a, IntVect([-1, -2, -3]));
        assert_eq!(a.max(IntVect([0, 5, 0])), IntVect([1, 5, 3]));
    }
}
