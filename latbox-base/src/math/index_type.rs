use core::fmt;

use crate::math::IntVect;

/// Whether a box's extent along one axis counts cells or nodes.
///
/// Cell `i` spans the continuous interval from node `i` to node `i + 1`.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Centering {
    /// Indices refer to cells.
    #[default]
    Cell,
    /// Indices refer to the nodes (corners) between cells.
    Node,
}

impl Centering {
    /// Returns the other centering.
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Centering::Cell => Centering::Node,
            Centering::Node => Centering::Cell,
        }
    }
}

/// Per-axis centering of a box: the “index type”.
///
/// Boxes may only be combined with boxes of an equal [`IndexType`]; nothing in this
/// library converts centering implicitly.
///
/// ```
/// use latbox_base::math::{Centering, IndexType};
///
/// let face_x = IndexType::<2>::cell().with(0, Centering::Node);
/// assert_eq!(face_x.to_string(), "(N,C)");
/// assert!(!face_x.is_cell_centered());
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct IndexType<const D: usize> {
    centering: [Centering; D],
}

impl<const D: usize> IndexType<D> {
    /// Constructs an index type from explicit per-axis centering.
    #[inline]
    pub const fn new(centering: [Centering; D]) -> Self {
        Self { centering }
    }

    /// Cell-centered on every axis.
    #[inline]
    pub const fn cell() -> Self {
        Self::new([Centering::Cell; D])
    }

    /// Node-centered on every axis.
    #[inline]
    pub const fn node() -> Self {
        Self::new([Centering::Node; D])
    }

    /// Returns the centering on `axis`.
    #[inline]
    #[track_caller]
    pub fn centering(&self, axis: usize) -> Centering {
        self.centering[axis]
    }

    /// Returns the centering of every axis.
    #[inline]
    pub const fn to_array(&self) -> [Centering; D] {
        self.centering
    }

    /// Returns whether `axis` is node-centered.
    #[inline]
    #[track_caller]
    pub fn is_node(&self, axis: usize) -> bool {
        self.centering[axis] == Centering::Node
    }

    /// Returns whether every axis is cell-centered.
    #[inline]
    pub fn is_cell_centered(&self) -> bool {
        self.centering.iter().all(|&c| c == Centering::Cell)
    }

    /// Returns whether every axis is node-centered.
    #[inline]
    pub fn is_node_centered(&self) -> bool {
        self.centering.iter().all(|&c| c == Centering::Node)
    }

    /// Returns a copy with `axis` set to `centering`.
    #[inline]
    #[track_caller]
    #[must_use]
    pub fn with(mut self, axis: usize, centering: Centering) -> Self {
        self.centering[axis] = centering;
        self
    }

    /// Returns a copy with the centering of `axis` flipped.
    #[inline]
    #[track_caller]
    #[must_use]
    pub fn flipped(self, axis: usize) -> Self {
        let c = self.centering[axis].flip();
        self.with(axis, c)
    }

    /// Returns 1 on node-centered axes and 0 on cell-centered axes.
    ///
    /// This is the amount by which a box's upper corner moves when it is converted
    /// from all-cell to this type.
    #[inline]
    pub fn node_offsets(&self) -> IntVect<D> {
        IntVect(self.centering.map(|c| match c {
            Centering::Cell => 0,
            Centering::Node => 1,
        }))
    }
}

impl<const D: usize> Default for IndexType<D> {
    #[inline]
    fn default() -> Self {
        Self::cell()
    }
}

impl<const D: usize> From<[Centering; D]> for IndexType<D> {
    #[inline]
    fn from(centering: [Centering; D]) -> Self {
        Self::new(centering)
    }
}

impl<const D: usize> fmt::Debug for IndexType<D> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexType{self}")
    }
}

/// Formats as `(C,N,...)`, one letter per axis.
impl<const D: usize> fmt::Display for IndexType<D> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (axis, c) in self.centering.iter().enumerate() {
            if axis > 0 {
                f.write_str(",")?;
            }
            f.write_str(match c {
                Centering::Cell => "C",
                Centering::Node => "N",
            })?;
        }
        f.write_str(")")
    }
}

#[cfg(feature = "arbitrary")]
#[mutants::skip]
impl<'a, const D: usize> arbitrary::Arbitrary<'a> for IndexType<D> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut centering = [Centering::Cell; D];
        for c in &mut centering {
            *c = u.arbitrary()?;
        }
        Ok(Self::new(centering))
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
    fn default_is_cell() {
        assert_eq!(IndexType::<3>::default(), IndexType::cell());
        assert!(IndexType::<3>::cell().is_cell_centered());
        assert!(IndexType::<3>::node().is_node_centered());
        // Vacuous case
        assert!(IndexType::<0>::cell().is_node_centered());
    }

    #[test]
    fn flip_and_offsets() {
        let t = IndexType::<3>::cell().flipped(1);
        assert_eq!(t.to_string(), "(C,N,C)");
        assert_eq!(t.node_offsets(), IntVect([0, 1, 0]));
        assert_eq!(t.flipped(1), IndexType::cell());
        assert!(t.is_node(1));
        assert!(!t.is_node(0));
    }
}
