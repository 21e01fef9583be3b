use alloc::sync::Arc;
use core::fmt;
use core::ops;

use crate::BoxList;
use crate::math::{GridBox, IndexType};

/// An immutable array of boxes sharing one [`IndexType`], which is cheap to clone and
/// to share between threads.
///
/// This is the form in which a finished decomposition is handed around; convert to a
/// [`BoxList`] to compute with it.
///
/// ```
/// use latbox::{BoxArray, BoxList};
/// use latbox::math::GridBox;
///
/// let array = BoxArray::from(BoxList::chop(GridBox::cell([0, 0], [9, 9]), 4));
/// let shared = array.clone();
/// assert_eq!(shared.len(), 4);
/// assert_eq!(BoxList::from(&shared).minimal_box(), GridBox::cell([0, 0], [9, 9]));
/// ```
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct BoxArray<const D: usize> {
    boxes: Arc<[GridBox<D>]>,
    btype: IndexType<D>,
}

impl<const D: usize> BoxArray<D> {
    /// Returns the number of boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns whether there are no boxes.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Returns the index type shared by every box.
    pub const fn ix_type(&self) -> IndexType<D> {
        self.btype
    }

    /// Returns the boxes as a slice.
    pub fn as_slice(&self) -> &[GridBox<D>] {
        &self.boxes
    }

    /// Iterates over the boxes in order.
    pub fn iter(&self) -> core::slice::Iter<'_, GridBox<D>> {
        self.boxes.iter()
    }

    /// Returns the box at `index`, or [`None`] if out of bounds.
    pub fn get(&self, index: usize) -> Option<&GridBox<D>> {
        self.boxes.get(index)
    }
}

impl<const D: usize> Default for BoxArray<D> {
    fn default() -> Self {
        BoxList::new().into()
    }
}

impl<const D: usize> From<BoxList<D>> for BoxArray<D> {
    fn from(list: BoxList<D>) -> Self {
        let btype = list.ix_type();
        Self {
            boxes: list.into_boxes().into(),
            btype,
        }
    }
}

impl<const D: usize> From<&BoxList<D>> for BoxArray<D> {
    fn from(list: &BoxList<D>) -> Self {
        Self {
            boxes: list.as_slice().into(),
            btype: list.ix_type(),
        }
    }
}

impl<const D: usize> ops::Index<usize> for BoxArray<D> {
    type Output = GridBox<D>;

    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        &self.boxes[index]
    }
}

impl<'a, const D: usize> IntoIterator for &'a BoxArray<D> {
    type Item = &'a GridBox<D>;
    type IntoIter = core::slice::Iter<'a, GridBox<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

impl<const D: usize> fmt::Debug for BoxArray<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxArray")
            .field("btype", &self.btype)
            .field("boxes", &&*self.boxes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_list() {
        let mut list = BoxList::with_ix_type(IndexType::node());
        list.push(GridBox::node([0, 0, 0], [1, 1, 1]));
        list.push(GridBox::node([5, 0, 0], [6, 1, 1]));
        let array = BoxArray::from(&list);
        assert_eq!(array.ix_type(), IndexType::node());
        assert_eq!(array[1], GridBox::node([5, 0, 0], [6, 1, 1]));
        assert_eq!(BoxList::from(&array), list);
        assert_eq!(BoxList::from(&array).ix_type(), IndexType::node());
    }

    #[test]
    fn clones_share_storage() {
        let array = BoxArray::from(BoxList::from_box(GridBox::cell([0], [9])));
        let clone = array.clone();
        assert!(core::ptr::eq(array.as_slice(), clone.as_slice()));
    }

    #[test]
    fn empty_default() {
        let array = BoxArray::<2>::default();
        assert!(array.is_empty());
        assert_eq!(array.get(0), None);
        assert_eq!(array.ix_type(), IndexType::cell());
    }
}
