//! Replicating box lists across the participants of a parallel job.
//!
//! This library does not implement any transport. Instead, the caller supplies a
//! [`Communicator`] which can broadcast a buffer of integers from one participant to
//! all of them, and [`BoxList::broadcast()`] encodes and decodes the list around it.

use alloc::vec::Vec;

use crate::box_list::{BoxList, BoxListError};
use crate::math::{Centering, GridBox, IndexType, IntVect};

/// A group of participants which can perform a blocking broadcast from a single root.
///
/// Implementations must block until every participant has received the data. There is
/// no timeout; if any participant never calls the broadcast, the others wait forever.
pub trait Communicator {
    /// Returns whether this participant is the one whose data is broadcast.
    fn is_root(&self) -> bool;

    /// Collective broadcast.
    ///
    /// On the root, `words` holds the data to send and must be left unchanged.
    /// On every other participant, `words` is empty on entry and must hold a copy of
    /// the root's data on return.
    fn broadcast_words(&self, words: &mut Vec<i32>);
}

/// The single-participant communicator: it is always the root, and broadcasting
/// does nothing.
impl Communicator for () {
    fn is_root(&self) -> bool {
        true
    }

    fn broadcast_words(&self, _words: &mut Vec<i32>) {}
}

impl<const D: usize> BoxList<D> {
    /// Makes every participant's list equal to the root's, boxes and index type alike.
    ///
    /// Must be called by every participant of `comm`. The root's list is not modified.
    /// Returns an error, leaving the list unchanged, if the received data does not
    /// describe a list of this dimension.
    pub fn broadcast<C: Communicator + ?Sized>(&mut self, comm: &C) -> Result<(), BoxListError> {
        if comm.is_root() {
            let mut words = encode(self)?;
            comm.broadcast_words(&mut words);
        } else {
            let mut words = Vec::new();
            comm.broadcast_words(&mut words);
            *self = decode(&words)?;
            log::trace!("broadcast: received {} boxes", self.len());
        }
        Ok(())
    }
}

/// Layout: `[D, centering per axis (0 cell, 1 node), count, (small_end, big_end) per box]`.
fn encode<const D: usize>(list: &BoxList<D>) -> Result<Vec<i32>, BoxListError> {
    let dimension = i32::try_from(D)
        .map_err(|_| BoxListError::MalformedBroadcast("dimension too large"))?;
    let count = i32::try_from(list.len())
        .map_err(|_| BoxListError::MalformedBroadcast("too many boxes"))?;
    let mut words = Vec::with_capacity(2 + D + list.len() * 2 * D);
    words.push(dimension);
    words.extend(list.ix_type().node_offsets().to_array());
    words.push(count);
    for b in list {
        words.extend(b.small_end().to_array());
        words.extend(b.big_end().to_array());
    }
    Ok(words)
}

fn decode<const D: usize>(words: &[i32]) -> Result<BoxList<D>, BoxListError> {
    let malformed = BoxListError::MalformedBroadcast;
    let (&dimension, rest) = words.split_first().ok_or(malformed("empty buffer"))?;
    if usize::try_from(dimension) != Ok(D) {
        return Err(malformed("dimension mismatch"));
    }
    let (centering, rest) = rest.split_at_checked(D).ok_or(malformed("truncated header"))?;
    let mut btype = IndexType::cell();
    for (axis, &flag) in centering.iter().enumerate() {
        btype = btype.with(
            axis,
            match flag {
                0 => Centering::Cell,
                1 => Centering::Node,
                _ => return Err(malformed("invalid centering flag")),
            },
        );
    }
    let (&count, corners) = rest.split_first().ok_or(malformed("truncated header"))?;
    let count = usize::try_from(count).map_err(|_| malformed("negative box count"))?;
    if Some(corners.len()) != count.checked_mul(2 * D) {
        return Err(malformed("box count does not match length"));
    }

    let mut list = BoxList::with_ix_type(btype);
    list.reserve(count);
    if D > 0 {
        for pair in corners.chunks_exact(2 * D) {
            let corner = |offset: usize| -> IntVect<D> {
                IntVect(core::array::from_fn(|axis| pair[offset + axis]))
            };
            list.push(GridBox::new(corner(0), corner(D), btype));
        }
    } else {
        for _ in 0..count {
            list.push(GridBox::new(IntVect::ZERO, IntVect::ZERO, btype));
        }
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoxList<2> {
        let mut list = BoxList::with_ix_type(IndexType::cell().flipped(1));
        list.push(GridBox::new([0, 0], [4, 5], list.ix_type()));
        list.push(GridBox::new([-3, 7], [-1, 9], list.ix_type()));
        list
    }

    #[test]
    fn encoding_layout() {
        assert_eq!(
            encode(&sample()).unwrap(),
            vec![2, 0, 1, 2, 0, 0, 4, 5, -3, 7, -1, 9]
        );
    }

    #[test]
    fn decode_inverts_encode() {
        let list = sample();
        let decoded = decode::<2>(&encode(&list).unwrap()).unwrap();
        assert_eq!(decoded, list);
        assert_eq!(decoded.ix_type(), list.ix_type());
    }

    #[test]
    fn decode_rejects_bad_buffers() {
        let words = encode(&sample()).unwrap();
        assert_eq!(
            decode::<3>(&words),
            Err(BoxListError::MalformedBroadcast("dimension mismatch"))
        );
        assert_eq!(
            decode::<2>(&words[..words.len() - 1]),
            Err(BoxListError::MalformedBroadcast("box count does not match length"))
        );
        assert_eq!(
            decode::<2>(&[2, 0, 7, 0]),
            Err(BoxListError::MalformedBroadcast("invalid centering flag"))
        );
        assert_eq!(
            decode::<2>(&[]),
            Err(BoxListError::MalformedBroadcast("empty buffer"))
        );
    }

    #[test]
    fn single_participant_is_noop() {
        let mut list = sample();
        list.broadcast(&()).unwrap();
        assert_eq!(list, sample());
    }
}
