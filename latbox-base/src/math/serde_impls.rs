#![allow(clippy::missing_inline_in_public_items)]

use alloc::vec::Vec;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::math::{Centering, GridBox, GridCoordinate, IndexType, IntVect};

// Arrays of generic length do not implement the serde traits, so vectors are
// written as plain sequences and their length is checked on the way back in.

#[derive(Debug, Deserialize, Serialize)]
struct GridBoxSer<const D: usize> {
    // This one isn't an explicitly versioned enum because it mirrors the in-memory
    // representation exactly and we don't expect to change it.
    small: IntVect<D>,
    big: IntVect<D>,
    itype: IndexType<D>,
}

fn array_from_seq<'de, T: Copy + Default, const D: usize, De: Deserializer<'de>>(
    elements: Vec<T>,
) -> Result<[T; D], De::Error> {
    if elements.len() != D {
        return Err(serde::de::Error::invalid_length(
            elements.len(),
            &DimensionExpectation(D),
        ));
    }
    let mut array = [T::default(); D];
    array.copy_from_slice(&elements);
    Ok(array)
}

struct DimensionExpectation(usize);

impl serde::de::Expected for DimensionExpectation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "a sequence of {} elements", self.0)
    }
}

impl<const D: usize> Serialize for IntVect<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de, const D: usize> Deserialize<'de> for IntVect<D> {
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: Deserializer<'de>,
    {
        let elements = <Vec<GridCoordinate>>::deserialize(deserializer)?;
        Ok(IntVect(array_from_seq::<_, D, De>(elements)?))
    }
}

impl<const D: usize> Serialize for IndexType<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.to_array().iter())
    }
}

impl<'de, const D: usize> Deserialize<'de> for IndexType<D> {
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: Deserializer<'de>,
    {
        let elements = <Vec<Centering>>::deserialize(deserializer)?;
        Ok(IndexType::new(array_from_seq::<_, D, De>(elements)?))
    }
}

impl<const D: usize> Serialize for GridBox<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        GridBoxSer {
            small: self.small_end(),
            big: self.big_end(),
            itype: self.ix_type(),
        }
        .serialize(serializer)
    }
}

impl<'de, const D: usize> Deserialize<'de> for GridBox<D> {
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: Deserializer<'de>,
    {
        let GridBoxSer { small, big, itype } = GridBoxSer::deserialize(deserializer)?;
        // Empty boxes are valid values, so there is nothing further to check.
        Ok(GridBox::new(small, big, itype))
    }
}
