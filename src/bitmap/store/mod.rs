mod array_store;
mod bitmap_store;
mod run_store;

use core::slice;
use std::sync::Arc;
use std::vec;

use self::Store::{Array, Bitmap, Run};

pub(crate) use self::array_store::ArrayStore;
pub(crate) use self::bitmap_store::{BitmapIter, BitmapStore, BITMAP_BYTES, BITMAP_WORDS};
pub(crate) use self::run_store::{Interval, RunIter, RunStore};

use crate::bitmap::scratch::Scratch;

#[derive(Clone, Debug)]
pub(crate) enum Store {
    Array(ArrayStore),
    Bitmap(BitmapStore),
    Run(RunStore),
}

impl Store {
    pub fn new() -> Store {
        Array(ArrayStore::with_capacity(4))
    }

    #[inline]
    pub fn insert(&mut self, index: u16) -> bool {
        match self {
            Array(values) => values.insert(index),
            Bitmap(bits) => bits.insert(index),
            Run(runs) => runs.insert(index),
        }
    }

    pub fn remove(&mut self, index: u16) -> bool {
        match self {
            Array(values) => values.remove(index),
            Bitmap(bits) => bits.remove(index),
            Run(runs) => runs.remove(index),
        }
    }

    pub fn contains(&self, index: u16) -> bool {
        match self {
            Array(values) => values.contains(index),
            Bitmap(bits) => bits.contains(index),
            Run(runs) => runs.contains(index),
        }
    }

    pub fn retain(&mut self, f: impl FnMut(u16) -> bool) {
        match self {
            Array(values) => values.retain(f),
            Bitmap(bits) => bits.retain(f),
            Run(runs) => runs.retain(f),
        }
    }

    pub fn len(&self) -> u64 {
        match self {
            Array(values) => values.len(),
            Bitmap(bits) => bits.len(),
            Run(runs) => runs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Array(values) => values.is_empty(),
            Bitmap(bits) => bits.is_empty(),
            Run(runs) => runs.is_empty(),
        }
    }

    pub fn min(&self) -> Option<u16> {
        match self {
            Array(values) => values.min(),
            Bitmap(bits) => bits.min(),
            Run(runs) => runs.min(),
        }
    }

    pub fn max(&self) -> Option<u16> {
        match self {
            Array(values) => values.max(),
            Bitmap(bits) => bits.max(),
            Run(runs) => runs.max(),
        }
    }

    /// Number of maximal ranges of consecutive values, whatever the
    /// representation.
    pub fn count_runs(&self) -> u64 {
        match self {
            Array(values) => values.count_runs(),
            Bitmap(bits) => bits.count_runs(),
            Run(runs) => runs.run_count(),
        }
    }

    /// Serialized footprint of the current representation.
    pub fn byte_size(&self) -> u64 {
        match self {
            Array(values) => values.byte_size(),
            Bitmap(_) => BITMAP_BYTES,
            Run(runs) => runs.byte_size(),
        }
    }

    pub fn to_array(&self) -> Store {
        match self {
            Array(_) => self.clone(),
            Bitmap(bits) => Array(bits.to_array_store()),
            Run(runs) => Array(ArrayStore::from_vec_unchecked(runs.to_vec())),
        }
    }

    pub fn to_bitmap(&self) -> Store {
        match self {
            Array(values) => Bitmap(values.to_bitmap_store()),
            Bitmap(_) => self.clone(),
            Run(runs) => Bitmap(runs.to_bitmap_store()),
        }
    }

    pub fn to_run(&self) -> Store {
        match self {
            Array(values) => Run(runs_from_sorted(values.iter().copied())),
            Bitmap(bits) => Run(runs_from_sorted(bits.iter())),
            Run(_) => self.clone(),
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        self.into_iter()
    }

    pub fn and_assign(&mut self, rhs: &Store, scratch: &mut Scratch) {
        match (self, rhs) {
            (&mut Array(ref mut lhs), &Array(ref rhs)) => {
                let staged = scratch.staging();
                array_store::intersect_slices(lhs.as_slice(), rhs.as_slice(), staged);
                *lhs = ArrayStore::from_staged(staged);
            }
            (&mut Array(ref mut lhs), &Bitmap(ref rhs)) => {
                lhs.retain(|index| rhs.contains(index));
            }
            (&mut Array(ref mut lhs), &Run(ref rhs)) => {
                let staged = scratch.staging();
                run_store::intersect_values(lhs.as_slice(), rhs.intervals(), staged);
                *lhs = ArrayStore::from_staged(staged);
            }
            (&mut Bitmap(ref mut lhs), &Bitmap(ref rhs)) => lhs.and_assign(rhs),
            (this @ &mut Bitmap(..), &Array(ref rhs)) => {
                // The result fits the smaller operand: downgrade to an array
                let staged = scratch.staging();
                if let Bitmap(ref bits) = *this {
                    for &index in rhs.iter() {
                        if bits.contains(index) {
                            staged.push(index);
                        }
                    }
                }
                *this = Array(ArrayStore::from_staged(staged));
            }
            (&mut Bitmap(ref mut lhs), &Run(ref rhs)) => lhs.intersect_runs(rhs),
            (&mut Run(ref mut lhs), &Run(ref rhs)) => {
                let staged = scratch.staging();
                run_store::intersect_intervals(lhs.intervals(), rhs.intervals(), staged);
                *lhs = RunStore::from_staged(staged);
            }
            (this @ &mut Run(..), &Array(ref rhs)) => {
                let staged = scratch.staging();
                if let Run(ref runs) = *this {
                    run_store::intersect_values(rhs.as_slice(), runs.intervals(), staged);
                }
                *this = Array(ArrayStore::from_staged(staged));
            }
            (this @ &mut Run(..), &Bitmap(..)) => {
                *this = this.to_bitmap();
                this.and_assign(rhs, scratch);
            }
        }
    }

    pub fn or_assign(&mut self, rhs: &Store, scratch: &mut Scratch) {
        match (self, rhs) {
            (&mut Array(ref mut lhs), &Array(ref rhs)) => {
                let staged = scratch.staging();
                array_store::union_slices(lhs.as_slice(), rhs.as_slice(), staged);
                *lhs = ArrayStore::from_staged(staged);
            }
            (this @ &mut Array(..), &Bitmap(ref rhs)) => {
                let mut bits = rhs.clone();
                if let Array(ref lhs) = *this {
                    bits.or_array(lhs);
                }
                *this = Bitmap(bits);
            }
            (this @ &mut Array(..), &Run(ref rhs)) => {
                let mut runs = rhs.clone();
                if let Array(ref lhs) = *this {
                    for &index in lhs.iter() {
                        runs.insert(index);
                    }
                }
                *this = Run(runs);
            }
            (&mut Bitmap(ref mut lhs), &Array(ref rhs)) => lhs.or_array(rhs),
            (&mut Bitmap(ref mut lhs), &Bitmap(ref rhs)) => lhs.or_assign(rhs),
            (&mut Bitmap(ref mut lhs), &Run(ref rhs)) => {
                for interval in rhs.intervals() {
                    lhs.insert_range(interval.start..=interval.end);
                }
            }
            (&mut Run(ref mut lhs), &Array(ref rhs)) => {
                for &index in rhs.iter() {
                    lhs.insert(index);
                }
            }
            (&mut Run(ref mut lhs), &Run(ref rhs)) => {
                let staged = scratch.staging();
                run_store::union_intervals(lhs.intervals(), rhs.intervals(), staged);
                *lhs = RunStore::from_staged(staged);
            }
            (this @ &mut Run(..), &Bitmap(..)) => {
                *this = this.to_bitmap();
                this.or_assign(rhs, scratch);
            }
        }
    }

    pub fn xor_assign(&mut self, rhs: &Store, scratch: &mut Scratch) {
        match (self, rhs) {
            (&mut Array(ref mut lhs), &Array(ref rhs)) => {
                let staged = scratch.staging();
                array_store::symmetric_difference_slices(lhs.as_slice(), rhs.as_slice(), staged);
                *lhs = ArrayStore::from_staged(staged);
            }
            (this @ &mut Array(..), &Bitmap(ref rhs)) => {
                let mut bits = rhs.clone();
                if let Array(ref lhs) = *this {
                    bits.xor_array(lhs);
                }
                *this = Bitmap(bits);
            }
            (this @ &mut Array(..), &Run(ref rhs)) => {
                // Run operands materialize as bitmaps before the xor
                let mut bits = rhs.to_bitmap_store();
                if let Array(ref lhs) = *this {
                    bits.xor_array(lhs);
                }
                *this = Bitmap(bits);
            }
            (&mut Bitmap(ref mut lhs), &Array(ref rhs)) => lhs.xor_array(rhs),
            (&mut Bitmap(ref mut lhs), &Bitmap(ref rhs)) => lhs.xor_assign(rhs),
            (&mut Bitmap(ref mut lhs), &Run(ref rhs)) => lhs.xor_assign(&rhs.to_bitmap_store()),
            (this @ &mut Run(..), _) => {
                *this = this.to_bitmap();
                this.xor_assign(rhs, scratch);
            }
        }
    }

    pub fn andnot_assign(&mut self, rhs: &Store, scratch: &mut Scratch) {
        match (self, rhs) {
            (&mut Array(ref mut lhs), &Array(ref rhs)) => {
                let staged = scratch.staging();
                array_store::difference_slices(lhs.as_slice(), rhs.as_slice(), staged);
                *lhs = ArrayStore::from_staged(staged);
            }
            (&mut Array(ref mut lhs), &Bitmap(ref rhs)) => {
                lhs.retain(|index| !rhs.contains(index));
            }
            (&mut Array(ref mut lhs), &Run(ref rhs)) => {
                lhs.retain(|index| !rhs.contains(index));
            }
            (&mut Bitmap(ref mut lhs), &Array(ref rhs)) => lhs.sub_array(rhs),
            (&mut Bitmap(ref mut lhs), &Bitmap(ref rhs)) => lhs.andnot_assign(rhs),
            (&mut Bitmap(ref mut lhs), &Run(ref rhs)) => {
                for interval in rhs.intervals() {
                    lhs.remove_range(interval.start..=interval.end);
                }
            }
            (&mut Run(ref mut lhs), &Array(ref rhs)) => {
                let staged = scratch.staging();
                run_store::subtract_values(lhs.intervals(), rhs.as_slice(), staged);
                *lhs = RunStore::from_staged(staged);
            }
            (&mut Run(ref mut lhs), &Bitmap(ref rhs)) => {
                let staged = scratch.staging();
                run_store::subtract_bitmap(lhs.intervals(), rhs, staged);
                *lhs = RunStore::from_staged(staged);
            }
            (&mut Run(ref mut lhs), &Run(ref rhs)) => {
                let staged = scratch.staging();
                run_store::subtract_intervals(lhs.intervals(), rhs.intervals(), staged);
                *lhs = RunStore::from_staged(staged);
            }
        }
    }
}

/// Coalesces an ascending value sequence into a run store.
fn runs_from_sorted(values: impl Iterator<Item = u16>) -> RunStore {
    let mut intervals: Vec<Interval> = Vec::new();
    for value in values {
        match intervals.last_mut() {
            Some(last) if last.end + 1 == value => last.end = value,
            _ => intervals.push(Interval::new(value, value)),
        }
    }
    RunStore::from_intervals_unchecked(intervals)
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Array(lhs), Array(rhs)) => lhs == rhs,
            (Bitmap(lhs), Bitmap(rhs)) => lhs == rhs,
            (Run(lhs), Run(rhs)) => lhs == rhs,
            // Same set, different encodings: compare the values themselves
            _ => self.len() == other.len() && self.iter().eq(other.iter()),
        }
    }
}

#[derive(Clone)]
pub(crate) enum Iter<'a> {
    Array(slice::Iter<'a, u16>),
    Vec(vec::IntoIter<u16>),
    BitmapBorrowed(BitmapIter<&'a [u64; BITMAP_WORDS]>),
    BitmapOwned(BitmapIter<Arc<[u64; BITMAP_WORDS]>>),
    Run(RunIter),
}

impl<'a> IntoIterator for &'a Store {
    type Item = u16;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        match self {
            Array(values) => Iter::Array(values.iter()),
            Bitmap(bits) => Iter::BitmapBorrowed(bits.iter()),
            Run(runs) => Iter::Run(runs.iter()),
        }
    }
}

impl IntoIterator for Store {
    type Item = u16;
    type IntoIter = Iter<'static>;

    fn into_iter(self) -> Iter<'static> {
        match self {
            Array(values) => Iter::Vec(values.into_vec().into_iter()),
            Bitmap(bits) => Iter::BitmapOwned(bits.into_iter()),
            Run(runs) => Iter::Run(runs.iter()),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        match self {
            Iter::Array(inner) => inner.next().copied(),
            Iter::Vec(inner) => inner.next(),
            Iter::BitmapBorrowed(inner) => inner.next(),
            Iter::BitmapOwned(inner) => inner.next(),
            Iter::Run(inner) => inner.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::Array(inner) => inner.size_hint(),
            Iter::Vec(inner) => inner.size_hint(),
            Iter::BitmapBorrowed(inner) => inner.size_hint(),
            Iter::BitmapOwned(inner) => inner.size_hint(),
            Iter::Run(inner) => inner.size_hint(),
        }
    }
}
