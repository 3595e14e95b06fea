use proptest::collection::btree_set;
use proptest::prelude::*;

use crate::CowBitmap;

impl CowBitmap {
    /// Bitmaps drawn from the shapes that exercise every representation:
    /// sequential runs, uniform random values, sparse values with large
    /// gaps, and dense clusters.
    pub(crate) fn arbitrary() -> impl Strategy<Value = CowBitmap> {
        prop_oneof![sequential(), uniform(), sparse(), dense()]
    }
}

fn sequential() -> impl Strategy<Value = CowBitmap> {
    (0u32..=u32::MAX - 70_000, 1u32..=60_000)
        .prop_map(|(start, len)| (start..start + len).collect::<CowBitmap>())
}

fn uniform() -> impl Strategy<Value = CowBitmap> {
    btree_set(any::<u32>(), 0..=2_000).prop_map(|values| values.into_iter().collect::<CowBitmap>())
}

fn sparse() -> impl Strategy<Value = CowBitmap> {
    // Masking the value spreads a handful of low indices over many keys
    btree_set(any::<u32>().prop_map(|value| value & 0xFFFF_0007), 0..=500)
        .prop_map(|values| values.into_iter().collect::<CowBitmap>())
}

fn dense() -> impl Strategy<Value = CowBitmap> {
    btree_set(0u32..=120_000, 0..=4_000)
        .prop_map(|values| values.into_iter().collect::<CowBitmap>())
}
