use std::collections::BTreeSet;

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

use super::container::ARRAY_LIMIT;
use super::store::Store;
use crate::CowBitmap;

fn to_set(rb: &CowBitmap) -> BTreeSet<u32> {
    rb.iter().collect()
}

/// Checks the structural invariants every public operation must preserve:
/// exact cardinality per container, ordered storage, run gaps, the
/// array/bitmap crossover and ascending, non-empty containers.
fn assert_invariants(rb: &CowBitmap) {
    let mut last_key = None;
    for container in &rb.containers {
        assert!(last_key.map_or(true, |last| last < container.key), "keys out of order");
        last_key = Some(container.key);
        assert!(!container.is_empty(), "empty container left behind");

        match &container.store {
            Store::Array(values) => {
                assert!(values.len() <= ARRAY_LIMIT);
                assert!(values.as_slice().windows(2).all(|pair| pair[0] < pair[1]));
            }
            Store::Bitmap(bits) => {
                assert!(bits.len() > ARRAY_LIMIT);
                assert_eq!(bits.len(), bits.iter().count() as u64);
            }
            Store::Run(runs) => {
                let mut cardinality = 0;
                let mut previous: Option<u16> = None;
                for interval in runs.intervals() {
                    assert!(interval.start <= interval.end);
                    if let Some(previous) = previous {
                        assert!(u32::from(previous) + 1 < u32::from(interval.start));
                    }
                    previous = Some(interval.end);
                    cardinality += interval.run_len();
                }
                assert_eq!(runs.len(), cardinality);
            }
        }
    }
}

proptest! {
    #[test]
    fn insert_contains_remove(
        values in btree_set(any::<u32>(), 0..=1_000),
        probe in any::<u32>(),
    ) {
        let mut rb = CowBitmap::new();
        for &value in &values {
            prop_assert!(rb.insert(value));
            prop_assert!(!rb.insert(value));
        }
        prop_assert_eq!(rb.len(), values.len() as u64);
        prop_assert_eq!(rb.contains(probe), values.contains(&probe));
        assert_invariants(&rb);

        for &value in &values {
            prop_assert!(rb.remove(value));
            prop_assert!(!rb.remove(value));
        }
        prop_assert!(rb.is_empty());
    }

    #[test]
    fn ops_match_reference_sets(a in CowBitmap::arbitrary(), b in CowBitmap::arbitrary()) {
        let (set_a, set_b) = (to_set(&a), to_set(&b));

        let and = &a & &b;
        prop_assert_eq!(to_set(&and), &set_a & &set_b);
        prop_assert_eq!(and.len(), (&set_a & &set_b).len() as u64);
        assert_invariants(&and);

        let or = &a | &b;
        prop_assert_eq!(to_set(&or), &set_a | &set_b);
        assert_invariants(&or);

        let xor = &a ^ &b;
        prop_assert_eq!(to_set(&xor), &set_a ^ &set_b);
        assert_invariants(&xor);

        let sub = &a - &b;
        prop_assert_eq!(to_set(&sub), &set_a - &set_b);
        assert_invariants(&sub);
    }

    #[test]
    fn and_or_xor_are_commutative(a in CowBitmap::arbitrary(), b in CowBitmap::arbitrary()) {
        prop_assert_eq!(&a & &b, &b & &a);
        prop_assert_eq!(&a | &b, &b | &a);
        prop_assert_eq!(&a ^ &b, &b ^ &a);
    }

    #[test]
    fn ops_are_associative(
        a in CowBitmap::arbitrary(),
        b in CowBitmap::arbitrary(),
        c in CowBitmap::arbitrary(),
    ) {
        prop_assert_eq!(&(&a & &b) & &c, &a & &(&b & &c));
        prop_assert_eq!(&(&a | &b) | &c, &a | &(&b | &c));
        prop_assert_eq!(&(&a ^ &b) ^ &c, &a ^ &(&b ^ &c));
    }

    #[test]
    fn self_operations(a in CowBitmap::arbitrary()) {
        prop_assert_eq!(&a & &a, a.clone());
        prop_assert_eq!(&a | &a, a.clone());
        prop_assert!((&a ^ &a).is_empty());
        prop_assert!((&a - &a).is_empty());
    }

    #[test]
    fn results_do_not_depend_on_representation(
        a in CowBitmap::arbitrary(),
        b in CowBitmap::arbitrary(),
    ) {
        // Optimizing may change encodings but never the value-level result
        let mut a_compressed = a.clone();
        let mut b_compressed = b.clone();
        a_compressed.optimize();
        b_compressed.optimize();

        prop_assert_eq!(&a & &b, &a_compressed & &b_compressed);
        prop_assert_eq!(&a | &b, &a_compressed | &b_compressed);
        prop_assert_eq!(&a ^ &b, &a_compressed ^ &b_compressed);
        prop_assert_eq!(&a - &b, &a_compressed - &b_compressed);
    }

    #[test]
    fn optimize_preserves_content(a in CowBitmap::arbitrary()) {
        let mut compressed = a.clone();
        compressed.optimize();
        prop_assert_eq!(to_set(&compressed), to_set(&a));
        prop_assert_eq!(compressed.len(), a.len());
        assert_invariants(&compressed);
    }

    #[test]
    fn serialization_roundtrip(a in CowBitmap::arbitrary()) {
        let bytes = a.to_bytes();
        prop_assert_eq!(bytes.len(), a.serialized_size());

        let back = CowBitmap::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&back, &a);
        // The representation of every container survives the roundtrip
        prop_assert_eq!(back.statistics(), a.statistics());
    }

    #[test]
    fn clone_isolation(a in CowBitmap::arbitrary(), edits in vec(any::<u32>(), 0..=50)) {
        let snapshot = to_set(&a);
        let mut fork = a.clone();
        for value in edits {
            if !fork.insert(value) {
                fork.remove(value);
            }
        }
        prop_assert_eq!(to_set(&a), snapshot);
        assert_invariants(&fork);
    }

    #[test]
    fn iteration_is_ascending(a in CowBitmap::arbitrary()) {
        let values: Vec<u32> = a.iter().collect();
        prop_assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(values.len() as u64, a.len());
    }

    #[test]
    fn retain_matches_reference(a in CowBitmap::arbitrary(), modulus in 2u32..=7) {
        let expected: BTreeSet<u32> =
            to_set(&a).into_iter().filter(|value| value % modulus != 0).collect();
        let mut filtered = a.clone();
        filtered.retain(|value| value % modulus != 0);
        prop_assert_eq!(to_set(&filtered), expected);
        assert_invariants(&filtered);
    }
}
