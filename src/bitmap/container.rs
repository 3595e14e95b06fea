use core::fmt;

use super::scratch::Scratch;
use super::store::{self, RunStore, Store, BITMAP_BYTES};
use super::util;

/// Largest cardinality at which an array beats the fixed-size bitmap.
pub const ARRAY_LIMIT: u64 = 4096;
/// A run store fragmented past this many runs converts away immediately.
pub const RUN_LIMIT: u64 = 2048;

/// Minimum cardinality before run compression is considered for an array.
const RUN_MIN: u64 = 128;
/// A bitmap only moves to runs when it collapses to a handful of them.
const BITMAP_RUN_LIMIT: u64 = 5;
/// Cardinality above which a fragmented run store counts as dense.
const RUN_DENSE_LIMIT: u64 = 32768;

#[derive(PartialEq, Clone)]
pub(crate) struct Container {
    pub key: u16,
    pub store: Store,
}

#[derive(Clone)]
pub(crate) struct Iter<'a> {
    pub key: u16,
    inner: store::Iter<'a>,
}

impl Container {
    pub fn new(key: u16) -> Container {
        Container { key, store: Store::new() }
    }

    pub fn len(&self) -> u64 {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[inline]
    pub fn insert(&mut self, index: u16) -> bool {
        if self.store.insert(index) {
            self.ensure_correct_store();
            true
        } else {
            false
        }
    }

    pub fn remove(&mut self, index: u16) -> bool {
        if self.store.remove(index) {
            self.ensure_correct_store();
            true
        } else {
            false
        }
    }

    pub fn contains(&self, index: u16) -> bool {
        self.store.contains(index)
    }

    pub fn retain(&mut self, f: impl FnMut(u16) -> bool) {
        self.store.retain(f);
        self.ensure_correct_store();
    }

    pub fn min(&self) -> Option<u16> {
        self.store.min()
    }

    pub fn max(&self) -> Option<u16> {
        self.store.max()
    }

    pub fn and_assign(&mut self, rhs: &Container, scratch: &mut Scratch) {
        self.store.and_assign(&rhs.store, scratch);
        self.ensure_correct_store();
    }

    pub fn or_assign(&mut self, rhs: &Container, scratch: &mut Scratch) {
        self.store.or_assign(&rhs.store, scratch);
        self.ensure_correct_store();
    }

    pub fn xor_assign(&mut self, rhs: &Container, scratch: &mut Scratch) {
        self.store.xor_assign(&rhs.store, scratch);
        self.ensure_correct_store();
    }

    pub fn andnot_assign(&mut self, rhs: &Container, scratch: &mut Scratch) {
        self.store.andnot_assign(&rhs.store, scratch);
        self.ensure_correct_store();
    }

    /// Enforces the hard representation bounds after a mutation: the
    /// array/bitmap crossover at `ARRAY_LIMIT` and the run fragmentation
    /// cap at `RUN_LIMIT`. Run compression itself only happens on
    /// `optimize`.
    pub(crate) fn ensure_correct_store(&mut self) {
        let new_store = match &self.store {
            Store::Bitmap(bits) if bits.len() <= ARRAY_LIMIT => Some(self.store.to_array()),
            Store::Array(values) if values.len() > ARRAY_LIMIT => Some(self.store.to_bitmap()),
            Store::Run(runs) if runs.run_count() > RUN_LIMIT => {
                if runs.len() <= ARRAY_LIMIT {
                    Some(self.store.to_array())
                } else {
                    Some(self.store.to_bitmap())
                }
            }
            _ => None,
        };
        if let Some(new_store) = new_store {
            self.store = new_store;
        }
    }

    /// Applies the representation policy exhaustively, returning whether
    /// the representation changed. A container transitions at most twice.
    pub fn optimize(&mut self) -> bool {
        if !self.apply_policy() {
            return false;
        }
        self.apply_policy();
        true
    }

    /// One policy step, driven purely by the summary statistics of the
    /// current store: cardinality `n`, run count `r`, and the byte
    /// footprints `2n` (array), 8192 (bitmap) and `2 + 4r` (runs).
    fn apply_policy(&mut self) -> bool {
        let new_store = match &self.store {
            Store::Array(values) => {
                if values.len() > ARRAY_LIMIT {
                    Some(self.store.to_bitmap())
                } else {
                    let n = values.len();
                    let runs = values.count_runs();
                    let run_bytes = RunStore::byte_size_for(runs);
                    if n >= RUN_MIN && 4 * run_bytes < 3 * values.byte_size() && 3 * runs <= n {
                        Some(self.store.to_run())
                    } else {
                        None
                    }
                }
            }
            Store::Bitmap(bits) => {
                if bits.len() <= ARRAY_LIMIT {
                    Some(self.store.to_array())
                } else {
                    let runs = bits.count_runs();
                    let run_bytes = RunStore::byte_size_for(runs);
                    let array_bytes = bits.len() * 2;
                    if 4 * run_bytes < BITMAP_BYTES
                        && 2 * run_bytes < array_bytes
                        && runs <= BITMAP_RUN_LIMIT
                    {
                        Some(self.store.to_run())
                    } else {
                        None
                    }
                }
            }
            Store::Run(runs) => {
                let n = runs.len();
                let r = runs.run_count();
                if r > RUN_LIMIT || (n > RUN_DENSE_LIMIT && 5 * runs.byte_size() > 4 * BITMAP_BYTES)
                {
                    if n <= ARRAY_LIMIT {
                        Some(self.store.to_array())
                    } else {
                        Some(self.store.to_bitmap())
                    }
                } else if n <= ARRAY_LIMIT && n < 2 * r {
                    // Average run length dropped below two: the runs
                    // degenerated into scattered values
                    Some(self.store.to_array())
                } else {
                    None
                }
            }
        };
        match new_store {
            Some(new_store) => {
                self.store = new_store;
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = u32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        Iter { key: self.key, inner: self.store.iter() }
    }
}

impl IntoIterator for Container {
    type Item = u32;
    type IntoIter = Iter<'static>;

    fn into_iter(self) -> Iter<'static> {
        Iter { key: self.key, inner: self.store.into_iter() }
    }
}

impl Iterator for Iter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.inner.next().map(|index| util::join(self.key, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        format!("Container<{:?} @ {:?}>", self.len(), self.key).fmt(formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(container: &Container) -> &'static str {
        match container.store {
            Store::Array(_) => "array",
            Store::Bitmap(_) => "bitmap",
            Store::Run(_) => "run",
        }
    }

    fn filled(values: impl IntoIterator<Item = u16>) -> Container {
        let mut container = Container::new(0);
        for value in values {
            container.insert(value);
        }
        container
    }

    #[test]
    fn crossover_on_insert_and_remove() {
        let mut container = filled(0..=ARRAY_LIMIT as u16);
        assert_eq!(kind(&container), "bitmap");
        assert_eq!(container.len(), ARRAY_LIMIT + 1);

        container.remove(0);
        assert_eq!(kind(&container), "array");
        assert_eq!(container.len(), ARRAY_LIMIT);
    }

    #[test]
    fn optimize_compresses_long_runs_from_array() {
        let mut container = filled(1000..2000);
        assert!(container.optimize());
        assert_eq!(kind(&container), "run");
        assert_eq!(container.len(), 1000);
        assert!(!container.optimize());
    }

    #[test]
    fn optimize_leaves_short_arrays_alone() {
        let mut container = filled([1, 5, 10]);
        assert!(!container.optimize());
        assert_eq!(kind(&container), "array");
    }

    #[test]
    fn optimize_leaves_scattered_arrays_alone() {
        // 3000 values with stride three: run compression would cost more
        let mut container = filled((0..3000).map(|i| i * 3));
        assert!(!container.optimize());
        assert_eq!(kind(&container), "array");
    }

    #[test]
    fn optimize_compresses_dense_bitmap_into_runs() {
        let mut container = filled(0..30000);
        assert_eq!(kind(&container), "bitmap");
        assert!(container.optimize());
        assert_eq!(kind(&container), "run");
        assert_eq!(container.len(), 30000);
    }

    #[test]
    fn fragmented_bitmap_stays_a_bitmap() {
        let mut container = filled((0..5000).map(|i| i * 3));
        assert_eq!(kind(&container), "bitmap");
        assert!(!container.optimize());
        assert_eq!(kind(&container), "bitmap");
    }

    #[test]
    fn degenerated_runs_fall_back_to_array() {
        let mut container = filled(0..1000);
        container.optimize();
        assert_eq!(kind(&container), "run");

        // Punch out every second value: average run length collapses to one
        for index in (0..1000).step_by(2) {
            container.remove(index);
        }
        assert!(container.optimize());
        assert_eq!(kind(&container), "array");
        assert_eq!(container.len(), 500);
    }

    #[test]
    fn fragmented_runs_convert_on_mutation() {
        let mut container = filled(0..=(6 * RUN_LIMIT as u16));
        container.optimize();
        assert_eq!(kind(&container), "run");

        // Each removal splits one run; past RUN_LIMIT the store converts
        for index in (1..).step_by(3) {
            if kind(&container) != "run" {
                break;
            }
            container.remove(index);
        }
        assert_eq!(kind(&container), "bitmap");
        assert!(container.len() > ARRAY_LIMIT);
    }

    #[test]
    fn ops_keep_cardinality_exact() {
        let mut scratch = Scratch::new();
        let mut lhs = filled(0..3000);
        let rhs = filled(1500..4500);

        lhs.and_assign(&rhs, &mut scratch);
        assert_eq!(lhs.len(), 1500);
        assert_eq!(lhs.iter_values(), (1500..3000).collect::<Vec<u16>>());
    }

    impl Container {
        fn iter_values(&self) -> Vec<u16> {
            self.store.iter().collect()
        }
    }
}
