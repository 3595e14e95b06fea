use crate::bitmap::container::Container;
use crate::CowBitmap;

use super::store::Store;

/// Detailed statistics on the composition of a bitmap.
#[derive(Clone, Copy, PartialEq, Debug)]
#[non_exhaustive]
pub struct Statistics {
    /// Number of containers in the bitmap
    pub n_containers: u32,
    /// Number of array containers in the bitmap
    pub n_array_containers: u32,
    /// Number of run containers in the bitmap
    pub n_run_containers: u32,
    /// Number of bitmap containers in the bitmap
    pub n_bitmap_containers: u32,
    /// Number of values stored in array containers
    pub n_values_array_containers: u64,
    /// Number of values stored in run containers
    pub n_values_run_containers: u64,
    /// Number of values stored in bitmap containers
    pub n_values_bitmap_containers: u64,
    /// Number of bytes used by array containers
    pub n_bytes_array_containers: u64,
    /// Number of bytes used by run containers
    pub n_bytes_run_containers: u64,
    /// Number of bytes used by bitmap containers
    pub n_bytes_bitmap_containers: u64,
    /// Maximum value stored in the bitmap
    pub max_value: Option<u32>,
    /// Minimum value stored in the bitmap
    pub min_value: Option<u32>,
    /// Number of values stored in the bitmap
    pub cardinality: u64,
}

impl CowBitmap {
    /// Returns statistics about the composition of the bitmap.
    ///
    /// ```
    /// use cowbits::CowBitmap;
    ///
    /// let bitmap: CowBitmap = (1..100).collect();
    /// let statistics = bitmap.statistics();
    ///
    /// assert_eq!(statistics.n_containers, 1);
    /// assert_eq!(statistics.n_array_containers, 1);
    /// assert_eq!(statistics.n_run_containers, 0);
    /// assert_eq!(statistics.n_bitmap_containers, 0);
    /// assert_eq!(statistics.n_values_array_containers, 99);
    /// assert_eq!(statistics.n_bytes_array_containers, 198);
    /// assert_eq!(statistics.max_value, Some(99));
    /// assert_eq!(statistics.min_value, Some(1));
    /// assert_eq!(statistics.cardinality, 99);
    /// ```
    pub fn statistics(&self) -> Statistics {
        let mut n_containers = 0;
        let mut n_array_containers = 0;
        let mut n_run_containers = 0;
        let mut n_bitmap_containers = 0;
        let mut n_values_array_containers = 0;
        let mut n_values_run_containers = 0;
        let mut n_values_bitmap_containers = 0;
        let mut n_bytes_array_containers = 0;
        let mut n_bytes_run_containers = 0;
        let mut n_bytes_bitmap_containers = 0;
        let mut cardinality = 0;

        for Container { key: _, store } in &self.containers {
            cardinality += store.len();
            n_containers += 1;
            match store {
                Store::Array(_) => {
                    n_values_array_containers += store.len();
                    n_bytes_array_containers += store.byte_size();
                    n_array_containers += 1;
                }
                Store::Run(_) => {
                    n_values_run_containers += store.len();
                    n_bytes_run_containers += store.byte_size();
                    n_run_containers += 1;
                }
                Store::Bitmap(_) => {
                    n_values_bitmap_containers += store.len();
                    n_bytes_bitmap_containers += store.byte_size();
                    n_bitmap_containers += 1;
                }
            }
        }

        Statistics {
            n_containers,
            n_array_containers,
            n_run_containers,
            n_bitmap_containers,
            n_values_array_containers,
            n_values_run_containers,
            n_values_bitmap_containers,
            n_bytes_array_containers,
            n_bytes_run_containers,
            n_bytes_bitmap_containers,
            max_value: self.max(),
            min_value: self.min(),
            cardinality,
        }
    }
}
