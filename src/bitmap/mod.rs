mod container;
mod scratch;
mod search;
mod store;
mod util;

// Order of these modules matters as it determines the `impl` blocks order in
// the docs
mod fmt;
mod inherent;
mod iter;
mod multiops;
mod ops;
#[cfg(feature = "serde")]
mod serde;
pub(crate) mod serialization;
mod statistics;

#[cfg(test)]
mod arbitrary;
#[cfg(test)]
mod proptests;

pub use self::iter::{IntoIter, Iter};
pub use self::multiops::MultiOps;
pub use self::statistics::Statistics;

use self::container::Container;
use self::scratch::Scratch;

/// A compressed bitmap over `u32` values with copy-on-write cloning.
///
/// # Examples
///
/// ```rust
/// use cowbits::CowBitmap;
///
/// let mut rb = CowBitmap::new();
///
/// rb.insert(2);
/// rb.insert(7);
/// assert!(rb.contains(7));
/// assert_eq!(rb.len(), 2);
/// ```
pub struct CowBitmap {
    containers: Vec<Container>,
    scratch: Scratch,
}

impl PartialEq for CowBitmap {
    fn eq(&self, other: &Self) -> bool {
        self.containers == other.containers
    }
}

impl Eq for CowBitmap {}
