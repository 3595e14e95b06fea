//! A compressed bitmap for `u32` values with cheap copy-on-write cloning.
//!
//! Values are split into a 16-bit key and a 16-bit index; every key owns a
//! container holding the indices present under it, stored as a sorted
//! array, a 65536-bit bitmap, or a list of runs, whichever fits the data at
//! hand. Cloning a bitmap shares the container buffers between the original
//! and the clone; the first mutation on either side copies only the
//! container it touches.
//!
//! # Examples
//!
//! ```rust
//! use cowbits::CowBitmap;
//!
//! let mut rb = CowBitmap::new();
//!
//! // insert all primes less than 10
//! rb.insert(2);
//! rb.insert(3);
//! rb.insert(5);
//! rb.insert(7);
//! println!("total bits set to true: {}", rb.len());
//! ```

mod bitmap;

pub use bitmap::{CowBitmap, IntoIter, Iter, MultiOps, Statistics};
