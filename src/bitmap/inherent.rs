use crate::CowBitmap;

use super::container::Container;
use super::scratch::Scratch;
use super::util;

impl CowBitmap {
    /// Creates an empty `CowBitmap`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    /// let rb = CowBitmap::new();
    /// ```
    pub fn new() -> CowBitmap {
        CowBitmap { containers: Vec::new(), scratch: Scratch::new() }
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was absent from the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let mut rb = CowBitmap::new();
    /// assert_eq!(rb.insert(3), true);
    /// assert_eq!(rb.insert(3), false);
    /// assert_eq!(rb.contains(3), true);
    /// ```
    #[inline]
    pub fn insert(&mut self, value: u32) -> bool {
        let (key, index) = util::split(value);
        let container = match self.containers.binary_search_by_key(&key, |c| c.key) {
            Ok(loc) => &mut self.containers[loc],
            Err(loc) => {
                self.containers.insert(loc, Container::new(key));
                &mut self.containers[loc]
            }
        };
        container.insert(index)
    }

    /// Removes a value from the set. Returns `true` if the value was
    /// present in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let mut rb = CowBitmap::new();
    /// rb.insert(3);
    /// assert_eq!(rb.remove(3), true);
    /// assert_eq!(rb.remove(3), false);
    /// assert_eq!(rb.contains(3), false);
    /// ```
    #[inline]
    pub fn remove(&mut self, value: u32) -> bool {
        let (key, index) = util::split(value);
        match self.containers.binary_search_by_key(&key, |c| c.key) {
            Ok(loc) => {
                if self.containers[loc].remove(index) {
                    if self.containers[loc].is_empty() {
                        self.containers.remove(loc);
                    }
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Returns `true` if this set contains the specified integer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let mut rb = CowBitmap::new();
    /// rb.insert(1);
    /// assert_eq!(rb.contains(0), false);
    /// assert_eq!(rb.contains(1), true);
    /// assert_eq!(rb.contains(100), false);
    /// ```
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        let (key, index) = util::split(value);
        match self.containers.binary_search_by_key(&key, |c| c.key) {
            Ok(loc) => self.containers[loc].contains(index),
            Err(_) => false,
        }
    }

    /// Clears all integers in this set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let mut rb = CowBitmap::new();
    /// rb.insert(1);
    /// rb.clear();
    /// assert_eq!(rb.contains(1), false);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.containers.clear();
    }

    /// Returns `true` if there are no integers in this set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let mut rb = CowBitmap::new();
    /// assert_eq!(rb.is_empty(), true);
    ///
    /// rb.insert(3);
    /// assert_eq!(rb.is_empty(), false);
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Returns the number of distinct integers added to the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let mut rb = CowBitmap::new();
    /// assert_eq!(rb.len(), 0);
    ///
    /// rb.insert(3);
    /// rb.insert(3);
    /// rb.insert(4);
    /// assert_eq!(rb.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> u64 {
        self.containers.iter().map(Container::len).sum()
    }

    /// Returns the minimum value in the set (if the set is non-empty).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let mut rb = CowBitmap::new();
    /// assert_eq!(rb.min(), None);
    ///
    /// rb.insert(3);
    /// rb.insert(4);
    /// assert_eq!(rb.min(), Some(3));
    /// ```
    #[inline]
    pub fn min(&self) -> Option<u32> {
        self.containers.first().and_then(|head| head.min().map(|min| util::join(head.key, min)))
    }

    /// Returns the maximum value in the set (if the set is non-empty).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let mut rb = CowBitmap::new();
    /// assert_eq!(rb.max(), None);
    ///
    /// rb.insert(3);
    /// rb.insert(4);
    /// assert_eq!(rb.max(), Some(4));
    /// ```
    #[inline]
    pub fn max(&self) -> Option<u32> {
        self.containers.last().and_then(|tail| tail.max().map(|max| util::join(tail.key, max)))
    }

    /// Applies the representation policy to every container, returning
    /// whether any of them changed representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let mut rb: CowBitmap = (1000..2000).collect();
    /// assert!(rb.optimize());
    /// assert_eq!(rb.len(), 1000);
    /// ```
    pub fn optimize(&mut self) -> bool {
        let mut changed = false;
        for container in &mut self.containers {
            changed |= container.optimize();
        }
        changed
    }

    /// Keeps only the values accepted by the predicate.
    ///
    /// The predicate sees every value exactly once, in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let mut rb: CowBitmap = (0..10).collect();
    /// rb.retain(|value| value % 2 == 0);
    /// assert_eq!(rb.iter().collect::<Vec<u32>>(), vec![0, 2, 4, 6, 8]);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(u32) -> bool) {
        self.containers.retain_mut(|container| {
            let key = container.key;
            container.retain(|index| f(util::join(key, index)));
            !container.is_empty()
        });
    }
}

impl Default for CowBitmap {
    fn default() -> CowBitmap {
        CowBitmap::new()
    }
}

impl Clone for CowBitmap {
    /// Copy-on-write clone: both bitmaps share the container buffers until
    /// one side mutates a container, which then copies just that buffer.
    fn clone(&self) -> Self {
        CowBitmap { containers: self.containers.clone(), scratch: Scratch::new() }
    }

    fn clone_from(&mut self, source: &Self) {
        self.containers.clone_from(&source.containers);
    }
}
