use crate::CowBitmap;

/// Bulk set operations over any number of bitmaps.
///
/// The first operand seeds the accumulator and the remaining operands fold
/// into it, so `difference` subtracts every later bitmap from the first.
/// `intersection` stops consuming operands as soon as the accumulator is
/// empty. An empty iterator yields an empty bitmap.
///
/// # Examples
///
/// ```rust
/// use cowbits::{CowBitmap, MultiOps};
///
/// let a: CowBitmap = (0..10).collect();
/// let b: CowBitmap = (5..15).collect();
/// let c: CowBitmap = (8..20).collect();
///
/// assert_eq!([&a, &b, &c].union().len(), 20);
/// assert_eq!([&a, &b, &c].intersection().len(), 2);
/// ```
pub trait MultiOps<T>: IntoIterator<Item = T> {
    /// The type of output from operations.
    type Output;

    /// The `union` between all elements.
    fn union(self) -> Self::Output;

    /// The `intersection` between all elements.
    fn intersection(self) -> Self::Output;

    /// The `difference` between the first element and all the others.
    fn difference(self) -> Self::Output;

    /// The `symmetric difference` between all elements.
    fn symmetric_difference(self) -> Self::Output;
}

impl<'a, I> MultiOps<&'a CowBitmap> for I
where
    I: IntoIterator<Item = &'a CowBitmap>,
{
    type Output = CowBitmap;

    fn union(self) -> Self::Output {
        let mut iter = self.into_iter();
        let mut acc = match iter.next() {
            Some(first) => first.clone(),
            None => return CowBitmap::new(),
        };
        for rb in iter {
            acc |= rb;
        }
        acc
    }

    fn intersection(self) -> Self::Output {
        let mut iter = self.into_iter();
        let mut acc = match iter.next() {
            Some(first) => first.clone(),
            None => return CowBitmap::new(),
        };
        for rb in iter {
            if acc.is_empty() {
                break;
            }
            acc &= rb;
        }
        acc
    }

    fn difference(self) -> Self::Output {
        let mut iter = self.into_iter();
        let mut acc = match iter.next() {
            Some(first) => first.clone(),
            None => return CowBitmap::new(),
        };
        for rb in iter {
            if acc.is_empty() {
                break;
            }
            acc -= rb;
        }
        acc
    }

    fn symmetric_difference(self) -> Self::Output {
        let mut iter = self.into_iter();
        let mut acc = match iter.next() {
            Some(first) => first.clone(),
            None => return CowBitmap::new(),
        };
        for rb in iter {
            acc ^= rb;
        }
        acc
    }
}

impl<I> MultiOps<CowBitmap> for I
where
    I: IntoIterator<Item = CowBitmap>,
{
    type Output = CowBitmap;

    fn union(self) -> Self::Output {
        let mut iter = self.into_iter();
        let mut acc = match iter.next() {
            Some(first) => first,
            None => return CowBitmap::new(),
        };
        for rb in iter {
            acc |= rb;
        }
        acc
    }

    fn intersection(self) -> Self::Output {
        let mut iter = self.into_iter();
        let mut acc = match iter.next() {
            Some(first) => first,
            None => return CowBitmap::new(),
        };
        for rb in iter {
            if acc.is_empty() {
                break;
            }
            acc &= rb;
        }
        acc
    }

    fn difference(self) -> Self::Output {
        let mut iter = self.into_iter();
        let mut acc = match iter.next() {
            Some(first) => first,
            None => return CowBitmap::new(),
        };
        for rb in iter {
            if acc.is_empty() {
                break;
            }
            acc -= rb;
        }
        acc
    }

    fn symmetric_difference(self) -> Self::Output {
        let mut iter = self.into_iter();
        let mut acc = match iter.next() {
            Some(first) => first,
            None => return CowBitmap::new(),
        };
        for rb in iter {
            acc ^= rb;
        }
        acc
    }
}
