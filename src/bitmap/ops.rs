use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};

use crate::CowBitmap;

impl BitOr<CowBitmap> for CowBitmap {
    type Output = CowBitmap;

    /// An `union` between two sets.
    fn bitor(mut self, rhs: CowBitmap) -> CowBitmap {
        BitOrAssign::bitor_assign(&mut self, &rhs);
        self
    }
}

impl BitOr<&CowBitmap> for CowBitmap {
    type Output = CowBitmap;

    /// An `union` between two sets.
    fn bitor(mut self, rhs: &CowBitmap) -> CowBitmap {
        BitOrAssign::bitor_assign(&mut self, rhs);
        self
    }
}

impl BitOr<CowBitmap> for &CowBitmap {
    type Output = CowBitmap;

    /// An `union` between two sets.
    fn bitor(self, rhs: CowBitmap) -> CowBitmap {
        BitOr::bitor(rhs, self)
    }
}

impl BitOr<&CowBitmap> for &CowBitmap {
    type Output = CowBitmap;

    /// An `union` between two sets.
    fn bitor(self, rhs: &CowBitmap) -> CowBitmap {
        let mut lhs = self.clone();
        BitOrAssign::bitor_assign(&mut lhs, rhs);
        lhs
    }
}

impl BitOrAssign<CowBitmap> for CowBitmap {
    /// An `union` between two sets.
    fn bitor_assign(&mut self, rhs: CowBitmap) {
        BitOrAssign::bitor_assign(self, &rhs);
    }
}

impl BitOrAssign<&CowBitmap> for CowBitmap {
    /// An `union` between two sets.
    ///
    /// Containers present only in `rhs` are shared into `self`; the copy
    /// happens lazily if either side mutates them later.
    fn bitor_assign(&mut self, rhs: &CowBitmap) {
        let CowBitmap { containers, scratch } = self;
        for rhs_container in &rhs.containers {
            match containers.binary_search_by_key(&rhs_container.key, |c| c.key) {
                Ok(loc) => containers[loc].or_assign(rhs_container, scratch),
                Err(loc) => containers.insert(loc, rhs_container.clone()),
            }
        }
    }
}

impl BitAnd<CowBitmap> for CowBitmap {
    type Output = CowBitmap;

    /// An `intersection` between two sets.
    fn bitand(mut self, rhs: CowBitmap) -> CowBitmap {
        BitAndAssign::bitand_assign(&mut self, &rhs);
        self
    }
}

impl BitAnd<&CowBitmap> for CowBitmap {
    type Output = CowBitmap;

    /// An `intersection` between two sets.
    fn bitand(mut self, rhs: &CowBitmap) -> CowBitmap {
        BitAndAssign::bitand_assign(&mut self, rhs);
        self
    }
}

impl BitAnd<CowBitmap> for &CowBitmap {
    type Output = CowBitmap;

    /// An `intersection` between two sets.
    fn bitand(self, rhs: CowBitmap) -> CowBitmap {
        BitAnd::bitand(rhs, self)
    }
}

impl BitAnd<&CowBitmap> for &CowBitmap {
    type Output = CowBitmap;

    /// An `intersection` between two sets.
    fn bitand(self, rhs: &CowBitmap) -> CowBitmap {
        let mut lhs = self.clone();
        BitAndAssign::bitand_assign(&mut lhs, rhs);
        lhs
    }
}

impl BitAndAssign<CowBitmap> for CowBitmap {
    /// An `intersection` between two sets.
    fn bitand_assign(&mut self, rhs: CowBitmap) {
        BitAndAssign::bitand_assign(self, &rhs);
    }
}

impl BitAndAssign<&CowBitmap> for CowBitmap {
    /// An `intersection` between two sets.
    fn bitand_assign(&mut self, rhs: &CowBitmap) {
        let CowBitmap { containers, scratch } = self;
        containers.retain_mut(|container| {
            match rhs.containers.binary_search_by_key(&container.key, |c| c.key) {
                Ok(loc) => {
                    container.and_assign(&rhs.containers[loc], scratch);
                    !container.is_empty()
                }
                Err(_) => false,
            }
        });
    }
}

impl Sub<CowBitmap> for CowBitmap {
    type Output = CowBitmap;

    /// A `difference` between two sets.
    fn sub(mut self, rhs: CowBitmap) -> CowBitmap {
        SubAssign::sub_assign(&mut self, &rhs);
        self
    }
}

impl Sub<&CowBitmap> for CowBitmap {
    type Output = CowBitmap;

    /// A `difference` between two sets.
    fn sub(mut self, rhs: &CowBitmap) -> CowBitmap {
        SubAssign::sub_assign(&mut self, rhs);
        self
    }
}

impl Sub<CowBitmap> for &CowBitmap {
    type Output = CowBitmap;

    /// A `difference` between two sets.
    fn sub(self, rhs: CowBitmap) -> CowBitmap {
        Sub::sub(self, &rhs)
    }
}

impl Sub<&CowBitmap> for &CowBitmap {
    type Output = CowBitmap;

    /// A `difference` between two sets.
    fn sub(self, rhs: &CowBitmap) -> CowBitmap {
        let mut lhs = self.clone();
        SubAssign::sub_assign(&mut lhs, rhs);
        lhs
    }
}

impl SubAssign<CowBitmap> for CowBitmap {
    /// A `difference` between two sets.
    fn sub_assign(&mut self, rhs: CowBitmap) {
        SubAssign::sub_assign(self, &rhs);
    }
}

impl SubAssign<&CowBitmap> for CowBitmap {
    /// A `difference` between two sets.
    fn sub_assign(&mut self, rhs: &CowBitmap) {
        let CowBitmap { containers, scratch } = self;
        containers.retain_mut(|container| {
            match rhs.containers.binary_search_by_key(&container.key, |c| c.key) {
                Ok(loc) => {
                    container.andnot_assign(&rhs.containers[loc], scratch);
                    !container.is_empty()
                }
                Err(_) => true,
            }
        });
    }
}

impl BitXor<CowBitmap> for CowBitmap {
    type Output = CowBitmap;

    /// A `symmetric difference` between two sets.
    fn bitxor(mut self, rhs: CowBitmap) -> CowBitmap {
        BitXorAssign::bitxor_assign(&mut self, &rhs);
        self
    }
}

impl BitXor<&CowBitmap> for CowBitmap {
    type Output = CowBitmap;

    /// A `symmetric difference` between two sets.
    fn bitxor(mut self, rhs: &CowBitmap) -> CowBitmap {
        BitXorAssign::bitxor_assign(&mut self, rhs);
        self
    }
}

impl BitXor<CowBitmap> for &CowBitmap {
    type Output = CowBitmap;

    /// A `symmetric difference` between two sets.
    fn bitxor(self, rhs: CowBitmap) -> CowBitmap {
        BitXor::bitxor(rhs, self)
    }
}

impl BitXor<&CowBitmap> for &CowBitmap {
    type Output = CowBitmap;

    /// A `symmetric difference` between two sets.
    fn bitxor(self, rhs: &CowBitmap) -> CowBitmap {
        let mut lhs = self.clone();
        BitXorAssign::bitxor_assign(&mut lhs, rhs);
        lhs
    }
}

impl BitXorAssign<CowBitmap> for CowBitmap {
    /// A `symmetric difference` between two sets.
    fn bitxor_assign(&mut self, rhs: CowBitmap) {
        BitXorAssign::bitxor_assign(self, &rhs);
    }
}

impl BitXorAssign<&CowBitmap> for CowBitmap {
    /// A `symmetric difference` between two sets.
    fn bitxor_assign(&mut self, rhs: &CowBitmap) {
        let CowBitmap { containers, scratch } = self;
        for rhs_container in &rhs.containers {
            match containers.binary_search_by_key(&rhs_container.key, |c| c.key) {
                Ok(loc) => {
                    containers[loc].xor_assign(rhs_container, scratch);
                    if containers[loc].is_empty() {
                        containers.remove(loc);
                    }
                }
                Err(loc) => containers.insert(loc, rhs_container.clone()),
            }
        }
    }
}
