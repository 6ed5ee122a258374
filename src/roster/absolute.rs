//! Static local → absolute slot table

use crate::core::types::{AbsoluteId, LocalId};

/// Maps folder-order ids onto the host's fixed character slots
///
/// Entry `i` holds the absolute id of local id `i + 1`. The table is
/// configuration data and must follow the folder order used at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteTable {
    by_local: Vec<AbsoluteId>,
}

impl AbsoluteTable {
    pub fn new(by_local: Vec<AbsoluteId>) -> Self {
        Self { by_local }
    }

    pub fn to_absolute(&self, local: LocalId) -> Option<AbsoluteId> {
        local
            .index()
            .checked_sub(1)
            .and_then(|i| self.by_local.get(i))
            .copied()
    }

    /// Inverse lookup
    pub fn to_local(&self, absolute: AbsoluteId) -> Option<LocalId> {
        self.by_local
            .iter()
            .position(|&a| a == absolute)
            .and_then(|i| LocalId::from_host(i as i32 + 1))
    }

    /// All `(local, absolute)` pairs in local order
    pub fn pairs(&self) -> impl Iterator<Item = (LocalId, AbsoluteId)> + '_ {
        self.by_local
            .iter()
            .enumerate()
            .filter_map(|(i, &abs)| LocalId::from_host(i as i32 + 1).map(|l| (l, abs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permuted() -> AbsoluteTable {
        AbsoluteTable::new(vec![AbsoluteId(3), AbsoluteId(1), AbsoluteId(2)])
    }

    #[test]
    fn test_forward_and_inverse() {
        let table = permuted();
        assert_eq!(table.to_absolute(LocalId(1)), Some(AbsoluteId(3)));
        assert_eq!(table.to_absolute(LocalId(3)), Some(AbsoluteId(2)));
        assert_eq!(table.to_local(AbsoluteId(1)), Some(LocalId(2)));
        assert_eq!(table.to_local(AbsoluteId(9)), None);
    }

    #[test]
    fn test_local_zero_and_overflow_unmapped() {
        let table = permuted();
        assert_eq!(table.to_absolute(LocalId(0)), None);
        assert_eq!(table.to_absolute(LocalId(4)), None);
    }

    #[test]
    fn test_pairs_in_local_order() {
        let pairs: Vec<_> = permuted().pairs().collect();
        assert_eq!(
            pairs,
            vec![
                (LocalId(1), AbsoluteId(3)),
                (LocalId(2), AbsoluteId(1)),
                (LocalId(3), AbsoluteId(2)),
            ]
        );
    }
}
