use std::collections::{BTreeSet, HashMap};

use crate::mask::GroupBit;
use crate::types::{GroupList, GroupName};

/// Number of slots available to named groups; also the slot of the builtin default group.
pub const MAX_BIT: GroupBit = 127;
pub const DEFAULT_BIT: GroupBit = MAX_BIT;

/// Name to slot assignment for one sync pass.
#[derive(Clone, Debug, Default)]
pub struct BitMapping {
    by_name: HashMap<GroupName, GroupBit>,
    dropped: Vec<GroupName>,
    overflow: bool,
}

impl BitMapping {
    #[inline]
    pub fn get(&self, name: &str) -> Option<GroupBit> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// True when the name universe reached the slot capacity.
    #[inline]
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Names that received no slot, in allocation order.
    pub fn dropped(&self) -> &[GroupName] {
        &self.dropped
    }

    /// Assigned (name, slot) pairs ordered by slot.
    pub fn entries(&self) -> Vec<(&GroupName, GroupBit)> {
        let mut out: Vec<_> = self.by_name.iter().map(|(n, b)| (n, *b)).collect();
        out.sort_by_key(|(_, b)| *b);
        out
    }
}

/// Union of every group name referenced by `lists`.
pub fn collect_names<'a>(lists: impl IntoIterator<Item = &'a GroupList>) -> BTreeSet<GroupName> {
    lists
        .into_iter()
        .flat_map(|list| list.names().cloned())
        .collect()
}

/// Assign slots `0..MAX_BIT` to `names` in sorted order.
///
/// Names past the last slot are left unmapped and listed in [`BitMapping::dropped`]. No
/// diagnostic is logged here; the sync pass reports overflow once per pass.
pub fn allocate(names: &BTreeSet<GroupName>) -> BitMapping {
    let capacity = MAX_BIT as usize;
    let overflow = names.len() >= capacity;

    let mut by_name = HashMap::with_capacity(names.len().min(capacity));
    let mut dropped = Vec::new();
    for (index, name) in names.iter().enumerate() {
        if index < capacity {
            by_name.insert(name.clone(), index as GroupBit);
        } else {
            dropped.push(name.clone());
        }
    }
    BitMapping {
        by_name,
        dropped,
        overflow,
    }
}
