//! Recompute packed masks from group membership lists.

use crate::alloc::{BitMapping, DEFAULT_BIT};
use crate::mask::PackedMask;
use crate::types::GroupList;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Material,
    Light,
}

impl EntityKind {
    /// Only materials carry a shadow mask.
    #[inline]
    pub fn has_shadow_mask(self) -> bool {
        matches!(self, EntityKind::Material)
    }
}

/// Masks produced for one entity. `shadow_bits` is present only for kinds with a shadow mask
/// and is always a subset of `bits`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupMasks {
    pub bits: PackedMask,
    pub shadow_bits: Option<PackedMask>,
}

/// Anything that owns a light group list and stores the derived masks.
pub trait GroupMember {
    fn kind(&self) -> EntityKind;
    fn light_groups(&self) -> &GroupList;
    /// Overwrite the stored masks with the result of a pass.
    fn store_masks(&mut self, masks: GroupMasks);
}

pub fn compute_masks(groups: &GroupList, kind: EntityKind, mapping: &BitMapping) -> GroupMasks {
    let with_shadow = kind.has_shadow_mask();
    let mut bits = PackedMask::EMPTY;
    let mut shadow = PackedMask::EMPTY;

    for grp in groups.groups() {
        // Unmapped names (dropped on overflow) contribute nothing.
        let Some(bit) = mapping.get(grp.name.as_str()) else {
            continue;
        };
        bits.set(bit);
        if with_shadow && !grp.ignore_shadow {
            shadow.set(bit);
        }
    }

    if groups.use_default {
        bits.set(DEFAULT_BIT);
        if with_shadow && !groups.ignore_default_shadow {
            shadow.set(DEFAULT_BIT);
        }
    }

    GroupMasks {
        bits,
        shadow_bits: with_shadow.then_some(shadow),
    }
}

/// Overwrite the masks of every entity in `entities`. Returns how many were rewritten.
pub fn sync_masks<'a, E, I>(entities: I, mapping: &BitMapping) -> usize
where
    E: GroupMember + ?Sized + 'a,
    I: IntoIterator<Item = &'a mut E>,
{
    let mut count = 0;
    for entity in entities {
        let masks = compute_masks(entity.light_groups(), entity.kind(), mapping);
        entity.store_masks(masks);
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::{allocate, collect_names};
    use crate::types::{GroupName, Membership};

    struct Holder {
        kind: EntityKind,
        groups: GroupList,
        masks: GroupMasks,
    }

    impl GroupMember for Holder {
        fn kind(&self) -> EntityKind {
            self.kind
        }
        fn light_groups(&self) -> &GroupList {
            &self.groups
        }
        fn store_masks(&mut self, masks: GroupMasks) {
            self.masks = masks;
        }
    }

    fn member(name: &str, ignore_shadow: bool) -> Membership {
        Membership {
            name: GroupName::new(name).unwrap(),
            ignore_shadow,
        }
    }

    #[test]
    fn default_only_sets_slot_127() {
        let groups = GroupList::new();
        let masks = compute_masks(&groups, EntityKind::Material, &BitMapping::default());
        assert_eq!(masks.bits.words(), [0, 0, 0, 1]);
        assert_eq!(masks.shadow_bits, Some(masks.bits));

        let masks = compute_masks(&groups, EntityKind::Light, &BitMapping::default());
        assert_eq!(masks.bits.words(), [0, 0, 0, 1]);
        assert_eq!(masks.shadow_bits, None);
    }

    #[test]
    fn material_and_light_scenario() {
        let mut a = GroupList::from_memberships([member("Key", false)]);
        a.use_default = false;
        let mut b = GroupList::from_memberships([member("Fill", true)]);
        b.ignore_default_shadow = true;

        let mut holders = vec![
            Holder {
                kind: EntityKind::Material,
                groups: a,
                masks: GroupMasks::default(),
            },
            Holder {
                kind: EntityKind::Material,
                groups: b,
                masks: GroupMasks::default(),
            },
        ];
        let mapping = allocate(&collect_names(holders.iter().map(|h| &h.groups)));
        let key = mapping.get("Key").unwrap();
        let fill = mapping.get("Fill").unwrap();

        assert_eq!(sync_masks(holders.iter_mut(), &mapping), 2);

        let a = &holders[0].masks;
        assert!(a.bits.contains(key));
        assert_eq!(a.bits.count_ones(), 1);
        assert_eq!(a.shadow_bits, Some(a.bits));

        let b = &holders[1].masks;
        assert!(b.bits.contains(fill));
        assert!(b.bits.contains(DEFAULT_BIT));
        assert_eq!(b.bits.count_ones(), 2);
        assert_eq!(b.shadow_bits, Some(PackedMask::EMPTY));
    }

    #[test]
    fn light_ignores_shadow_flags() {
        let groups = GroupList::from_memberships([member("Key", true)]);
        let mapping = allocate(&collect_names([&groups]));
        let masks = compute_masks(&groups, EntityKind::Light, &mapping);
        assert!(masks.bits.contains(0));
        assert!(masks.shadow_bits.is_none());
    }

    #[test]
    fn unmapped_names_set_nothing() {
        let mut groups = GroupList::from_memberships([member("Ghost", false)]);
        groups.use_default = false;
        let masks = compute_masks(&groups, EntityKind::Material, &BitMapping::default());
        assert!(masks.bits.is_empty());
        assert_eq!(masks.shadow_bits, Some(PackedMask::EMPTY));
    }

    #[test]
    fn pass_overwrites_previous_masks() {
        let mut holder = Holder {
            kind: EntityKind::Material,
            groups: GroupList::new(),
            masks: GroupMasks {
                bits: PackedMask::from_words([u32::MAX; 4]),
                shadow_bits: Some(PackedMask::from_words([u32::MAX; 4])),
            },
        };
        holder.groups.use_default = false;
        sync_masks([&mut holder], &BitMapping::default());
        assert!(holder.masks.bits.is_empty());
        assert_eq!(holder.masks.shadow_bits, Some(PackedMask::EMPTY));
    }
}
