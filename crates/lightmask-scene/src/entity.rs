use std::fmt;

use lightmask_groups::{EntityKind, GroupList, GroupMasks, GroupMember, PackedMask};

#[derive(Clone, Debug, Default)]
pub struct Material {
    pub name: String,
    /// Source library for externally linked data; linked materials are read-only.
    pub library: Option<String>,
    pub light_groups: GroupList,
    pub light_group_bits: PackedMask,
    pub light_group_shadow_bits: PackedMask,
}

#[derive(Clone, Debug, Default)]
pub struct Light {
    pub name: String,
    pub library: Option<String>,
    pub light_groups: GroupList,
    pub light_group_bits: PackedMask,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.library.is_some()
    }
}

impl Light {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.library.is_some()
    }
}

impl GroupMember for Material {
    fn kind(&self) -> EntityKind {
        EntityKind::Material
    }

    fn light_groups(&self) -> &GroupList {
        &self.light_groups
    }

    fn store_masks(&mut self, masks: GroupMasks) {
        self.light_group_bits = masks.bits;
        self.light_group_shadow_bits = masks.shadow_bits.unwrap_or_default();
    }
}

impl GroupMember for Light {
    fn kind(&self) -> EntityKind {
        EntityKind::Light
    }

    fn light_groups(&self) -> &GroupList {
        &self.light_groups
    }

    fn store_masks(&mut self, masks: GroupMasks) {
        self.light_group_bits = masks.bits;
    }
}

/// Index of a material or light inside a [`crate::Scene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Material(usize),
    Light(usize),
}

impl EntityRef {
    pub fn kind(self) -> EntityKind {
        match self {
            EntityRef::Material(_) => EntityKind::Material,
            EntityRef::Light(_) => EntityKind::Light,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Material(i) => write!(f, "material #{}", i),
            EntityRef::Light(i) => write!(f, "light #{}", i),
        }
    }
}
