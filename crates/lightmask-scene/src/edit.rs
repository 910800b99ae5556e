//! Group editing operations. Each successful edit ends with a full resync.

use std::fmt;

use lightmask_groups::{GroupList, GroupName, InvalidGroupName, Membership};

use crate::entity::EntityRef;
use crate::scene::{Scene, SyncReport};

const UNIQUE_NAME_BASE: &str = "LightGroup";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditError {
    NoSuchEntity(EntityRef),
    /// The target is linked from a library and cannot be edited.
    Linked(EntityRef),
    NoActiveGroup(EntityRef),
    AlreadyLinked { target: EntityRef, name: String },
    UnknownGroup(String),
    InvalidName,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::NoSuchEntity(t) => write!(f, "no such {}", t),
            EditError::Linked(t) => write!(f, "{} is linked from a library", t),
            EditError::NoActiveGroup(t) => write!(f, "{} has no active light group", t),
            EditError::AlreadyLinked { target, name } => {
                write!(f, "{} already uses light group '{}'", target, name)
            }
            EditError::UnknownGroup(name) => write!(f, "unknown light group '{}'", name),
            EditError::InvalidName => write!(f, "light group name must not be empty"),
        }
    }
}

impl std::error::Error for EditError {}

impl From<InvalidGroupName> for EditError {
    fn from(_: InvalidGroupName) -> Self {
        EditError::InvalidName
    }
}

impl Scene {
    /// `"LightGroup"`, or the first `"LightGroup.NNN"` not used anywhere in the scene.
    pub fn unique_group_name(&self) -> Result<GroupName, EditError> {
        let names = self.name_set();
        let mut candidate = UNIQUE_NAME_BASE.to_string();
        let mut i = 1u32;
        while names.contains(candidate.as_str()) {
            candidate = format!("{}.{:03}", UNIQUE_NAME_BASE, i);
            i += 1;
        }
        Ok(GroupName::new(candidate)?)
    }

    /// Group names in the scene that `target` does not use yet.
    pub fn linkable_names(&self, target: EntityRef) -> Result<Vec<GroupName>, EditError> {
        let groups = self.groups(target).ok_or(EditError::NoSuchEntity(target))?;
        Ok(self
            .name_set()
            .into_iter()
            .filter(|n| !groups.contains(n.as_str()))
            .collect())
    }

    fn editable_groups(&mut self, target: EntityRef) -> Result<&mut GroupList, EditError> {
        let (linked, groups) = match target {
            EntityRef::Material(i) => {
                let m = self
                    .materials
                    .get_mut(i)
                    .ok_or(EditError::NoSuchEntity(target))?;
                (m.is_linked(), &mut m.light_groups)
            }
            EntityRef::Light(i) => {
                let l = self
                    .lights
                    .get_mut(i)
                    .ok_or(EditError::NoSuchEntity(target))?;
                (l.is_linked(), &mut l.light_groups)
            }
        };
        if linked {
            return Err(EditError::Linked(target));
        }
        Ok(groups)
    }

    /// Create a freshly named group on `target` and select it.
    pub fn new_group(&mut self, target: EntityRef) -> Result<(GroupName, SyncReport), EditError> {
        let name = self.unique_group_name()?;
        let groups = self.editable_groups(target)?;
        groups.push(Membership::new(name.clone()));
        groups.set_active(groups.len() - 1);
        log::info!("created light group '{}' on {}", name, target);
        Ok((name, self.on_group_list_edited()))
    }

    /// Add an existing group to `target` and select it.
    pub fn link_group(&mut self, target: EntityRef, name: &str) -> Result<SyncReport, EditError> {
        let Some(name) = self.name_set().get(name).cloned() else {
            return Err(EditError::UnknownGroup(name.to_string()));
        };
        let groups = self.editable_groups(target)?;
        if !groups.push(Membership::new(name.clone())) {
            return Err(EditError::AlreadyLinked {
                target,
                name: name.to_string(),
            });
        }
        groups.set_active(groups.len() - 1);
        log::info!("linked light group '{}' to {}", name, target);
        Ok(self.on_group_list_edited())
    }

    /// Remove the selected group from `target` only.
    pub fn unlink_group(&mut self, target: EntityRef) -> Result<SyncReport, EditError> {
        let groups = self.editable_groups(target)?;
        let removed = groups
            .remove(groups.active())
            .ok_or(EditError::NoActiveGroup(target))?;
        groups.step_back_active();
        log::info!("unlinked light group '{}' from {}", removed.name, target);
        Ok(self.on_group_list_edited())
    }

    /// Remove the group selected on `target` from every material and light that is not
    /// linked from a library.
    pub fn delete_group(&mut self, target: EntityRef) -> Result<SyncReport, EditError> {
        let groups = self.editable_groups(target)?;
        let name = groups
            .active_group()
            .ok_or(EditError::NoActiveGroup(target))?
            .name
            .clone();

        let mut touched = 0;
        for mat in self.materials.iter_mut().filter(|m| !m.is_linked()) {
            touched += mat.light_groups.remove_name(name.as_str()).is_some() as usize;
        }
        for light in self.lights.iter_mut().filter(|l| !l.is_linked()) {
            touched += light.light_groups.remove_name(name.as_str()).is_some() as usize;
        }
        self.editable_groups(target)?.step_back_active();

        log::info!("deleted light group '{}' from {} data-blocks", name, touched);
        Ok(self.on_group_list_edited())
    }

    /// Rename `from` to `to` on every material and light that is not linked from a library.
    pub fn rename_group(&mut self, from: &str, to: &str) -> Result<SyncReport, EditError> {
        let to = GroupName::new(to)?;
        let mut touched = 0;
        for mat in self.materials.iter_mut().filter(|m| !m.is_linked()) {
            touched += mat.light_groups.rename(from, &to) as usize;
        }
        for light in self.lights.iter_mut().filter(|l| !l.is_linked()) {
            touched += light.light_groups.rename(from, &to) as usize;
        }
        log::info!("renamed light group '{}' to '{}' on {} data-blocks", from, to, touched);
        Ok(self.on_group_list_edited())
    }

    pub fn set_active(&mut self, target: EntityRef, index: usize) -> Result<SyncReport, EditError> {
        self.editable_groups(target)?.set_active(index);
        Ok(self.on_group_list_edited())
    }

    pub fn set_use_default(
        &mut self,
        target: EntityRef,
        on: bool,
    ) -> Result<SyncReport, EditError> {
        self.editable_groups(target)?.use_default = on;
        Ok(self.on_group_list_edited())
    }

    pub fn set_ignore_default_shadow(
        &mut self,
        target: EntityRef,
        on: bool,
    ) -> Result<SyncReport, EditError> {
        self.editable_groups(target)?.ignore_default_shadow = on;
        Ok(self.on_group_list_edited())
    }

    /// Toggle shadow exclusion for one of `target`'s groups.
    pub fn set_ignore_shadow(
        &mut self,
        target: EntityRef,
        name: &str,
        on: bool,
    ) -> Result<SyncReport, EditError> {
        let groups = self.editable_groups(target)?;
        let index = groups
            .find(name)
            .ok_or_else(|| EditError::UnknownGroup(name.to_string()))?;
        if let Some(m) = groups.get_mut(index) {
            m.ignore_shadow = on;
        }
        Ok(self.on_group_list_edited())
    }

    /// Explicit resync requested from the UI.
    pub fn resync(&mut self) -> SyncReport {
        self.on_group_list_edited()
    }
}
