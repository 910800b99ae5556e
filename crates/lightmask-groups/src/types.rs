use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Non-empty light group identifier.
///
/// Names form one flat namespace across every material and light; ordering is plain
/// string ordering, which is what bit allocation iterates in.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupName(String);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidGroupName;

impl fmt::Display for InvalidGroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "light group name must not be empty")
    }
}

impl std::error::Error for InvalidGroupName {}

impl GroupName {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidGroupName> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidGroupName);
        }
        Ok(Self(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GroupName {
    type Error = InvalidGroupName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for GroupName {
    type Error = InvalidGroupName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GroupName> for String {
    fn from(name: GroupName) -> Self {
        name.0
    }
}

impl Borrow<str> for GroupName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for GroupName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entity's membership in a named group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub name: GroupName,
    /// Exclude this group from the shadow mask (materials only).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignore_shadow: bool,
}

impl Membership {
    pub fn new(name: GroupName) -> Self {
        Self {
            name,
            ignore_shadow: false,
        }
    }
}

/// Ordered, name-unique membership list owned by a material or light.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupList {
    groups: Vec<Membership>,
    /// Opt into the builtin default group.
    pub use_default: bool,
    /// Exclude the default group from the shadow mask (materials only).
    pub ignore_default_shadow: bool,
    // Editing selection; kept in range by every removal.
    active: usize,
}

impl Default for GroupList {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            use_default: true,
            ignore_default_shadow: false,
            active: 0,
        }
    }
}

impl GroupList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from memberships, keeping the first occurrence of each name.
    pub fn from_memberships(memberships: impl IntoIterator<Item = Membership>) -> Self {
        let mut list = Self::new();
        for m in memberships {
            if !list.push(m.clone()) {
                log::debug!("dropping duplicate light group '{}'", m.name);
            }
        }
        list
    }

    #[inline]
    pub fn groups(&self) -> &[Membership] {
        &self.groups
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &GroupName> + '_ {
        self.groups.iter().map(|m| &m.name)
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|m| m.name.as_str() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&Membership> {
        self.groups.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Membership> {
        self.groups.get_mut(index)
    }

    /// Append a membership. Returns false and leaves the list untouched if the name is
    /// already present.
    pub fn push(&mut self, membership: Membership) -> bool {
        if self.contains(membership.name.as_str()) {
            return false;
        }
        self.groups.push(membership);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<Membership> {
        if index >= self.groups.len() {
            return None;
        }
        let removed = self.groups.remove(index);
        self.clamp_active();
        Some(removed)
    }

    pub fn remove_name(&mut self, name: &str) -> Option<Membership> {
        let index = self.find(name)?;
        self.remove(index)
    }

    /// Rename `from` to `to` in place. When `to` is already listed the `from` entry is
    /// removed instead, so names stay unique. Returns true if the list changed.
    pub fn rename(&mut self, from: &str, to: &GroupName) -> bool {
        if from == to.as_str() {
            return false;
        }
        let Some(index) = self.find(from) else {
            return false;
        };
        if self.contains(to.as_str()) {
            self.remove(index);
        } else {
            self.groups[index].name = to.clone();
        }
        true
    }

    #[inline]
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_group(&self) -> Option<&Membership> {
        self.groups.get(self.active)
    }

    /// Select `index`, clamped into the list.
    pub fn set_active(&mut self, index: usize) {
        self.active = index;
        self.clamp_active();
    }

    /// Move the selection back one slot, as after removing the selected entry.
    pub fn step_back_active(&mut self) {
        self.active = self.active.saturating_sub(1);
        self.clamp_active();
    }

    fn clamp_active(&mut self) {
        self.active = self.active.min(self.groups.len().saturating_sub(1));
    }
}
