//! TOML scene file: materials and lights with their group memberships.
//!
//! Masks are derived state and are never written.

use serde::{Deserialize, Serialize};

use lightmask_groups::{GroupList, Membership};

use crate::entity::{Light, Material};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub materials: Vec<MaterialDef>,
    #[serde(default)]
    pub lights: Vec<LightDef>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MaterialDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    #[serde(default = "default_use_default")]
    pub use_default: bool,
    #[serde(default)]
    pub ignore_default_shadow: bool,
    #[serde(default)]
    pub groups: Vec<Membership>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LightDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    #[serde(default = "default_use_default")]
    pub use_default: bool,
    #[serde(default)]
    pub groups: Vec<Membership>,
}

fn default_use_default() -> bool {
    true
}

impl From<MaterialDef> for Material {
    fn from(def: MaterialDef) -> Self {
        let mut light_groups = GroupList::from_memberships(def.groups);
        light_groups.use_default = def.use_default;
        light_groups.ignore_default_shadow = def.ignore_default_shadow;
        Material {
            name: def.name,
            library: def.library,
            light_groups,
            ..Default::default()
        }
    }
}

impl From<LightDef> for Light {
    fn from(def: LightDef) -> Self {
        let mut light_groups = GroupList::from_memberships(def.groups);
        light_groups.use_default = def.use_default;
        Light {
            name: def.name,
            library: def.library,
            light_groups,
            ..Default::default()
        }
    }
}

impl From<&Material> for MaterialDef {
    fn from(mat: &Material) -> Self {
        MaterialDef {
            name: mat.name.clone(),
            library: mat.library.clone(),
            use_default: mat.light_groups.use_default,
            ignore_default_shadow: mat.light_groups.ignore_default_shadow,
            groups: mat.light_groups.groups().to_vec(),
        }
    }
}

impl From<&Light> for LightDef {
    fn from(light: &Light) -> Self {
        LightDef {
            name: light.name.clone(),
            library: light.library.clone(),
            use_default: light.light_groups.use_default,
            groups: light.light_groups.groups().to_vec(),
        }
    }
}
