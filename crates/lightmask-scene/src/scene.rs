use std::collections::BTreeSet;
use std::error::Error;
use std::fs;
use std::path::Path;

use lightmask_groups::{
    BitMapping, GroupList, GroupName, MAX_BIT, allocate, collect_names, sync_masks,
};

use crate::config::SceneConfig;
use crate::entity::{EntityRef, Light, Material};
use crate::trigger::{Changed, EvalMode, Trigger};

/// Outcome of one full resync pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Groups that received a slot.
    pub groups: usize,
    /// Groups left without a slot because the capacity was reached.
    pub dropped: usize,
    pub overflow: bool,
    /// Materials plus lights whose masks were rewritten.
    pub entities: usize,
    pub revision: u64,
}

/// Host data store owning every material and light.
///
/// Masks are rewritten only by [`Scene::sync_light_groups`]; `revision` advances once per
/// completed pass so a reader can tell the masks it holds are current.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub materials: Vec<Material>,
    pub lights: Vec<Light>,
    revision: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from a parsed scene file and run the load trigger.
    pub fn from_config(cfg: SceneConfig) -> Self {
        let mut scene = Scene {
            materials: cfg.materials.into_iter().map(Material::from).collect(),
            lights: cfg.lights.into_iter().map(Light::from).collect(),
            revision: 0,
        };
        scene.on_load();
        scene
    }

    pub fn to_config(&self) -> SceneConfig {
        SceneConfig {
            materials: self.materials.iter().map(Into::into).collect(),
            lights: self.lights.iter().map(Into::into).collect(),
        }
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: SceneConfig = toml::from_str(toml_str)?;
        Ok(Self::from_config(cfg))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn to_toml_string(&self) -> Result<String, Box<dyn Error>> {
        Ok(toml::to_string_pretty(&self.to_config())?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn find_material(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    pub fn find_light(&self, name: &str) -> Option<usize> {
        self.lights.iter().position(|l| l.name == name)
    }

    pub fn groups(&self, target: EntityRef) -> Option<&GroupList> {
        match target {
            EntityRef::Material(i) => self.materials.get(i).map(|m| &m.light_groups),
            EntityRef::Light(i) => self.lights.get(i).map(|l| &l.light_groups),
        }
    }

    fn all_lists(&self) -> impl Iterator<Item = &GroupList> + '_ {
        self.materials
            .iter()
            .map(|m| &m.light_groups)
            .chain(self.lights.iter().map(|l| &l.light_groups))
    }

    /// Every group name referenced by any material or light.
    pub fn name_set(&self) -> BTreeSet<GroupName> {
        collect_names(self.all_lists())
    }

    /// The mapping the next pass would use. Logs nothing, so reports may call it freely.
    pub fn bit_mapping(&self) -> BitMapping {
        allocate(&self.name_set())
    }

    /// Rebuild the slot mapping from the current names and rewrite every mask.
    pub fn sync_light_groups(&mut self) -> SyncReport {
        let mapping = self.bit_mapping();
        if mapping.overflow() {
            warn_overflow(&mapping);
        }
        let mut entities = sync_masks(self.materials.iter_mut(), &mapping);
        entities += sync_masks(self.lights.iter_mut(), &mapping);
        self.revision = self.revision.wrapping_add(1);

        let report = SyncReport {
            groups: mapping.len(),
            dropped: mapping.dropped().len(),
            overflow: mapping.overflow(),
            entities,
            revision: self.revision,
        };
        log::debug!(
            "light groups synced: {} groups, {} entities (rev {})",
            report.groups,
            report.entities,
            report.revision
        );
        report
    }

    /// Run a pass if `trigger` calls for one.
    pub fn handle(&mut self, trigger: Trigger) -> Option<SyncReport> {
        if !trigger.needs_sync() {
            log::trace!("light group trigger ignored: {:?}", trigger);
            return None;
        }
        Some(self.sync_light_groups())
    }

    pub fn on_load(&mut self) -> SyncReport {
        self.sync_light_groups()
    }

    pub fn on_render_start(&mut self) -> SyncReport {
        self.sync_light_groups()
    }

    pub fn on_group_list_edited(&mut self) -> SyncReport {
        self.sync_light_groups()
    }

    pub fn on_relevant_mutation(
        &mut self,
        mode: EvalMode,
        changed: Vec<Changed>,
    ) -> Option<SyncReport> {
        self.handle(Trigger::Mutation { mode, changed })
    }
}

fn warn_overflow(mapping: &BitMapping) {
    let dropped = mapping.dropped().len();
    if dropped == 0 {
        log::warn!(
            "Max number of light groups ({}) reached. No further light groups can be added.",
            MAX_BIT
        );
    } else {
        log::warn!(
            "Max number of light groups ({}) reached. {} light group(s) will not be included.",
            MAX_BIT,
            dropped
        );
    }
}
