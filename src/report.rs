use std::error::Error;

use lightmask_groups::GroupBit;
use lightmask_scene::Scene;
use serde::Serialize;

#[derive(Serialize)]
pub struct MaskReport {
    revision: u64,
    overflow: bool,
    dropped: Vec<String>,
    slots: Vec<Slot>,
    materials: Vec<EntityMasks>,
    lights: Vec<EntityMasks>,
}

#[derive(Serialize)]
struct Slot {
    name: String,
    bit: GroupBit,
}

#[derive(Serialize)]
struct EntityMasks {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    library: Option<String>,
    groups: Vec<String>,
    bits: [u32; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    shadow_bits: Option<[u32; 4]>,
}

impl MaskReport {
    pub fn new(scene: &Scene) -> Self {
        let mapping = scene.bit_mapping();
        Self {
            revision: scene.revision(),
            overflow: mapping.overflow(),
            dropped: mapping.dropped().iter().map(|n| n.to_string()).collect(),
            slots: mapping
                .entries()
                .into_iter()
                .map(|(name, bit)| Slot {
                    name: name.to_string(),
                    bit,
                })
                .collect(),
            materials: scene
                .materials
                .iter()
                .map(|m| EntityMasks {
                    name: m.name.clone(),
                    library: m.library.clone(),
                    groups: m.light_groups.names().map(|n| n.to_string()).collect(),
                    bits: m.light_group_bits.words(),
                    shadow_bits: Some(m.light_group_shadow_bits.words()),
                })
                .collect(),
            lights: scene
                .lights
                .iter()
                .map(|l| EntityMasks {
                    name: l.name.clone(),
                    library: l.library.clone(),
                    groups: l.light_groups.names().map(|n| n.to_string()).collect(),
                    bits: l.light_group_bits.words(),
                    shadow_bits: None,
                })
                .collect(),
        }
    }

    pub fn to_toml(&self) -> Result<String, Box<dyn Error>> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn print_text(scene: &Scene) {
    let mapping = scene.bit_mapping();
    println!("rev {}  {} light groups", scene.revision(), mapping.len());
    for (name, bit) in mapping.entries() {
        println!("  {:>3}  {}", bit, name);
    }
    if mapping.overflow() {
        println!("  ({} groups without a slot)", mapping.dropped().len());
    }
    for m in &scene.materials {
        println!("material {}", m.name);
        println!("  bits   {}", m.light_group_bits);
        println!("  shadow {}", m.light_group_shadow_bits);
    }
    for l in &scene.lights {
        println!("light {}", l.name);
        println!("  bits   {}", l.light_group_bits);
    }
}
