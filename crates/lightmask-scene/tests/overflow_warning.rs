use std::sync::Mutex;

use lightmask_groups::{GroupName, Membership};
use lightmask_scene::{Material, Scene};
use log::{Level, LevelFilter, Log, Metadata, Record};

// Sole test in this binary: the logger is process-global.
struct WarnCollector {
    warnings: Mutex<Vec<String>>,
}

impl Log for WarnCollector {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            self.warnings.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static COLLECTOR: WarnCollector = WarnCollector {
    warnings: Mutex::new(Vec::new()),
};

fn take_warnings() -> Vec<String> {
    std::mem::take(&mut *COLLECTOR.warnings.lock().unwrap())
}

fn crowded_scene(groups: usize) -> Scene {
    let mut m = Material::new("Crowd");
    for i in 0..groups {
        m.light_groups
            .push(Membership::new(GroupName::new(format!("g{:03}", i)).unwrap()));
    }
    let mut scene = Scene::new();
    scene.materials.push(m);
    scene
}

#[test]
fn overflow_is_reported_once_per_pass() {
    log::set_logger(&COLLECTOR).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let mut scene = crowded_scene(130);
    scene.on_load();
    // Reading the mapping for a report must not repeat the diagnostic.
    let mapping = scene.bit_mapping();
    assert_eq!(mapping.dropped().len(), 3);
    let warnings = take_warnings();
    assert_eq!(warnings.len() as u64, scene.revision());
    assert!(warnings[0].contains("3 light group(s) will not be included"));

    scene.on_render_start();
    scene.on_group_list_edited();
    let _ = scene.bit_mapping();
    assert_eq!(take_warnings().len(), 2);

    let mut full = crowded_scene(127);
    full.sync_light_groups();
    let warnings = take_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(!warnings[0].contains("0 light group(s)"));
    assert!(warnings[0].contains("No further light groups"));

    let mut roomy = crowded_scene(12);
    roomy.sync_light_groups();
    assert!(take_warnings().is_empty());
}
