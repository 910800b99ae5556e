use criterion::{Criterion, black_box, criterion_group, criterion_main};

use lightmask_groups::{GroupName, Membership};
use lightmask_scene::{Light, Material, Scene};

fn build_scene(materials: usize, lights: usize, groups: usize) -> Scene {
    let names: Vec<GroupName> = (0..groups)
        .map(|i| GroupName::new(format!("Group.{:03}", i)).unwrap())
        .collect();
    let mut scene = Scene::new();
    for i in 0..materials {
        let mut m = Material::new(format!("Mat.{}", i));
        for k in 0..4 {
            let mut member = Membership::new(names[(i * 7 + k * 13) % groups].clone());
            member.ignore_shadow = k == 3;
            m.light_groups.push(member);
        }
        scene.materials.push(m);
    }
    for i in 0..lights {
        let mut l = Light::new(format!("Light.{}", i));
        l.light_groups.push(Membership::new(names[i % groups].clone()));
        scene.lights.push(l);
    }
    scene
}

fn bench_full_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_light_groups");
    let mut small = build_scene(64, 16, 12);
    group.bench_function("64_materials_12_groups", |b| {
        b.iter(|| black_box(small.sync_light_groups()))
    });
    let mut large = build_scene(4096, 512, 120);
    group.bench_function("4096_materials_120_groups", |b| {
        b.iter(|| black_box(large.sync_light_groups()))
    });
    group.finish();
}

criterion_group!(benches, bench_full_sync);
criterion_main!(benches);
