use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lightmask_scene::{EntityRef, Scene};

mod report;

#[derive(Parser, Debug)]
#[command(name = "lightmask", about = "Light group bit allocation and mask sync")]
struct Args {
    /// Scene file (TOML)
    scene: PathBuf,
    /// Save the scene file after an edit
    #[arg(long)]
    write: bool,
    /// Print the mask report as TOML
    #[arg(long)]
    toml: bool,
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the slot mapping and every entity's masks
    Show,
    /// Create a new uniquely named group on an entity (material:<name> or light:<name>)
    New { entity: String },
    /// Add an existing group to an entity
    Link { entity: String, group: String },
    /// Remove a group (default: the active one) from an entity
    Unlink { entity: String, group: Option<String> },
    /// Remove a group (default: the entity's active one) from every entity
    Delete { entity: String, group: Option<String> },
    /// Rename a group everywhere
    Rename { from: String, to: String },
    /// Force a full resync
    Resync,
    /// Run the render-start hook
    Render,
}

fn resolve_entity(scene: &Scene, arg: &str) -> Result<EntityRef, String> {
    let (kind, name) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected material:<name> or light:<name>, got '{}'", arg))?;
    let found = match kind {
        "material" | "mat" => scene.find_material(name).map(EntityRef::Material),
        "light" => scene.find_light(name).map(EntityRef::Light),
        _ => return Err(format!("unknown entity kind '{}'", kind)),
    };
    found.ok_or_else(|| format!("no {} named '{}'", kind, name))
}

fn select(scene: &mut Scene, target: EntityRef, group: Option<&str>) -> Result<(), Box<dyn Error>> {
    let Some(group) = group else {
        return Ok(());
    };
    let index = scene
        .groups(target)
        .and_then(|g| g.find(group))
        .ok_or_else(|| format!("{} has no light group '{}'", target, group))?;
    scene.set_active(target, index)?;
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut scene = Scene::from_path(&args.scene)?;
    log::info!(
        "loaded {} materials and {} lights from {}",
        scene.materials.len(),
        scene.lights.len(),
        args.scene.display()
    );

    let mut edited = true;
    match args.cmd.unwrap_or(Command::Show) {
        Command::Show => edited = false,
        Command::New { entity } => {
            let target = resolve_entity(&scene, &entity)?;
            let (name, _) = scene.new_group(target)?;
            println!("created '{}'", name);
        }
        Command::Link { entity, group } => {
            let target = resolve_entity(&scene, &entity)?;
            scene.link_group(target, &group)?;
        }
        Command::Unlink { entity, group } => {
            let target = resolve_entity(&scene, &entity)?;
            select(&mut scene, target, group.as_deref())?;
            scene.unlink_group(target)?;
        }
        Command::Delete { entity, group } => {
            let target = resolve_entity(&scene, &entity)?;
            select(&mut scene, target, group.as_deref())?;
            scene.delete_group(target)?;
        }
        Command::Rename { from, to } => {
            scene.rename_group(&from, &to)?;
        }
        Command::Resync => {
            scene.resync();
            edited = false;
        }
        Command::Render => {
            scene.on_render_start();
            edited = false;
        }
    }

    if args.toml {
        print!("{}", report::MaskReport::new(&scene).to_toml()?);
    } else {
        report::print_text(&scene);
    }

    if edited && args.write {
        scene.save(&args.scene)?;
        log::info!("saved {}", args.scene.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
