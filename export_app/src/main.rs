//! Bound export command line tool
//!
//! Loads a scene description, builds the scene and writes one bound file
//! per exported composite root.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bound_export::foundation::logging;
use bound_export::prelude::*;
use clap::Parser;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene description (.ron or .toml)
    scene: PathBuf,

    /// Output file with --root, otherwise the output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Export only the composite with this name
    #[arg(long)]
    root: Option<String>,

    /// Tool configuration (.ron or .toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format, overrides the configuration
    #[arg(long, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Fail on missing triangle meshes and hierarchy cycles
    #[arg(long)]
    strict: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("no object named '{0}' in the scene")]
    UnknownRoot(String),

    #[error("'{0}' is not a bound composite")]
    NotComposite(String),

    #[error("the scene has no bound composite to export")]
    NothingToExport,

    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    value.parse().map_err(|e: bound_export::config::ConfigError| e.to_string())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(count) => {
            log::info!("Done, {count} bound file(s) written");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<usize, CliError> {
    let config = match &args.config {
        Some(path) => AppConfig::load_from_file(path).map_err(ExportError::from)?,
        None => AppConfig::default(),
    };
    config.validate().map_err(ExportError::from)?;
    logging::init_with_level(&config.log_level);

    let mut settings = config.settings.clone();
    if let Some(format) = args.format {
        settings = settings.with_format(format);
    }
    if args.strict {
        settings = settings.with_strict(true);
    }
    log::debug!("Export settings: {settings:?}");

    log::info!("Loading scene from {}", args.scene.display());
    let description = SceneDescription::load_from_file(&args.scene).map_err(ExportError::from)?;
    let scene = Scene::from_description(&description)?;
    log::info!("Scene has {} objects", scene.object_count());

    match &args.root {
        Some(name) => {
            let id = scene
                .find_object(name)
                .ok_or_else(|| CliError::UnknownRoot(name.clone()))?;
            if scene.object(id).map(|o| o.kind) != Some(ObjectKind::BoundComposite) {
                return Err(CliError::NotComposite(name.clone()));
            }
            export_ybn(&scene, id, &args.output, &settings)?;
            Ok(1)
        }
        None => export_all(&scene, &args.output, &settings),
    }
}

/// Export every root composite into `dir` as `<name>.<extension>`
fn export_all(scene: &Scene, dir: &Path, settings: &ExportSettings) -> Result<usize, CliError> {
    let roots: Vec<ObjectId> = scene
        .roots()
        .iter()
        .copied()
        .filter(|&id| scene.object(id).is_some_and(|o| o.kind == ObjectKind::BoundComposite))
        .collect();
    if roots.is_empty() {
        return Err(CliError::NothingToExport);
    }

    std::fs::create_dir_all(dir).map_err(|source| CliError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for &id in &roots {
        let name = scene.object_name(id);
        let path = dir.join(format!("{name}.{}", settings.format.extension()));
        export_ybn(scene, id, &path, settings)?;
    }

    Ok(roots.len())
}
