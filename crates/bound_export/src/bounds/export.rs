//! Export entry points

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use super::bound_builder::build_composite;
use super::records::BoundFile;
use super::writer::writer_for;
use super::BuildContext;
use crate::core::ExportSettings;
use crate::error::Result;
use crate::scene::{ObjectId, Scene};

/// Build the bound file rooted at a composite object
pub fn bounds_from_object(
    scene: &Scene,
    id: ObjectId,
    settings: &ExportSettings,
) -> Result<BoundFile> {
    let ctx = BuildContext::new(scene, settings);
    Ok(BoundFile {
        composite: build_composite(&ctx, id)?,
    })
}

/// Build the bound file rooted at `id` and write it to `path`
///
/// The output format follows `settings.format`. Nothing is written when the
/// build fails.
pub fn export_ybn(
    scene: &Scene,
    id: ObjectId,
    path: impl AsRef<Path>,
    settings: &ExportSettings,
) -> Result<()> {
    let path = path.as_ref();
    info!("Exporting bounds of '{}' to {}", scene.object_name(id), path.display());

    let file = bounds_from_object(scene, id, settings)?;

    let mut out = BufWriter::new(File::create(path)?);
    writer_for(settings.format).write(&file, &mut out)?;
    out.flush()?;

    info!(
        "Exported {} child bounds of '{}'",
        file.composite.children.len(),
        scene.object_name(id)
    );
    Ok(())
}
