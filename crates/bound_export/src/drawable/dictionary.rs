//! Drawable dictionaries
//!
//! A dictionary object groups drawables under one file. Building each
//! drawable is delegated to a [`DrawableExporter`]; this module picks the
//! skeleton each drawable is bound to, orders the drawables by name hash and
//! writes the `<DrawableDictionary>` document.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use super::jenkins::joaat;
use crate::core::ExportSettings;
use crate::error::{ExportError, Result};
use crate::scene::{ObjectId, ObjectKind, Scene};
use crate::xml::XmlWriter;

/// A built drawable that can be placed in a dictionary
pub trait DrawableRecord {
    /// Drawable name, possibly carrying a `.NNN` duplicate suffix
    fn name(&self) -> &str;

    /// Write the drawable's content inside its dictionary `<Item>`
    fn write_xml<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()>;
}

/// Builds single drawables for the dictionary export
pub trait DrawableExporter {
    /// Record produced per drawable object
    type Drawable: DrawableRecord;

    /// Build the drawable for `id`, skinned to `armature` when one is given
    fn create_drawable(
        &self,
        scene: &Scene,
        id: ObjectId,
        armature: Option<ObjectId>,
        auto_calculate_bone_tag: bool,
    ) -> Result<Self::Drawable>;

    /// Write textures embedded in the dictionary next to `path`
    fn write_embedded_textures(&self, _scene: &Scene, _id: ObjectId, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Ordered drawables of one dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableDictionary<D> {
    drawables: Vec<D>,
}

impl<D> Default for DrawableDictionary<D> {
    fn default() -> Self {
        Self {
            drawables: Vec::new(),
        }
    }
}

impl<D: DrawableRecord> DrawableDictionary<D> {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a drawable
    pub fn push(&mut self, drawable: D) {
        self.drawables.push(drawable);
    }

    /// Stable sort by [`dictionary_hash`] of each name
    pub fn sort_by_hash(&mut self) {
        self.drawables.sort_by_cached_key(|d| dictionary_hash(d.name()));
    }

    /// Drawables in dictionary order
    pub fn drawables(&self) -> &[D] {
        &self.drawables
    }

    /// Number of drawables
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Whether the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Write the `<DrawableDictionary>` document
    pub fn write(&self, out: &mut dyn Write) -> Result<()> {
        let mut xml = XmlWriter::new(out);
        xml.declaration()?;
        if self.drawables.is_empty() {
            xml.empty("DrawableDictionary", &[])?;
        } else {
            xml.open("DrawableDictionary")?;
            for drawable in &self.drawables {
                xml.open("Item")?;
                drawable.write_xml(&mut xml)?;
                xml.close()?;
            }
            xml.close()?;
        }
        xml.finish()?;
        Ok(())
    }

    /// Write the document to `path`
    pub fn write_xml(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write(&mut out)?;
        out.flush()?;
        Ok(())
    }
}

/// Sort key of a drawable: hash of its name up to the first `.`
pub fn dictionary_hash(name: &str) -> u32 {
    let stem = name.split_once('.').map_or(name, |(stem, _)| stem);
    joaat(stem)
}

/// First direct child of `id` that is an armature
pub fn find_ydd_armature(scene: &Scene, id: ObjectId) -> Option<ObjectId> {
    scene
        .children(id)
        .iter()
        .copied()
        .find(|&child| scene.object(child).is_some_and(|o| o.is_armature))
}

/// Build the dictionary rooted at `id`
///
/// The dictionary's skeleton is `id` itself when it is an armature, else its
/// first armature child. Every direct `Drawable` child is built with that
/// skeleton, except drawables that are armatures themselves, which are built
/// without one.
pub fn create_ydd<E: DrawableExporter>(
    scene: &Scene,
    id: ObjectId,
    exporter: &E,
    auto_calculate_bone_tag: bool,
) -> Result<DrawableDictionary<E::Drawable>> {
    let dictionary = scene.object(id).ok_or(ExportError::UnknownObject)?;
    let armature = if dictionary.is_armature {
        Some(id)
    } else {
        find_ydd_armature(scene, id)
    };

    let mut ydd = DrawableDictionary::new();
    for &child_id in scene.children(id) {
        let Some(child) = scene.object(child_id) else {
            continue;
        };
        if child.kind != ObjectKind::Drawable {
            continue;
        }

        let child_armature = if child.is_armature { None } else { armature };
        debug!("Building drawable '{}' of '{}'", child.name, dictionary.name);
        ydd.push(exporter.create_drawable(scene, child_id, child_armature, auto_calculate_bone_tag)?);
    }

    ydd.sort_by_hash();
    Ok(ydd)
}

/// Build the dictionary rooted at `id` and write it to `path`
///
/// Embedded textures are written before the document.
pub fn export_ydd<E: DrawableExporter>(
    scene: &Scene,
    id: ObjectId,
    path: impl AsRef<Path>,
    exporter: &E,
    settings: &ExportSettings,
) -> Result<()> {
    let path = path.as_ref();
    info!("Exporting drawable dictionary '{}' to {}", scene.object_name(id), path.display());

    let ydd = create_ydd(scene, id, exporter, settings.auto_calculate_bone_tag)?;
    exporter.write_embedded_textures(scene, id, path)?;
    ydd.write_xml(path)?;

    info!("Exported {} drawables", ydd.len());
    Ok(())
}
