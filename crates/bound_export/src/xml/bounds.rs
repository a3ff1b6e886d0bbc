//! Bound files as CodeWalker-style XML

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::debug;

use super::writer::XmlWriter;
use crate::bounds::records::{
    BoundCommon, BoundFile, BoundGeometry, BoundItem, MaterialItem, Polygon,
};
use crate::bounds::writer::BoundWriter;
use crate::error::Result;

/// Writes `<BoundsFile>` documents
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlBoundWriter;

impl BoundWriter for XmlBoundWriter {
    fn write(&self, file: &BoundFile, out: &mut dyn io::Write) -> Result<()> {
        let mut xml = XmlWriter::new(out);
        xml.declaration()?;
        write_file(&mut xml, file)?;
        xml.finish()?;
        Ok(())
    }
}

impl BoundFile {
    /// Write this file as XML to `path`
    pub fn write_xml(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        XmlBoundWriter.write(self, &mut out)?;
        out.flush()?;
        debug!("Wrote bound XML to {}", path.display());
        Ok(())
    }

    /// Render this file as an XML string
    pub fn to_xml_string(&self) -> Result<String> {
        let mut out = Vec::new();
        XmlBoundWriter.write(self, &mut out)?;
        // Every byte written comes from UTF-8 strings
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

fn write_file<W: Write>(xml: &mut XmlWriter<W>, file: &BoundFile) -> io::Result<()> {
    xml.open("BoundsFile")?;
    xml.open_with("Bounds", &[("type", "Composite".to_string())])?;

    write_common(xml, &file.composite.common)?;
    if file.composite.children.is_empty() {
        xml.empty("Children", &[])?;
    } else {
        xml.open("Children")?;
        for child in &file.composite.children {
            write_item(xml, child)?;
        }
        xml.close()?;
    }

    xml.close()?;
    xml.close()
}

fn write_common<W: Write>(xml: &mut XmlWriter<W>, common: &BoundCommon) -> io::Result<()> {
    xml.vector("BoxMin", &common.box_min)?;
    xml.vector("BoxMax", &common.box_max)?;
    xml.vector("BoxCenter", &common.box_center)?;
    xml.vector("SphereCenter", &common.sphere_center)?;
    xml.value("SphereRadius", common.sphere_radius)?;
    xml.value("Margin", common.margin)?;
    xml.value("Volume", common.volume)?;
    xml.vector("Inertia", &common.inertia)?;
    xml.value("MaterialIndex", common.material_index)?;
    xml.value("ProceduralId", common.procedural_id)?;
    xml.value("RoomId", common.room_id)?;
    xml.value("PedDensity", common.ped_density)?;
    xml.value("PolyFlags", common.poly_flags)
}

fn write_item<W: Write>(xml: &mut XmlWriter<W>, item: &BoundItem) -> io::Result<()> {
    xml.open_with("Item", &[("type", item.kind.type_name().to_string())])?;

    let common = &item.common;
    write_common(xml, common)?;
    xml.vector("CompositePosition", &common.composite_position)?;
    xml.quaternion("CompositeRotation", &common.composite_rotation)?;
    xml.vector("CompositeScale", &common.composite_scale)?;
    xml.text("CompositeFlags1", &common.composite_flags1.join(", "))?;
    xml.text("CompositeFlags2", &common.composite_flags2.join(", "))?;

    if let Some(geometry) = item.kind.geometry() {
        write_geometry(xml, geometry)?;
    }

    xml.close()
}

fn write_geometry<W: Write>(xml: &mut XmlWriter<W>, geometry: &BoundGeometry) -> io::Result<()> {
    xml.vector("GeometryCenter", &geometry.geometry_center)?;

    if geometry.materials.is_empty() {
        xml.empty("Materials", &[])?;
    } else {
        xml.open("Materials")?;
        for material in &geometry.materials {
            write_material(xml, material)?;
        }
        xml.close()?;
    }

    xml.lines(
        "Vertices",
        geometry
            .vertices
            .iter()
            .map(|v| format!("{}, {}, {}", v.x, v.y, v.z)),
    )?;
    xml.lines(
        "VertexColours",
        geometry.vertex_colors.iter().map(|&c| {
            let [r, g, b, a] = c.map(color_byte);
            format!("{r}, {g}, {b}, {a}")
        }),
    )?;

    if geometry.polygons.is_empty() {
        xml.empty("Polygons", &[])
    } else {
        xml.open("Polygons")?;
        for polygon in &geometry.polygons {
            write_polygon(xml, polygon)?;
        }
        xml.close()
    }
}

fn write_material<W: Write>(xml: &mut XmlWriter<W>, material: &MaterialItem) -> io::Result<()> {
    xml.open("Item")?;
    xml.value("Type", material.material_type)?;
    xml.value("ProceduralId", material.procedural_id)?;
    xml.value("RoomId", material.room_id)?;
    xml.value("PedDensity", material.ped_density)?;
    xml.text("Flags", &material.flags.join(", "))?;
    xml.value("MaterialColourIndex", material.material_color_index)?;
    xml.close()
}

fn write_polygon<W: Write>(xml: &mut XmlWriter<W>, polygon: &Polygon) -> io::Result<()> {
    let m = ("m", polygon.material_index().to_string());
    let attributes = match *polygon {
        Polygon::Triangle { v1, v2, v3, .. } => vec![
            m,
            ("v1", v1.to_string()),
            ("v2", v2.to_string()),
            ("v3", v3.to_string()),
        ],
        Polygon::Box { v1, v2, v3, v4, .. } => vec![
            m,
            ("v1", v1.to_string()),
            ("v2", v2.to_string()),
            ("v3", v3.to_string()),
            ("v4", v4.to_string()),
        ],
        Polygon::Sphere { v, radius, .. } => {
            vec![m, ("v", v.to_string()), ("radius", radius.to_string())]
        }
        Polygon::Cylinder { v1, v2, radius, .. } | Polygon::Capsule { v1, v2, radius, .. } => vec![
            m,
            ("v1", v1.to_string()),
            ("v2", v2.to_string()),
            ("radius", radius.to_string()),
        ],
    };
    xml.empty(polygon.type_name(), &attributes)
}

/// Colour channel in 0..=1 to a byte
// Clamped to 0..=255 before the cast
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn color_byte(channel: f32) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::records::{BoundKind, BoundsComposite};
    use crate::foundation::math::Vec3;

    fn geometry_file() -> BoundFile {
        let geometry = BoundGeometry {
            geometry_center: Vec3::new(0.0, 0.0, 1.0),
            vertices: vec![Vec3::zeros(), Vec3::x(), Vec3::new(0.0, 1.5, 0.0)],
            vertex_colors: vec![[1.0, 0.5, 0.0, 1.0]],
            materials: vec![MaterialItem {
                material_type: 3,
                flags: vec!["FLAG_STAIRS".into(), "FLAG_NO_DECAL".into()],
                ..Default::default()
            }],
            polygons: vec![
                Polygon::Triangle {
                    material_index: 0,
                    v1: 0,
                    v2: 1,
                    v3: 2,
                },
                Polygon::Sphere {
                    material_index: 0,
                    v: 2,
                    radius: 0.25,
                },
            ],
        };

        let mut item = BoundItem {
            common: BoundCommon::default(),
            kind: BoundKind::GeometryBvh(geometry),
        };
        item.common.composite_flags1 = vec!["MAP_WEAPON".into(), "MAP_DYNAMIC".into()];

        BoundFile {
            composite: BoundsComposite {
                common: BoundCommon::default(),
                children: vec![item],
            },
        }
    }

    #[test]
    fn test_document_shape() {
        let text = geometry_file().to_xml_string().unwrap();

        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<BoundsFile>\n"));
        assert!(text.contains("  <Bounds type=\"Composite\">\n"));
        assert!(text.contains("      <Item type=\"GeometryBVH\">\n"));
        assert!(text.contains("<CompositeFlags1>MAP_WEAPON, MAP_DYNAMIC</CompositeFlags1>"));
        assert!(text.contains("<CompositeFlags2 />"));
        assert!(text.contains("<GeometryCenter x=\"0\" y=\"0\" z=\"1\" />"));
        assert!(text.contains("<Flags>FLAG_STAIRS, FLAG_NO_DECAL</Flags>"));
        assert!(text.trim_end().ends_with("</BoundsFile>"));
    }

    #[test]
    fn test_geometry_payload() {
        let text = geometry_file().to_xml_string().unwrap();

        assert!(text.contains("0, 1.5, 0\n"));
        assert!(text.contains("255, 128, 0, 255\n"));
        assert!(text.contains("<Triangle m=\"0\" v1=\"0\" v2=\"1\" v3=\"2\" />"));
        assert!(text.contains("<Sphere m=\"0\" v=\"2\" radius=\"0.25\" />"));
    }

    #[test]
    fn test_empty_composite() {
        let text = BoundFile::default().to_xml_string().unwrap();

        assert!(text.contains("<Children />"));
        assert!(!text.contains("<Item"));
    }

    #[test]
    fn test_write_xml_to_path() {
        let path = std::env::temp_dir().join(format!("bound_xml_{}.ybn.xml", std::process::id()));

        geometry_file().write_xml(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(text.contains("<Polygons>"));
    }

    #[test]
    fn test_color_byte() {
        assert_eq!(color_byte(0.0), 0);
        assert_eq!(color_byte(1.0), 255);
        assert_eq!(color_byte(1.5), 255);
        assert_eq!(color_byte(-0.2), 0);
    }
}
