//! Output sinks for a finished bound file

use std::io;

use ron::ser::PrettyConfig;

use super::records::BoundFile;
use crate::core::OutputFormat;
use crate::error::{ExportError, Result};
use crate::xml::XmlBoundWriter;

/// Serializes a bound file to a byte sink
pub trait BoundWriter {
    /// Write the whole file
    fn write(&self, file: &BoundFile, out: &mut dyn io::Write) -> Result<()>;
}

/// Pretty-printed RON dump of the record tree
#[derive(Debug, Clone, Copy, Default)]
pub struct RonBoundWriter;

impl BoundWriter for RonBoundWriter {
    fn write(&self, file: &BoundFile, out: &mut dyn io::Write) -> Result<()> {
        let text = ron::ser::to_string_pretty(file, PrettyConfig::default())
            .map_err(|e| ExportError::Serialize(e.to_string()))?;
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

/// Writer for an output format
pub fn writer_for(format: OutputFormat) -> Box<dyn BoundWriter> {
    match format {
        OutputFormat::Xml => Box::new(XmlBoundWriter),
        OutputFormat::Ron => Box::new(RonBoundWriter),
    }
}
