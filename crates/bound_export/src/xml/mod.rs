//! XML output
//!
//! - [`writer`] - Generic element writer
//! - [`bounds`] - Bound file documents

pub mod bounds;
pub mod writer;

pub use bounds::XmlBoundWriter;
pub use writer::{escape, XmlWriter};
