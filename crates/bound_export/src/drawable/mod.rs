//! Drawable dictionary export
//!
//! - [`jenkins`] - Engine name hash
//! - [`dictionary`] - Dictionary assembly and output

pub mod dictionary;
pub mod jenkins;

pub use dictionary::{
    create_ydd, dictionary_hash, export_ydd, find_ydd_armature, DrawableDictionary,
    DrawableExporter, DrawableRecord,
};
pub use jenkins::joaat;
