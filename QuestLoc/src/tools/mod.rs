//! Maintenance tools for translation resource packs

pub mod pack;
pub mod punct;

pub use pack::{PackConfig, PackReport, PackedArchive, pack_directories};
pub use punct::{PunctReport, normalize_punctuation, normalize_tree};
