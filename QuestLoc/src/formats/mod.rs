//! File format handlers for FTB Quests language data
//!
//! - [`snbt`]: the stringified-NBT text format used by chapters and lang files
//! - [`lang`]: the key/value language model and its JSON artifacts

pub mod snbt;
pub mod lang;

// Re-export main document types
pub use snbt::{SnbtValue, parse_snbt, read_snbt, to_snbt_string, write_snbt};
pub use lang::{FlatMap, LangMap, LangValue, read_lang_json, write_lang_json};
