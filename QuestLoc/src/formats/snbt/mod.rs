//! SNBT (stringified NBT) format module
//!
//! FTB Quests stores chapters, quests and language files as SNBT text:
//!
//! ```text
//! {
//! 	chapter.0F8A2C1B3D4E5F60.title: "Getting Started"
//! 	quest.1A2B3C4D5E6F7081.quest_desc: [
//! 		"First line"
//! 		"Second line"
//! 	]
//! }
//! ```
//!
//! String contents are kept raw: escape sequences such as `\"` are preserved
//! exactly as they appear in the file. Unescaping is left to the caller.

mod document;
mod reader;
mod writer;

pub use document::SnbtValue;
pub use reader::{parse_snbt, read_snbt};
pub use writer::{to_snbt_string, write_snbt};
