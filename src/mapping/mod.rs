//! Field metadata indexing and survey-section key mapping.
//!
//! Everything here is rebuilt from host metadata on each lifecycle entry
//! point; nothing persists across calls. The indexers flatten host records,
//! the language resolver climbs parent chains from fields to their groups,
//! and the section mapper rewrites authored section structures onto the
//! schema's storage keys.

pub mod fields;
pub mod groups;
pub mod language;
pub mod section;

pub use fields::{FieldIndex, FieldRecord, index_fields};
pub use groups::{GroupIndex, GroupRecord, build_group_index};
pub use language::{HierarchyError, LanguageResolution, resolve_field_language, resolve_languages};
pub use section::{NameToKeyMap, map_section, name_to_key_map};
