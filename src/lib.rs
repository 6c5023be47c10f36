//! Loads multilingual survey definitions into a host CMS.
//!
//! Survey content is authored once per language as a nested section structure
//! keyed by human-readable field names. The host's form builder defines the
//! actual schema: fields grouped into field groups, each group assigned a
//! language by the host's translation layer. This crate resolves which
//! language every field belongs to, rewrites section structures onto the
//! schema's storage keys, and drives entry creation, translation linking, and
//! teardown through the [`CmsStore`] collaborator.

pub mod cms;
pub mod mapping;
pub mod survey;

pub use cms::{
    CmsStore, EntryStatus, GroupLocale, MetadataRecord, NewEntry, RecordId, RecordType,
    TranslationGroupId,
};
pub use mapping::{FieldIndex, GroupIndex, HierarchyError, LanguageResolution, NameToKeyMap};
pub use survey::{SurveyDefinition, SurveyLoader, SurveyPackage};
