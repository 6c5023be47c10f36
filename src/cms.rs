//! Host CMS collaborator contract.
//!
//! The loader never touches host storage directly; metadata listings, entry
//! creation, translation linking, and deletion all go through [`CmsStore`] so
//! hosts (and tests) supply their own implementation. No ambient globals.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Identifier of a host metadata record (field, field group, or content entry).
pub type RecordId = u64;

/// Identifier linking one logical content item across its language variants.
pub type TranslationGroupId = u64;

/// The metadata record types the loader lists from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// A single form-input definition in the host's form builder.
    Field,
    /// A collection of fields, the unit a language is attached to.
    FieldGroup,
}

/// One metadata record as the host exposes it.
#[derive(Debug, Clone)]
pub struct MetadataRecord {
    pub id: RecordId,
    pub parent_id: RecordId,
    /// Storage slug, used as the schema field key.
    pub slug: String,
    /// Human-readable short description, used as the field display name.
    pub short_description: String,
    /// Declared form-builder type ("text", "repeater", "tab", ...). Groups have none.
    pub kind: Option<String>,
}

/// Locale information the host's translation layer holds for a field group.
#[derive(Debug, Clone)]
pub struct GroupLocale {
    pub locale: String,
    pub language_code: String,
}

/// Publication status for newly created entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Published,
    Draft,
}

/// Arguments for creating a content entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub title: String,
    pub slug: String,
    pub entry_type: String,
    pub status: EntryStatus,
}

/// Storage operations the survey loader needs from the host CMS.
///
/// Calls are sequential and atomic at single-call granularity; the loader
/// performs no retries and spans no transaction across calls.
#[async_trait]
pub trait CmsStore: Send + Sync {
    /// List every metadata record of the given type.
    async fn list_records(&self, record_type: RecordType) -> Result<Vec<MetadataRecord>>;

    /// Locale assigned to a field group, if the translation layer has one.
    async fn resolve_group_language(&self, group_id: RecordId) -> Result<Option<GroupLocale>>;

    /// Create a content entry and return its id.
    async fn create_entry(&self, entry: &NewEntry) -> Result<RecordId>;

    /// Translation group an entry currently belongs to.
    async fn translation_group(
        &self,
        entry_type: &str,
        entry_id: RecordId,
    ) -> Result<TranslationGroupId>;

    /// Attach an entry to a translation group under a language code.
    ///
    /// `group` may be `None` when no canonical variant has been seen yet; the
    /// host then starts a fresh translation group for the entry.
    async fn link_translation(
        &self,
        entry_id: RecordId,
        entry_type: &str,
        group: Option<TranslationGroupId>,
        language: &str,
    ) -> Result<()>;

    /// Ids of all entries with the given slug and entry type.
    async fn find_entries(&self, slug: &str, entry_type: &str) -> Result<Vec<RecordId>>;

    /// Delete a content entry.
    async fn delete_entry(&self, entry_id: RecordId) -> Result<()>;

    /// Delete every metadata record attached to an entry.
    async fn delete_entry_metadata(&self, entry_id: RecordId) -> Result<()>;

    /// Append a structured sub-record to an entry under a schema key.
    async fn append_sub_record(
        &self,
        entry_id: RecordId,
        schema_key: &str,
        value: Value,
    ) -> Result<()>;
}
