#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use survey_loader::{
    CmsStore, EntryStatus, GroupLocale, MetadataRecord, NewEntry, RecordId, RecordType,
    TranslationGroupId,
};

/// Route loader logs through the test harness. Safe to call from every test;
/// only the first call wins.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// In-memory stand-in for the host CMS.
///
/// Seeded up front via the builder methods, then mutated through the
/// `CmsStore` trait; assertions read the recorded calls back out.
#[derive(Default)]
pub struct MockCms {
    fields: Vec<MetadataRecord>,
    groups: Vec<MetadataRecord>,
    locales: HashMap<RecordId, GroupLocale>,
    fail_create_slug: Option<String>,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_entry_id: RecordId,
    entries: Vec<Entry>,
    links: Vec<Link>,
    sub_records: Vec<SubRecord>,
    deleted_entries: Vec<RecordId>,
    deleted_metadata: Vec<RecordId>,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub id: RecordId,
    pub title: String,
    pub slug: String,
    pub entry_type: String,
    pub status: EntryStatus,
}

#[derive(Debug, Clone)]
pub struct Link {
    pub entry_id: RecordId,
    pub entry_type: String,
    pub group: Option<TranslationGroupId>,
    pub language: String,
}

#[derive(Debug, Clone)]
pub struct SubRecord {
    pub entry_id: RecordId,
    pub schema_key: String,
    pub value: Value,
}

impl MockCms {
    pub fn new() -> Self {
        let mut cms = Self::default();
        cms.state.get_mut().unwrap().next_entry_id = 1000;
        cms
    }

    pub fn field(mut self, id: RecordId, parent_id: RecordId, slug: &str, name: &str, kind: &str) -> Self {
        self.fields.push(MetadataRecord {
            id,
            parent_id,
            slug: slug.to_string(),
            short_description: name.to_string(),
            kind: Some(kind.to_string()),
        });
        self
    }

    pub fn group(mut self, id: RecordId, slug: &str, name: &str) -> Self {
        self.groups.push(MetadataRecord {
            id,
            parent_id: 0,
            slug: slug.to_string(),
            short_description: name.to_string(),
            kind: None,
        });
        self
    }

    pub fn group_locale(mut self, id: RecordId, locale: &str, language_code: &str) -> Self {
        self.locales.insert(
            id,
            GroupLocale {
                locale: locale.to_string(),
                language_code: language_code.to_string(),
            },
        );
        self
    }

    /// Seed an entry as if a previous activation had created it.
    pub fn existing_entry(self, id: RecordId, slug: &str, entry_type: &str) -> Self {
        self.state.lock().unwrap().entries.push(Entry {
            id,
            title: slug.to_string(),
            slug: slug.to_string(),
            entry_type: entry_type.to_string(),
            status: EntryStatus::Published,
        });
        self
    }

    /// Make `create_entry` fail for entries with the given slug.
    pub fn fail_create(mut self, slug: &str) -> Self {
        self.fail_create_slug = Some(slug.to_string());
        self
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.state.lock().unwrap().entries.clone()
    }

    pub fn links(&self) -> Vec<Link> {
        self.state.lock().unwrap().links.clone()
    }

    pub fn sub_records(&self) -> Vec<SubRecord> {
        self.state.lock().unwrap().sub_records.clone()
    }

    pub fn deleted_entries(&self) -> Vec<RecordId> {
        self.state.lock().unwrap().deleted_entries.clone()
    }

    pub fn deleted_metadata(&self) -> Vec<RecordId> {
        self.state.lock().unwrap().deleted_metadata.clone()
    }
}

/// Translation groups are derived from the entry id so tests can predict them.
pub fn translation_group_of(entry_id: RecordId) -> TranslationGroupId {
    9000 + entry_id
}

#[async_trait]
impl CmsStore for MockCms {
    async fn list_records(&self, record_type: RecordType) -> Result<Vec<MetadataRecord>> {
        Ok(match record_type {
            RecordType::Field => self.fields.clone(),
            RecordType::FieldGroup => self.groups.clone(),
        })
    }

    async fn resolve_group_language(&self, group_id: RecordId) -> Result<Option<GroupLocale>> {
        Ok(self.locales.get(&group_id).cloned())
    }

    async fn create_entry(&self, entry: &NewEntry) -> Result<RecordId> {
        if self.fail_create_slug.as_deref() == Some(entry.slug.as_str()) {
            anyhow::bail!("host refused to create entry '{}'", entry.slug);
        }

        let mut state = self.state.lock().unwrap();
        let id = state.next_entry_id;
        state.next_entry_id += 1;
        state.entries.push(Entry {
            id,
            title: entry.title.clone(),
            slug: entry.slug.clone(),
            entry_type: entry.entry_type.clone(),
            status: entry.status,
        });
        Ok(id)
    }

    async fn translation_group(
        &self,
        _entry_type: &str,
        entry_id: RecordId,
    ) -> Result<TranslationGroupId> {
        Ok(translation_group_of(entry_id))
    }

    async fn link_translation(
        &self,
        entry_id: RecordId,
        entry_type: &str,
        group: Option<TranslationGroupId>,
        language: &str,
    ) -> Result<()> {
        self.state.lock().unwrap().links.push(Link {
            entry_id,
            entry_type: entry_type.to_string(),
            group,
            language: language.to_string(),
        });
        Ok(())
    }

    async fn find_entries(&self, slug: &str, entry_type: &str) -> Result<Vec<RecordId>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .entries
            .iter()
            .filter(|entry| {
                entry.slug == slug
                    && entry.entry_type == entry_type
                    && !state.deleted_entries.contains(&entry.id)
            })
            .map(|entry| entry.id)
            .collect())
    }

    async fn delete_entry(&self, entry_id: RecordId) -> Result<()> {
        self.state.lock().unwrap().deleted_entries.push(entry_id);
        Ok(())
    }

    async fn delete_entry_metadata(&self, entry_id: RecordId) -> Result<()> {
        self.state.lock().unwrap().deleted_metadata.push(entry_id);
        Ok(())
    }

    async fn append_sub_record(
        &self,
        entry_id: RecordId,
        schema_key: &str,
        value: Value,
    ) -> Result<()> {
        self.state.lock().unwrap().sub_records.push(SubRecord {
            entry_id,
            schema_key: schema_key.to_string(),
            value,
        });
        Ok(())
    }
}
