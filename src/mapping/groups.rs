use std::collections::HashMap;

use anyhow::Result;
use log::debug;

use crate::cms::{CmsStore, RecordId, RecordType};

/// One field group with the language the translation layer assigns to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub language: String,
    pub key: String,
    pub name: String,
}

pub type GroupIndex = HashMap<RecordId, GroupRecord>;

/// Index field groups by id with their assigned language.
///
/// Groups the translation layer has no locale for are omitted; they cannot
/// anchor any field's language. One translation-layer call per group, which
/// is fine because groups are few.
pub async fn build_group_index<S: CmsStore + ?Sized>(store: &S) -> Result<GroupIndex> {
    let mut index = GroupIndex::new();

    for record in store.list_records(RecordType::FieldGroup).await? {
        match store.resolve_group_language(record.id).await? {
            Some(locale) => {
                index.insert(
                    record.id,
                    GroupRecord {
                        language: locale.language_code,
                        key: record.slug,
                        name: record.short_description,
                    },
                );
            }
            None => debug!("field group {} has no locale, skipping", record.id),
        }
    }

    Ok(index)
}
