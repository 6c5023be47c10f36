use std::collections::HashMap;

use crate::cms::{MetadataRecord, RecordId};

/// Form-builder field type used purely for authoring-UI layout; carries no data.
const TAB_KIND: &str = "tab";

/// One form field: its direct parent, storage key, and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    pub parent: RecordId,
    pub key: String,
    pub name: String,
}

pub type FieldIndex = HashMap<RecordId, FieldRecord>;

/// Index field metadata records by id, dropping structural tab fields.
///
/// Tab fields never appear in any mapping; they exist only to organize the
/// authoring UI. Ids are unique per the host's guarantee.
pub fn index_fields(records: &[MetadataRecord]) -> FieldIndex {
    let mut index = FieldIndex::new();

    for record in records {
        if record.kind.as_deref() == Some(TAB_KIND) {
            continue;
        }

        index.insert(
            record.id,
            FieldRecord {
                parent: record.parent_id,
                key: record.slug.clone(),
                name: record.short_description.clone(),
            },
        );
    }

    index
}
