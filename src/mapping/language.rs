use std::collections::HashMap;

use thiserror::Error;

use super::fields::FieldIndex;
use super::groups::GroupIndex;
use crate::cms::RecordId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// The parent chain never left the field index within the iteration
    /// bound, which only happens when the chain is cyclic or the metadata is
    /// corrupt.
    #[error("field {field_id} has a parent chain that never reaches a field group")]
    MalformedHierarchy { field_id: RecordId },
}

/// Per-field language assignments plus the fields whose chains were unusable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LanguageResolution {
    pub languages: HashMap<RecordId, String>,
    /// Fields excluded because of a malformed parent chain, ascending by id.
    pub malformed: Vec<RecordId>,
}

impl LanguageResolution {
    pub fn language_of(&self, field_id: RecordId) -> Option<&str> {
        self.languages.get(&field_id).map(String::as_str)
    }
}

/// Resolve one field's language by climbing its parent chain.
///
/// The chain climbs field to field until the candidate id is no longer a
/// field. `Ok(None)` means it ended outside the group index: an unmapped
/// field, not a failure; the group may simply be untranslated. `Err` means
/// the chain never terminated within the field-count bound.
pub fn resolve_field_language<'g>(
    field_id: RecordId,
    fields: &FieldIndex,
    groups: &'g GroupIndex,
) -> Result<Option<&'g str>, HierarchyError> {
    let Some(field) = fields.get(&field_id) else {
        return Ok(None);
    };

    let mut candidate = field.parent;
    // A well-formed chain visits each field at most once.
    let mut remaining = fields.len();

    while let Some(ancestor) = fields.get(&candidate) {
        if remaining == 0 {
            return Err(HierarchyError::MalformedHierarchy { field_id });
        }
        remaining -= 1;
        candidate = ancestor.parent;
    }

    Ok(groups.get(&candidate).map(|group| group.language.as_str()))
}

/// Resolve the language of every field in the index.
///
/// Fields whose chains end in an unknown id are silently absent; fields with
/// cyclic chains are collected in [`LanguageResolution::malformed`] so the
/// caller can report them.
pub fn resolve_languages(fields: &FieldIndex, groups: &GroupIndex) -> LanguageResolution {
    let mut resolution = LanguageResolution::default();

    for &field_id in fields.keys() {
        match resolve_field_language(field_id, fields, groups) {
            Ok(Some(language)) => {
                resolution.languages.insert(field_id, language.to_string());
            }
            Ok(None) => {}
            Err(HierarchyError::MalformedHierarchy { .. }) => {
                resolution.malformed.push(field_id);
            }
        }
    }

    resolution.malformed.sort_unstable();
    resolution
}
