//! Survey definitions and the activation/deactivation lifecycle.
//!
//! [`SurveyLoader`] is the host's entry point: `activate` creates one content
//! entry per language variant, links the variants into a translation group,
//! and appends the mapped sections; `deactivate` removes the entries and
//! their metadata again.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::cms::{CmsStore, EntryStatus, NewEntry, RecordType, TranslationGroupId};
use crate::mapping::{
    FieldIndex, LanguageResolution, build_group_index, index_fields, map_section, name_to_key_map,
    resolve_languages,
};

/// Content entry type the loader creates and deletes.
const SURVEY_ENTRY_TYPE: &str = "survey";

/// Field name whose storage key the mapped sections are appended under.
const SECTIONS_FIELD: &str = "sections";

/// One survey in one language, as supplied by the authoring side.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyDefinition {
    pub name: String,
    pub title: String,
    /// Language code of this variant. Definitions without one are skipped on
    /// activation.
    pub language: Option<String>,
    /// Nested question/answer structures, one value per section.
    pub sections: Option<Vec<Value>>,
    /// The default-language variant anchors the translation group the other
    /// variants link to.
    #[serde(default)]
    pub default: bool,
}

/// A named bundle of survey definitions, typically one per language.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyPackage {
    pub name: String,
    pub surveys: Vec<SurveyDefinition>,
}

/// Drives survey content through the host CMS.
pub struct SurveyLoader<S: CmsStore> {
    store: S,
}

impl<S: CmsStore> SurveyLoader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The injected host store, for callers that need to reach it after
    /// handing it to the loader.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create the package's content entries with their mapped sections.
    ///
    /// Field and group metadata is indexed once and reused for every survey
    /// in the package. A failing survey is logged and skipped; the rest of
    /// the batch still runs. There is no rollback: an entry whose section
    /// append fails stays created.
    pub async fn activate(&self, package: &SurveyPackage) -> Result<()> {
        info!("Activating survey package '{}'", package.name);

        let field_records = self.store.list_records(RecordType::Field).await?;
        let fields = index_fields(&field_records);
        let groups = build_group_index(&self.store).await?;
        let resolution = resolve_languages(&fields, &groups);

        for &field_id in &resolution.malformed {
            warn!("field {} has a malformed parent chain, left unresolved", field_id);
        }

        let mut canonical_group: Option<TranslationGroupId> = None;

        for survey in &package.surveys {
            let (Some(language), Some(sections)) = (&survey.language, &survey.sections) else {
                debug!("survey '{}' has no language or sections, skipping", survey.name);
                continue;
            };

            if let Err(e) = self
                .load_survey(survey, language, sections, &fields, &resolution, &mut canonical_group)
                .await
            {
                warn!("failed to load survey '{}' ({}): {:#}", survey.name, language, e);
            }
        }

        Ok(())
    }

    async fn load_survey(
        &self,
        survey: &SurveyDefinition,
        language: &str,
        sections: &[Value],
        fields: &FieldIndex,
        resolution: &LanguageResolution,
        canonical_group: &mut Option<TranslationGroupId>,
    ) -> Result<()> {
        let entry = NewEntry {
            title: survey.title.clone(),
            slug: survey.name.clone(),
            entry_type: SURVEY_ENTRY_TYPE.to_string(),
            status: EntryStatus::Published,
        };

        let entry_id = self
            .store
            .create_entry(&entry)
            .await
            .with_context(|| format!("creating entry for '{}'", survey.name))?;

        if survey.default {
            let group = self
                .store
                .translation_group(SURVEY_ENTRY_TYPE, entry_id)
                .await
                .with_context(|| format!("reading translation group of entry {entry_id}"))?;
            *canonical_group = Some(group);
        } else {
            self.store
                .link_translation(entry_id, SURVEY_ENTRY_TYPE, *canonical_group, language)
                .await
                .with_context(|| format!("linking '{language}' translation for '{}'", survey.name))?;
        }

        let names = name_to_key_map(fields, resolution, language);

        match names.get(SECTIONS_FIELD) {
            Some(sections_key) => {
                for section in sections {
                    let mapped = map_section(section, &names);
                    self.store
                        .append_sub_record(entry_id, sections_key, mapped)
                        .await
                        .with_context(|| format!("appending section to entry {entry_id}"))?;
                }
            }
            None => debug!(
                "language '{}' defines no '{}' field, entry {} gets no sections",
                language, SECTIONS_FIELD, entry_id
            ),
        }

        info!("loaded survey '{}' ({}) as entry {}", survey.name, language, entry_id);
        Ok(())
    }

    /// Delete every content entry the package created, with its metadata.
    ///
    /// Like activation, one failing survey does not stop the batch.
    pub async fn deactivate(&self, package: &SurveyPackage) -> Result<()> {
        info!("Deactivating survey package '{}'", package.name);

        for survey in &package.surveys {
            if let Err(e) = self.remove_survey(&survey.name).await {
                warn!("failed to remove survey '{}': {:#}", survey.name, e);
            }
        }

        Ok(())
    }

    async fn remove_survey(&self, name: &str) -> Result<()> {
        let entries = self.store.find_entries(name, SURVEY_ENTRY_TYPE).await?;
        debug!("removing {} entries for survey '{}'", entries.len(), name);

        for entry_id in entries {
            self.store
                .delete_entry(entry_id)
                .await
                .with_context(|| format!("deleting entry {entry_id}"))?;
            self.store
                .delete_entry_metadata(entry_id)
                .await
                .with_context(|| format!("deleting metadata of entry {entry_id}"))?;
        }

        Ok(())
    }
}
