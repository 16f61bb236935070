//! In-memory provider, optionally filled from a zone data directory.

use std::collections::BTreeMap;
use std::path::{Component, Path};
use std::sync::Arc;

use walkdir::WalkDir;
use zonerules_core::constants::ENCODED_RULES_EXTENSION;

use super::ZoneRulesProvider;
use crate::error::{RulesError, RulesResult};
use crate::zone::codec::decode_rules;
use crate::zone::core::RuleSet;

/// Zone rules held in memory, keyed by zone id and then version.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    zones: BTreeMap<String, BTreeMap<String, Arc<RuleSet>>>,
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `rules` as `version` of `zone_id`, replacing any previous entry.
    pub fn insert(&mut self, zone_id: impl Into<String>, version: impl Into<String>, rules: RuleSet) {
        self.zones
            .entry(zone_id.into())
            .or_default()
            .insert(version.into(), Arc::new(rules));
    }

    /// ## Summary
    /// Decodes `bytes` and registers the result as `version` of `zone_id`.
    ///
    /// ## Errors
    /// Returns [`RulesError::Codec`] if the bytes are not an encoded rule set.
    pub fn insert_encoded(
        &mut self,
        zone_id: impl Into<String>,
        version: impl Into<String>,
        bytes: &[u8],
    ) -> RulesResult<()> {
        let rules = decode_rules(bytes)?;
        self.insert(zone_id, version, rules);
        Ok(())
    }

    /// ## Summary
    /// Loads every encoded rule set below `root`.
    ///
    /// Files are expected at `<root>/<version>/<zone id>.tzr`, where the zone id
    /// may span directories (`2024a/America/New_York.tzr`). Files with any
    /// other extension are skipped.
    ///
    /// ## Errors
    /// Returns [`RulesError::Io`] if the tree cannot be read and
    /// [`RulesError::Codec`] if a file does not decode.
    #[tracing::instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn load_directory(root: impl AsRef<Path>) -> RulesResult<Self> {
        let root = root.as_ref();
        std::fs::metadata(root).map_err(|source| RulesError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        let mut provider = Self::new();
        let mut files = 0_usize;

        for entry in WalkDir::new(root).min_depth(2).sort_by_file_name() {
            let entry = entry.map_err(|e| RulesError::Io {
                path: e.path().unwrap_or(root).to_path_buf(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENCODED_RULES_EXTENSION) {
                tracing::warn!(path = %path.display(), "Skipping file without rules extension");
                continue;
            }
            let Some((version, zone_id)) = split_data_path(root, path) else {
                tracing::warn!(path = %path.display(), "Skipping file with non UTF-8 name");
                continue;
            };

            let bytes = std::fs::read(path).map_err(|source| RulesError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::trace!(%zone_id, %version, len = bytes.len(), "Decoding zone file");
            provider.insert_encoded(zone_id, version, &bytes)?;
            files += 1;
        }

        tracing::info!(zones = provider.zones.len(), files, "Loaded zone data");
        Ok(provider)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Splits `<root>/<version>/<zone>.tzr` into version and zone id.
fn split_data_path(root: &Path, path: &Path) -> Option<(String, String)> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let mut parts = relative.components().map(|component| match component {
        Component::Normal(part) => part.to_str(),
        _ => None,
    });
    let version = parts.next()??.to_string();
    let zone_id = parts.collect::<Option<Vec<_>>>()?.join("/");
    Some((version, zone_id))
}

impl ZoneRulesProvider for MemoryProvider {
    fn zone_ids(&self) -> Vec<String> {
        self.zones.keys().cloned().collect()
    }

    fn rules(&self, zone_id: &str) -> RulesResult<Arc<RuleSet>> {
        self.zones
            .get(zone_id)
            .and_then(|versions| versions.values().next_back())
            .cloned()
            .ok_or_else(|| RulesError::UnknownZone(zone_id.to_string()))
    }

    fn versions(&self, zone_id: &str) -> RulesResult<BTreeMap<String, Arc<RuleSet>>> {
        self.zones
            .get(zone_id)
            .cloned()
            .ok_or_else(|| RulesError::UnknownZone(zone_id.to_string()))
    }
}
