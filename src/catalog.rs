//! Per-program release catalog.

use std::collections::BTreeSet;

use crate::types::{RawRelease, ReleaseEntry};

/// Ordered, fixed-length list of releases offered for one program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseCatalog {
    program_name: String,
    entries: Vec<ReleaseEntry>,
}

impl ReleaseCatalog {
    /// Build from raw fetch results in source order, dropping already installed tags.
    pub fn build(
        program_name: &str,
        raw: Vec<RawRelease>,
        installed_tags: Option<&BTreeSet<String>>,
    ) -> Self {
        let installed = installed_tags.filter(|tags| !tags.is_empty());
        let total = raw.len();
        let entries: Vec<ReleaseEntry> = raw
            .into_iter()
            .filter(|r| installed.is_none_or(|tags| !tags.contains(&r.tag_name)))
            .map(|r| ReleaseEntry {
                tag: r.tag_name,
                prerelease: r.prerelease,
                selected: false,
            })
            .collect();

        tracing::debug!(
            program = program_name,
            offered = entries.len(),
            skipped = total - entries.len(),
            "built release catalog"
        );

        Self {
            program_name: program_name.to_string(),
            entries,
        }
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn entries(&self) -> &[ReleaseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flip the selection of one row. Other rows are untouched.
    ///
    /// Panics when `index` is out of range.
    pub fn toggle(&mut self, index: usize) {
        let len = self.entries.len();
        let Some(entry) = self.entries.get_mut(index) else {
            panic!(
                "release index {} out of range for {} ({} entries)",
                index, self.program_name, len
            );
        };
        entry.selected = !entry.selected;
    }

    /// Tags of the selected rows, in catalog order.
    pub fn selected_tags(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.tag.as_str())
            .collect()
    }
}
