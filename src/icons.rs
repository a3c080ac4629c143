//! Program icon lookup.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::types::IconRef;

/// Edge length of program icons, also used for the transparent placeholder.
pub const ICON_SIZE: f32 = 72.0;

/// Find the first file matching `<dir>/<name>.*`, so `steam.old.png` counts for `steam`.
/// Missing directories and misses yield None.
pub fn lookup_icon(dir: &Path, name: &str) -> Option<PathBuf> {
    if !dir.is_dir() {
        tracing::debug!("icon dir {:?} does not exist", dir);
        return None;
    }
    let mut hits: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.file_name()
                .and_then(|s| s.to_str())
                .and_then(|f| f.strip_prefix(name))
                .is_some_and(|rest| rest.starts_with('.'))
        })
        .collect();
    hits.sort();
    if hits.is_empty() {
        tracing::debug!("no icon for {} in {:?}", name, dir);
    }
    hits.into_iter().next()
}

/// Resolves program names to icons, falling back to a transparent placeholder.
#[derive(Clone, Debug, Default)]
pub struct IconResolver {
    dir: Option<PathBuf>,
}

impl IconResolver {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn resolve(&self, name: &str) -> IconRef {
        self.dir
            .as_deref()
            .and_then(|d| lookup_icon(d, name))
            .map(IconRef::File)
            .unwrap_or(IconRef::Placeholder { size: ICON_SIZE })
    }
}
