//! Panel configuration loaded from a JSON file.

use anyhow::{Context, Result, bail};
use home::home_dir;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::types::InstalledSet;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    /// Programs installed or removed with a single toggle.
    pub toggle_programs: Vec<String>,
    /// Programs with selectable releases and their release API link, in file order.
    #[serde(deserialize_with = "ordered_pairs")]
    pub release_programs: Vec<(String, String)>,
    /// Installed programs and, for release programs, their installed tags.
    pub installed: BTreeMap<String, Vec<String>>,
    pub icons_dir: Option<PathBuf>,
    pub fetch_timeout_secs: Option<u64>,
}

impl PanelConfig {
    /// Read and validate a config file. A missing file gives the default config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!("config {:?} not found, starting with an empty panel", path);
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).with_context(|| format!("Read config {:?}", path))?;
        let cfg: PanelConfig =
            serde_json::from_str(&text).with_context(|| format!("Parse config {:?}", path))?;
        cfg.validate()?;
        tracing::info!("loaded config from {:?}", path);
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        for name in &self.toggle_programs {
            if self.release_programs.iter().any(|(n, _)| n == name) {
                bail!("{} is listed both as a toggle program and a release program", name);
            }
        }
        Ok(())
    }

    pub fn installed_set(&self) -> InstalledSet {
        self.installed
            .iter()
            .map(|(name, tags)| (name.clone(), tags.iter().cloned().collect()))
            .collect()
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

/// Read a JSON object into `(key, value)` pairs, keeping document order.
fn ordered_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping program names to API links")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, link)) = map.next_entry::<String, String>()? {
                pairs.push((name, link));
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

/// `$HOME/.config/program-panel/config.json`
pub fn default_config_path() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("program-panel")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "toggle_programs": ["steam", "lutris"],
                "release_programs": {"proton-ge": "https://api.github.com/repos/GloriousEggroll/proton-ge-custom/releases"},
                "installed": {"steam": [], "proton-ge": ["GE-Proton9-1"]},
                "icons_dir": "/usr/share/program-panel/icons",
                "fetch_timeout_secs": 10
            }"#,
        )
        .unwrap();

        let cfg = PanelConfig::load(&path).unwrap();
        assert_eq!(cfg.toggle_programs, vec!["steam", "lutris"]);
        assert_eq!(cfg.release_programs.len(), 1);
        assert_eq!(cfg.fetch_timeout(), Some(Duration::from_secs(10)));
        let installed = cfg.installed_set();
        assert!(installed["steam"].is_empty());
        assert!(installed["proton-ge"].contains("GE-Proton9-1"));
    }

    #[test]
    fn release_programs_keep_file_order() {
        let cfg: PanelConfig = serde_json::from_str(
            r#"{"release_programs": {"wine-ge": "a", "proton-ge": "b", "dxvk": "c"}}"#,
        )
        .unwrap();
        let names: Vec<_> = cfg.release_programs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["wine-ge", "proton-ge", "dxvk"]);
        assert_eq!(cfg.release_programs[1].1, "b");
    }

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = PanelConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg, PanelConfig::default());
    }

    #[test]
    fn overlapping_sets_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"toggle_programs": ["wine"], "release_programs": {"wine": "link"}}"#,
        )
        .unwrap();
        assert!(PanelConfig::load(&path).is_err());
    }
}
