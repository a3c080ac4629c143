//! Core data types shared across the application.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Installed programs, each mapped to the release tags already present.
/// An empty tag set means the program is installed but no release filtering applies.
pub type InstalledSet = BTreeMap<String, BTreeSet<String>>;

/// How a program is offered to the user. Fixed when the entry is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallMode {
    ToggleInstall,
    ChooseRelease,
}

/// Prerelease descriptor as delivered by the release source.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Prerelease {
    Flag(bool),
    Text(String),
}

impl Default for Prerelease {
    fn default() -> Self {
        Prerelease::Flag(false)
    }
}

impl fmt::Display for Prerelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prerelease::Flag(b) => write!(f, "{}", b),
            Prerelease::Text(s) => f.write_str(s),
        }
    }
}

/// One release record as returned by a catalog fetcher.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RawRelease {
    pub tag_name: String,
    #[serde(default)]
    pub prerelease: Prerelease,
}

impl RawRelease {
    pub fn new(tag_name: impl Into<String>, prerelease: Prerelease) -> Self {
        Self {
            tag_name: tag_name.into(),
            prerelease,
        }
    }
}

/// Selectable release row inside a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseEntry {
    pub tag: String,
    pub prerelease: Prerelease,
    pub selected: bool,
}

/// Binary install toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleControl {
    pub active: bool,
    /// False once the program is detected as pre-installed.
    pub interactive: bool,
}

/// Mode-specific control rendered next to a program label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Toggle(ToggleControl),
    /// Stateless "Choose" button that opens the release window.
    Choose,
}

/// Icon to draw for a program.
#[derive(Clone, Debug, PartialEq)]
pub enum IconRef {
    File(PathBuf),
    /// Fully transparent box of the given edge length.
    Placeholder { size: f32 },
}
