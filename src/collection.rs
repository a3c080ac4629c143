//! Program entries and the collection that owns them together with
//! their release catalogs and selection windows.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::ReleaseCatalog;
use crate::error::PanelError;
use crate::fetch::CatalogFetcher;
use crate::icons::IconResolver;
use crate::types::{Control, IconRef, InstallMode, InstalledSet, ToggleControl};
use crate::window::SelectionWindow;

/// Called with the program name when an install toggle is activated.
pub type InstallCallback = Box<dyn FnMut(&str) + Send>;
/// Called with the program name and its window when "Choose" is activated.
pub type ChooseCallback = Box<dyn FnMut(&str, &mut SelectionWindow) + Send>;

/// Renderable unit: icon, label and control of one program.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgramEntry {
    pub name: String,
    pub mode: InstallMode,
    pub icon: IconRef,
    pub control: Control,
}

impl ProgramEntry {
    pub fn new(name: &str, mode: InstallMode, installed: &InstalledSet, icons: &IconResolver) -> Self {
        let control = match mode {
            InstallMode::ToggleInstall => {
                let pre_installed = installed.contains_key(name);
                Control::Toggle(ToggleControl {
                    active: pre_installed,
                    interactive: !pre_installed,
                })
            }
            InstallMode::ChooseRelease => Control::Choose,
        };
        Self {
            name: name.to_string(),
            mode,
            icon: icons.resolve(name),
            control,
        }
    }
}

/// Collects the inputs of a [`ProgramCollection`].
pub struct ProgramCollectionBuilder {
    toggle_programs: Vec<String>,
    release_programs: Vec<(String, String)>,
    installed: InstalledSet,
    icons: IconResolver,
    on_install: InstallCallback,
    on_choose: ChooseCallback,
}

impl ProgramCollectionBuilder {
    pub fn toggle_programs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.toggle_programs = names.into_iter().map(Into::into).collect();
        self
    }

    /// Programs offering releases, each with the API link its catalog is fetched from.
    pub fn release_programs<I, N, L>(mut self, programs: I) -> Self
    where
        I: IntoIterator<Item = (N, L)>,
        N: Into<String>,
        L: Into<String>,
    {
        self.release_programs = programs
            .into_iter()
            .map(|(n, l)| (n.into(), l.into()))
            .collect();
        self
    }

    pub fn installed(mut self, installed: InstalledSet) -> Self {
        self.installed = installed;
        self
    }

    pub fn icons(mut self, icons: IconResolver) -> Self {
        self.icons = icons;
        self
    }

    pub fn on_install(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_install = Box::new(f);
        self
    }

    pub fn on_choose(mut self, f: impl FnMut(&str, &mut SelectionWindow) + Send + 'static) -> Self {
        self.on_choose = Box::new(f);
        self
    }

    /// Create every entry, fetch every catalog and a hidden window per release program.
    ///
    /// Any fetch failure aborts the whole build.
    pub fn build(self, fetcher: &dyn CatalogFetcher) -> Result<ProgramCollection, PanelError> {
        let mut seen = BTreeSet::new();
        let all_names = self
            .toggle_programs
            .iter()
            .chain(self.release_programs.iter().map(|(n, _)| n));
        for name in all_names {
            if !seen.insert(name.as_str()) {
                return Err(PanelError::DuplicateProgram(name.clone()));
            }
        }

        let mut order = Vec::with_capacity(seen.len());
        let mut entries = BTreeMap::new();
        let mut catalogs = BTreeMap::new();
        let mut windows = BTreeMap::new();

        for name in &self.toggle_programs {
            let entry = ProgramEntry::new(name, InstallMode::ToggleInstall, &self.installed, &self.icons);
            order.push(name.clone());
            entries.insert(name.clone(), entry);
        }

        for (name, api_link) in &self.release_programs {
            let entry = ProgramEntry::new(name, InstallMode::ChooseRelease, &self.installed, &self.icons);
            let raw = fetcher
                .fetch(api_link, name)
                .map_err(|source| PanelError::Fetch {
                    program: name.clone(),
                    source,
                })?;
            let catalog = ReleaseCatalog::build(name, raw, self.installed.get(name));
            order.push(name.clone());
            entries.insert(name.clone(), entry);
            catalogs.insert(name.clone(), catalog);
            windows.insert(name.clone(), SelectionWindow::new(name));
        }

        tracing::info!(
            toggles = self.toggle_programs.len(),
            releases = catalogs.len(),
            "program collection built"
        );

        Ok(ProgramCollection {
            order,
            entries,
            catalogs,
            windows,
            on_install: self.on_install,
            on_choose: self.on_choose,
        })
    }
}

/// Owns all program entries, release catalogs and selection windows.
pub struct ProgramCollection {
    order: Vec<String>,
    entries: BTreeMap<String, ProgramEntry>,
    catalogs: BTreeMap<String, ReleaseCatalog>,
    windows: BTreeMap<String, SelectionWindow>,
    on_install: InstallCallback,
    on_choose: ChooseCallback,
}

impl ProgramCollection {
    pub fn builder() -> ProgramCollectionBuilder {
        ProgramCollectionBuilder {
            toggle_programs: Vec::new(),
            release_programs: Vec::new(),
            installed: InstalledSet::new(),
            icons: IconResolver::default(),
            on_install: Box::new(|_| {}),
            on_choose: Box::new(|_, window| window.show()),
        }
    }

    /// Entries in display order: toggle programs first, then release programs.
    pub fn entries(&self) -> impl Iterator<Item = &ProgramEntry> {
        self.order.iter().filter_map(|n| self.entries.get(n))
    }

    pub fn entry(&self, name: &str) -> Option<&ProgramEntry> {
        self.entries.get(name)
    }

    pub fn catalogs(&self) -> &BTreeMap<String, ReleaseCatalog> {
        &self.catalogs
    }

    pub fn windows(&self) -> &BTreeMap<String, SelectionWindow> {
        &self.windows
    }

    pub fn catalog(&self, name: &str) -> Option<&ReleaseCatalog> {
        self.catalogs.get(name)
    }

    pub fn window(&self, name: &str) -> Option<&SelectionWindow> {
        self.windows.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Activate an install toggle. Returns false for a pre-installed (non-interactive) toggle.
    pub fn activate_toggle(&mut self, name: &str) -> Result<bool, PanelError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| PanelError::UnknownProgram(name.to_string()))?;
        let Control::Toggle(toggle) = &mut entry.control else {
            return Err(PanelError::NotAToggleProgram(name.to_string()));
        };
        if !toggle.interactive {
            tracing::debug!("ignoring toggle of installed program {}", name);
            return Ok(false);
        }
        toggle.active = !toggle.active;
        tracing::info!(program = name, active = toggle.active, "install toggle");
        (self.on_install)(name);
        Ok(true)
    }

    /// Activate the "Choose" button of a release program.
    pub fn activate_choose(&mut self, name: &str) -> Result<(), PanelError> {
        let Some(window) = self.windows.get_mut(name) else {
            return Err(missing_release(&self.entries, name));
        };
        (self.on_choose)(name, window);
        Ok(())
    }

    pub fn toggle_release(&mut self, name: &str, index: usize) -> Result<(), PanelError> {
        self.catalog_mut(name)?.toggle(index);
        Ok(())
    }

    pub fn hide_window(&mut self, name: &str) -> Result<(), PanelError> {
        self.window_mut(name)?.hide();
        Ok(())
    }

    pub fn request_close(&mut self, name: &str) -> Result<(), PanelError> {
        self.window_mut(name)?.request_close();
        Ok(())
    }

    fn window_mut(&mut self, name: &str) -> Result<&mut SelectionWindow, PanelError> {
        let entries = &self.entries;
        self.windows
            .get_mut(name)
            .ok_or_else(|| missing_release(entries, name))
    }

    fn catalog_mut(&mut self, name: &str) -> Result<&mut ReleaseCatalog, PanelError> {
        let entries = &self.entries;
        self.catalogs
            .get_mut(name)
            .ok_or_else(|| missing_release(entries, name))
    }
}

fn missing_release(entries: &BTreeMap<String, ProgramEntry>, name: &str) -> PanelError {
    if entries.contains_key(name) {
        PanelError::NotAReleaseProgram(name.to_string())
    } else {
        PanelError::UnknownProgram(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Prerelease, RawRelease};
    use crate::window::WindowState;
    use std::sync::{Arc, Mutex};

    struct StubFetcher;

    impl CatalogFetcher for StubFetcher {
        fn fetch(&self, api_link: &str, _program: &str) -> anyhow::Result<Vec<RawRelease>> {
            if api_link == "broken" {
                anyhow::bail!("connection refused");
            }
            Ok(["v1", "v2", "v3"]
                .iter()
                .map(|t| RawRelease::new(*t, Prerelease::Flag(false)))
                .collect())
        }
    }

    fn installed(pairs: &[(&str, &[&str])]) -> InstalledSet {
        pairs
            .iter()
            .map(|(n, tags)| (n.to_string(), tags.iter().map(|t| t.to_string()).collect()))
            .collect()
    }

    #[test]
    fn single_toggle_program_starts_off_and_interactive() {
        let c = ProgramCollection::builder()
            .toggle_programs(["A"])
            .build(&StubFetcher)
            .unwrap();
        let entries: Vec<_> = c.entries().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mode, InstallMode::ToggleInstall);
        assert_eq!(
            entries[0].control,
            Control::Toggle(ToggleControl { active: false, interactive: true })
        );
        assert!(c.catalogs().is_empty());
        assert!(c.windows().is_empty());
    }

    #[test]
    fn installed_toggle_program_is_on_and_locked() {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let sink = requests.clone();
        let mut c = ProgramCollection::builder()
            .toggle_programs(["steam", "lutris"])
            .installed(installed(&[("steam", &[])]))
            .on_install(move |name| sink.lock().unwrap().push(name.to_string()))
            .build(&StubFetcher)
            .unwrap();

        assert_eq!(
            c.entry("steam").unwrap().control,
            Control::Toggle(ToggleControl { active: true, interactive: false })
        );
        assert!(!c.activate_toggle("steam").unwrap());
        assert!(c.activate_toggle("lutris").unwrap());
        assert_eq!(
            c.entry("lutris").unwrap().control,
            Control::Toggle(ToggleControl { active: true, interactive: true })
        );
        assert_eq!(*requests.lock().unwrap(), vec!["lutris".to_string()]);
    }

    #[test]
    fn release_program_gets_catalog_and_hidden_window() {
        let c = ProgramCollection::builder()
            .release_programs([("proton-ge", "https://example.invalid/releases")])
            .installed(installed(&[("proton-ge", &["v2"])]))
            .build(&StubFetcher)
            .unwrap();

        assert_eq!(c.entry("proton-ge").unwrap().control, Control::Choose);
        let tags: Vec<_> = c.catalog("proton-ge").unwrap().entries().iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["v1", "v3"]);
        assert_eq!(c.window("proton-ge").unwrap().state(), WindowState::Hidden);
    }

    #[test]
    fn choose_shows_window_and_keeps_toggles_across_close() {
        let mut c = ProgramCollection::builder()
            .release_programs([("proton-ge", "link")])
            .build(&StubFetcher)
            .unwrap();

        c.activate_choose("proton-ge").unwrap();
        assert!(c.window("proton-ge").unwrap().is_visible());
        c.toggle_release("proton-ge", 2).unwrap();
        c.request_close("proton-ge").unwrap();
        assert_eq!(c.window("proton-ge").unwrap().state(), WindowState::Hidden);

        c.activate_choose("proton-ge").unwrap();
        assert!(c.window("proton-ge").unwrap().is_visible());
        assert_eq!(c.catalog("proton-ge").unwrap().selected_tags(), vec!["v3"]);
    }

    #[test]
    fn custom_choose_callback_receives_window() {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let sink = opened.clone();
        let mut c = ProgramCollection::builder()
            .release_programs([("wine-ge", "link")])
            .on_choose(move |name, window| {
                sink.lock().unwrap().push(name.to_string());
                window.show();
            })
            .build(&StubFetcher)
            .unwrap();
        c.activate_choose("wine-ge").unwrap();
        assert_eq!(*opened.lock().unwrap(), vec!["wine-ge".to_string()]);
        assert!(c.window("wine-ge").unwrap().is_visible());
    }

    #[test]
    fn fetch_failure_fails_the_whole_build() {
        let err = ProgramCollection::builder()
            .toggle_programs(["A"])
            .release_programs([("ok", "link"), ("bad", "broken")])
            .build(&StubFetcher)
            .err()
            .unwrap();
        assert!(matches!(err, PanelError::Fetch { ref program, .. } if program == "bad"));
    }

    #[test]
    fn overlapping_program_sets_are_rejected() {
        let err = ProgramCollection::builder()
            .toggle_programs(["A"])
            .release_programs([("A", "link")])
            .build(&StubFetcher)
            .err()
            .unwrap();
        assert!(matches!(err, PanelError::DuplicateProgram(ref n) if n == "A"));
    }

    #[test]
    fn actions_on_wrong_mode_or_unknown_name_error() {
        let mut c = ProgramCollection::builder()
            .toggle_programs(["A"])
            .release_programs([("B", "link")])
            .build(&StubFetcher)
            .unwrap();
        assert!(matches!(c.activate_toggle("B"), Err(PanelError::NotAToggleProgram(_))));
        assert!(matches!(c.activate_choose("A"), Err(PanelError::NotAReleaseProgram(_))));
        assert!(matches!(c.toggle_release("Z", 0), Err(PanelError::UnknownProgram(_))));
        assert!(matches!(c.hide_window("Z"), Err(PanelError::UnknownProgram(_))));
        let names: Vec<_> = c.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
