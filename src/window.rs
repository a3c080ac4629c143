//! Show/hide lifecycle of a release selection window.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Hidden,
    Visible,
}

/// Window bound to the catalog of one program. Created once and never destroyed.
#[derive(Clone, Debug)]
pub struct SelectionWindow {
    program_name: String,
    state: WindowState,
}

impl SelectionWindow {
    pub fn new(program_name: &str) -> Self {
        Self {
            program_name: program_name.to_string(),
            state: WindowState::Hidden,
        }
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == WindowState::Visible
    }

    pub fn show(&mut self) {
        self.state = WindowState::Visible;
    }

    pub fn hide(&mut self) {
        self.state = WindowState::Hidden;
    }

    /// A close request from the title bar only hides the window.
    pub fn request_close(&mut self) {
        tracing::debug!(program = %self.program_name, "close request, hiding window");
        self.hide();
    }
}
