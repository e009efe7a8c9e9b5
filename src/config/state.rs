// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Raw contents of the usernames text area (one per line)
    pub usernames_text: String,

    /// Output directory text field; mapped into ExportOptions on save
    pub out_dir_text: String,
    pub out_dir_dirty: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            usernames_text: s!(),
            out_dir_text: s!(),
            out_dir_dirty: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl AppState {
    pub fn new(options: AppOptions) -> Self {
        let gui = GuiState {
            usernames_text: options.scrape.usernames.join("\n"),
            out_dir_text: options.export.out_dir().to_string_lossy().into_owned(),
            ..GuiState::default()
        };
        Self { options, gui }
    }
}
