//! Interactive terminal viewer
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod theme;
mod transcript;
mod worker;

use anyhow::{Context, Result};
pub use app::App;
pub use terminal::TerminalManager;
pub use worker::PageWorker;
use tracing::warn;

use crate::config::ViewerConfig;
use crate::models::DateIndex;
use crate::prefs::Preferences;
use crate::source::{PageLoader, open_export};
use crate::utils::format_path_with_tilde;
use crate::view::{ControllerOptions, ViewController};

/// Open the export in `config` and run the viewer until the user quits.
///
/// The metadata and date index are read before the terminal switches to the
/// alternate screen, so a missing export is reported as a normal error.
pub fn run_viewer(config: ViewerConfig) -> Result<()> {
    let source = open_export(&config.export_dir, config.page_size).with_context(|| {
        format!("Failed to open export: {}", format_path_with_tilde(&config.export_dir))
    })?;
    let loader = PageLoader::with_capacity(source, config.cache_pages);
    let (date_index, date_index_error) = match loader.load_date_index() {
        Ok(index) => (index, None),
        Err(e) => {
            warn!(error = %e, "date index unavailable, date jumps disabled");
            (DateIndex::default(), Some(e))
        }
    };
    let meta = loader.meta().clone();

    let prefs = Preferences::load();
    let options = ControllerOptions { identity: config.grouping, autoscroll: prefs.autoscroll };
    let controller = ViewController::new(&meta, date_index, options);
    let worker = PageWorker::spawn(loader);
    let title = format_path_with_tilde(&config.export_dir);

    let mut app = App::new(controller, worker, config, prefs, Preferences::path().ok(), title);
    if let Some(e) = &date_index_error {
        app.disable_date_jumps(e);
    }

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;
    res
}
