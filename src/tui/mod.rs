//! Interactive chat interface
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
pub mod theme;
mod timestamps;

use anyhow::Result;
pub use app::App;
pub use theme::Theme;
use tracing::info;

use crate::orchestrator::{QueryBackend, Session};
use crate::store::HistoryStorage;
use terminal::TerminalManager;

/// Run the chat UI until the user quits
pub fn run_interactive<S, B>(session: Session<S>, backend: B, theme: Theme) -> Result<()>
where
    S: HistoryStorage,
    B: QueryBackend + Clone + Send + 'static,
{
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(session, backend, theme);

    info!(messages = app.session().messages().len(), "Chat UI started");
    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    res
}
