pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::app::{AppContext, Result};
use crate::articles::ArticleStore;
use crate::store::PageCache;

use self::app::{Mode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut app = TuiApp::new();
    let mut store = ArticleStore::new(ctx.fetcher.clone());
    let event_handler = EventHandler::new(Duration::from_millis(100));

    // Initial listing goes through the transport cache.
    load_listings(&mut app, &mut store, &ctx, false).await;

    loop {
        terminal.draw(|frame| layout::render(frame, &mut app, &store, &ctx.config))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = ctx.config.keybindings.get_action(&key);
                match action {
                    Action::Quit => {
                        app.should_quit = true;
                    }
                    Action::Back => {
                        app.back();
                    }
                    Action::MoveUp => {
                        app.move_up(store.len());
                    }
                    Action::MoveDown => {
                        app.move_down(store.len());
                    }
                    Action::PageUp => {
                        app.page_up(store.len());
                    }
                    Action::PageDown => {
                        app.page_down(store.len());
                    }
                    Action::JumpToRow(row) => {
                        app.jump_to_row(row, store.len());
                    }
                    Action::Select => {
                        if app.mode == Mode::List && !store.is_empty() {
                            let label = store
                                .get(app.cursor)
                                .map(|stub| stub.label.clone())
                                .unwrap_or_default();
                            app.set_status(format!("Fetching {label}..."));
                            terminal
                                .draw(|frame| layout::render(frame, &mut app, &store, &ctx.config))?;

                            match store.select(app.cursor).await {
                                Ok(_) => {
                                    app.clear_status();
                                    app.view(app.cursor);
                                }
                                // Stay in the list; the stub row shows the
                                // failure and selection may be retried.
                                Err(e) => app.set_status(format!("Failed to load article: {e}")),
                            }
                        }
                    }
                    Action::Refresh => {
                        app.is_refreshing = true;
                        terminal
                            .draw(|frame| layout::render(frame, &mut app, &store, &ctx.config))?;

                        if let Err(e) = ctx.cache.purge_expired() {
                            app.set_status(format!("Cache purge failed: {e}"));
                        }
                        load_listings(&mut app, &mut store, &ctx, true).await;

                        app.back();
                        app.is_refreshing = false;
                    }
                    Action::OpenInBrowser => {
                        let index = match app.mode {
                            Mode::Viewing(index) => index,
                            Mode::List => app.cursor,
                        };
                        if let Some(stub) = store.get(index) {
                            if let Err(e) = open::that(stub.url.as_str()) {
                                app.set_status(format!("Failed to open browser: {e}"));
                            }
                        }
                    }
                    Action::None => {}
                }
            }
            AppEvent::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Re-run the listing fetcher for every source and reset the article store.
/// A failing source degrades to a status-bar note; the rest still load.
async fn load_listings(app: &mut TuiApp, store: &mut ArticleStore, ctx: &AppContext, fresh: bool) {
    let round = ctx.listing.list_all(&ctx.sources, fresh).await;
    let count = round.stubs.len();
    let failed = round.failed_sources;

    store.reset(round.stubs);
    app.clamp_cursor(store.len());
    info!(count, failed, "listings loaded");

    if failed > 0 {
        app.set_status(format!(
            "Loaded {count} articles ({failed} source(s) failed)"
        ));
    } else {
        app.set_status(format!("Loaded {count} articles"));
    }
}
