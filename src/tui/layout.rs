use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::articles::ArticleStore;
use crate::config::{Align, Config};
use crate::domain::{Block as DocBlock, Document, Run, Style as RunStyle};
use crate::tui::app::{Mode, TuiApp};

/// Article panes narrower than this are unreadable; the configured
/// percentage is a target, not a floor.
const MIN_ARTICLE_WIDTH: u16 = 70;

pub fn render(frame: &mut Frame, app: &mut TuiApp, store: &ArticleStore, config: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    match app.mode {
        Mode::List => render_list(frame, app, store, chunks[0]),
        Mode::Viewing(index) => render_article(frame, app, store, config, index, chunks[0]),
    }
    render_status_bar(frame, app, chunks[1]);
}

fn render_list(frame: &mut Frame, app: &TuiApp, store: &ArticleStore, area: Rect) {
    let items: Vec<ListItem> = store
        .stubs()
        .iter()
        .enumerate()
        .map(|(i, stub)| {
            let mut content = format!("{:>3}. [{}] {}", i + 1, stub.source_name, stub.label);
            if stub.is_failed() {
                content.push_str("  [failed]");
            }

            let base_style = if stub.is_failed() {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };

            let style = if i == app.cursor {
                base_style.add_modifier(Modifier::REVERSED)
            } else {
                base_style
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let title = format!(" News ({}) ", store.len());
    let block = Block::default().title(title).borders(Borders::ALL);

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn render_article(
    frame: &mut Frame,
    app: &TuiApp,
    store: &ArticleStore,
    config: &Config,
    index: usize,
    area: Rect,
) {
    let area = article_area(area, config);

    let (title, content) = match store.get(index).and_then(|stub| stub.document()) {
        Some(document) => {
            let inner_width = area.width.saturating_sub(2).max(1) as usize;
            (
                format!(" {} ", document.display_title()),
                document_text(document, inner_width),
            )
        }
        None => (" Article ".to_string(), Text::from("Article not loaded")),
    };

    let block = Block::default().title(title).borders(Borders::ALL);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Place the article pane per the configured width percentage and alignment,
/// clamped between [`MIN_ARTICLE_WIDTH`] and the terminal width.
fn article_area(area: Rect, config: &Config) -> Rect {
    let target = (area.width as u32 * config.width.min(100) as u32 / 100) as u16;
    let width = target.max(MIN_ARTICLE_WIDTH).min(area.width);

    let x = match config.align {
        Align::Left => 0,
        Align::Center => (area.width - width) / 2,
        Align::Right => area.width - width,
    };

    Rect {
        x: area.x + x,
        y: area.y,
        width,
        height: area.height,
    }
}

fn document_text(document: &Document, width: usize) -> Text<'static> {
    let lines = document
        .blocks
        .iter()
        .map(|block| match block {
            DocBlock::Divider { glyph } => Line::from(glyph.to_string().repeat(width)),
            DocBlock::Text { runs } => Line::from(runs.iter().map(run_span).collect::<Vec<_>>()),
        })
        .collect::<Vec<_>>();

    Text::from(lines)
}

fn run_span(run: &Run) -> Span<'static> {
    let mut style = match run.style {
        RunStyle::Plain => Style::default(),
        RunStyle::Bold => Style::default().add_modifier(Modifier::BOLD),
        RunStyle::Italic => Style::default().add_modifier(Modifier::ITALIC),
        RunStyle::Underline => Style::default().add_modifier(Modifier::UNDERLINED),
    };
    if run.link.is_some() {
        style = style.fg(Color::Blue);
    }
    Span::styled(run.text.clone(), style)
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = if app.is_refreshing {
        "Refreshing...".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        match app.mode {
            Mode::List => {
                "j/k:Move  Enter:Read  1-9,0:Jump  r:Refresh  o:Open  q:Quit".to_string()
            }
            Mode::Viewing(_) => "j/k:Scroll  b:Back  o:Open  q:Quit".to_string(),
        }
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}
