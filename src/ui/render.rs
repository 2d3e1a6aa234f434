use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, Tab};

use super::styles;
use super::tabs::{favorites, my_bar, search};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Length(2), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, _app: &App, area: Rect) {
    let title = "  barback";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + help_hint.len() + 4),
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tabs = [
        ("[1] Search", Tab::Search),
        ("[2] My Bar", Tab::MyBar),
        ("[3] Favorites", Tab::Favorites),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, tab)) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        if app.current_tab == *tab {
            spans.push(Span::styled(*label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(*label, styles::muted_style()));
        }
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Search => search::render(frame, app, area),
        Tab::MyBar => my_bar::render(frame, app, area),
        Tab::Favorites => favorites::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[u]pdate | [q]uit";

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if let Some(ref err) = app.load_error {
        format!(" {} ", err)
    } else {
        let age = app.data_age.clone().unwrap_or_else(|| "never".to_string());
        format!(" {} recipes | updated {} ", app.recipes.len(), age)
    };
    let right_text = format!(" {} ", shortcuts);

    let padding = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let style = if app.load_error.is_some() && app.status_message.is_none() {
        styles::error_style()
    } else {
        styles::muted_style()
    };

    let status_line = Line::from(vec![
        Span::styled(left_text, style),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 24, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "     \u{2554}\u{2557} \u{2554}\u{2550}\u{2557}\u{2566}\u{2550}\u{2557}\u{2554}\u{2557} \u{2554}\u{2550}\u{2557}\u{2554}\u{2550}\u{2557}\u{2566}\u{2554}\u{2550}",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "     \u{2560}\u{2569}\u{2557}\u{2560}\u{2550}\u{2563}\u{2560}\u{2566}\u{255d}\u{2560}\u{2569}\u{2557}\u{2560}\u{2550}\u{2563}\u{2551}  \u{2560}\u{2569}\u{2557}",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "     \u{255a}\u{2550}\u{255d}\u{2569} \u{2569}\u{2569}\u{255a}\u{2550}\u{255a}\u{2550}\u{255d}\u{2569} \u{2569}\u{255a}\u{2550}\u{255d}\u{2569} \u{2569}",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            format!("              version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        key("1-3", "Switch view (search / my bar / favorites)"),
        key("Tab", "Next view"),
        key("\u{2191}/\u{2193}", "Navigate list"),
        key("\u{2190}/\u{2192}", "Switch focus (My Bar: checklist/results)"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        key("Enter", "Find recipes"),
        key("/", "Edit search query"),
        key("s f d", "Cycle spirit / flavor / difficulty"),
        key("c", "Clear filters (Search) or my bar (My Bar)"),
        key("Space", "Toggle checklist ingredient"),
        key("x", "Toggle favorite on selected recipe"),
        key("u", "Update recipe data"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(42, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
