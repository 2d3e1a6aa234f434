use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppState};
use crate::ui::styles;

use super::{render_recipe_detail, render_result_list};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(area);

    render_filters(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_result_list(
        frame,
        app,
        body[0],
        true,
        "Select preferences and press Enter to find recipes",
        "No recipes found. Try fewer filters.",
    );
    render_recipe_detail(frame, app, body[1]);
}

fn filter_line(key: &str, label: &str, value: &Option<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" [{}] ", key), styles::help_key_style()),
        Span::styled(format!("{:<12}", label), styles::muted_style()),
        match value {
            Some(v) => Span::styled(v.clone(), styles::highlight_style()),
            None => Span::styled("Any".to_string(), styles::muted_style()),
        },
    ])
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let editing = matches!(app.state, AppState::EditingQuery);

    let mut query_spans = vec![
        Span::styled(" [/] ", styles::help_key_style()),
        Span::styled(format!("{:<12}", "Query"), styles::muted_style()),
        Span::styled(app.filters.query.clone(), styles::highlight_style()),
    ];
    if editing {
        query_spans.push(Span::styled("\u{258c}", styles::highlight_style()));
    }

    let lines = vec![
        filter_line("s", "Spirit", &app.filters.spirit),
        filter_line("f", "Flavor", &app.filters.flavor),
        filter_line("d", "Difficulty", &app.filters.difficulty),
        Line::from(query_spans),
        Line::from(Span::styled(
            if app.filters.is_empty() {
                " Enter: find recipes"
            } else {
                " Enter: find recipes    c: clear filters"
            },
            styles::muted_style(),
        )),
    ];

    let block = Block::default()
        .title(" Find Your Drink ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(editing));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
