use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::styles;

use super::{render_recipe_detail, render_result_list};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(area);

    render_checklist(frame, app, chunks[0]);
    render_result_list(
        frame,
        app,
        chunks[1],
        matches!(app.focus, Focus::Detail),
        "Check ingredients you have and press Enter to see what you can make",
        "No recipes match your ingredients exactly.",
    );
    render_recipe_detail(frame, app, chunks[2]);
}

fn render_checklist(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::List);

    let items: Vec<ListItem> = app
        .checklist
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let owned = app.my_bar.contains(name);
            let marker = if owned { "[x] " } else { "[ ] " };
            let line = Line::from(vec![
                Span::styled(
                    marker,
                    if owned {
                        styles::success_style()
                    } else {
                        styles::muted_style()
                    },
                ),
                Span::raw(name.clone()),
            ]);

            let style = if i == app.checklist_selection && focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let block = Block::default()
        .title(format!(" My Bar ({} owned) ", app.my_bar.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    if items.is_empty() {
        let paragraph = ratatui::widgets::Paragraph::new(Line::from(Span::styled(
            "No ingredient data loaded",
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let list = List::new(items).block(block);
    let mut state = ListState::default();
    state.select(Some(app.checklist_selection));
    frame.render_stateful_widget(list, area, &mut state);
}
