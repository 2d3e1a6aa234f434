use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::App;

use super::{render_recipe_detail, render_result_list};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_result_list(
        frame,
        app,
        chunks[0],
        true,
        // Favorites renders on tab switch, so the prompt never shows.
        "",
        "No favorite drinks yet.",
    );
    render_recipe_detail(frame, app, chunks[1]);
}
