//! Per-view-mode content rendering.

pub mod favorites;
pub mod my_bar;
pub mod search;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

/// Render the current result list (store-ordered recipe names) into `area`.
/// Shows `prompt` instead when no find has run yet, and `empty_message` when
/// a find produced nothing.
pub(crate) fn render_result_list(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    focused: bool,
    prompt: &str,
    empty_message: &str,
) {
    let block = Block::default()
        .title(format!(" Recipes ({}) ", app.result_count()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let Some(results) = app.results.as_ref() else {
        let paragraph = Paragraph::new(Line::from(Span::styled(prompt, styles::muted_style())))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    if results.is_empty() {
        let paragraph =
            Paragraph::new(Line::from(Span::styled(empty_message, styles::muted_style())))
                .wrap(Wrap { trim: true })
                .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .map(|(i, &index)| {
            let recipe = &app.recipes[index];
            let marker = if app.is_favorite(recipe) { "\u{2665} " } else { "  " };
            let line = Line::from(vec![
                Span::styled(marker, styles::error_style()),
                Span::raw(recipe.name.clone()),
            ]);

            let style = if i == app.result_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    let mut state = ListState::default();
    state.select(Some(app.result_selection));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the detail pane for the selected recipe: categories, ingredient
/// lines as stored, numbered instructions.
pub(crate) fn render_recipe_detail(frame: &mut Frame, app: &App, area: Rect) {
    let (title, lines) = match app.selected_recipe() {
        Some(recipe) => {
            let mut lines = Vec::new();

            if app.is_favorite(recipe) {
                lines.push(Line::from(Span::styled("\u{2665} Favorite", styles::error_style())));
            }

            lines.push(Line::from(vec![
                Span::styled("Spirit: ", styles::highlight_style()),
                Span::raw(recipe.main_liquor.join(", ")),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Flavor: ", styles::highlight_style()),
                Span::raw(recipe.flavor.join(", ")),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Difficulty: ", styles::highlight_style()),
                Span::raw(recipe.difficulty.clone().unwrap_or_else(|| "Unknown".to_string())),
            ]));
            lines.push(Line::from(""));

            lines.push(Line::from(Span::styled("Ingredients", styles::title_style())));
            for ingredient in &recipe.ingredients {
                lines.push(Line::from(format!("  - {}", ingredient)));
            }
            lines.push(Line::from(""));

            lines.push(Line::from(Span::styled("Instructions", styles::title_style())));
            for (i, step) in recipe.instructions.iter().enumerate() {
                lines.push(Line::from(format!("  {}. {}", i + 1, step)));
            }

            if let Some(ref image) = recipe.image {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Image: {}", image),
                    styles::muted_style(),
                )));
            }

            (format!(" {} ", recipe.name), lines)
        }
        None => (
            " No Recipe Selected ".to_string(),
            vec![Line::from(Span::styled(
                "Select a recipe from the list",
                styles::muted_style(),
            ))],
        ),
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}
