//! Keyboard input handling for the TUI.
//!
//! Translates keyboard events into application state changes. The only
//! async action is the manual data refresh.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::error;

use crate::app::{App, AppState, Focus, Tab, MAX_QUERY_LENGTH, PAGE_SCROLL_SIZE};
use crate::filter::Category;

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle query editing
    if matches!(app.state, AppState::EditingQuery) {
        match key.code {
            KeyCode::Enter => {
                app.state = AppState::Normal;
                app.run_find();
            }
            KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            KeyCode::Backspace => {
                app.filters.query.pop();
            }
            KeyCode::Char(c) => {
                if app.filters.query.len() < MAX_QUERY_LENGTH {
                    app.filters.query.push(c);
                }
            }
            _ => {}
        }
        return Ok(false);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('1') => app.switch_tab(Tab::Search),
        KeyCode::Char('2') => app.switch_tab(Tab::MyBar),
        KeyCode::Char('3') => app.switch_tab(Tab::Favorites),
        KeyCode::Tab => app.switch_tab(app.current_tab.next()),
        KeyCode::BackTab => app.switch_tab(app.current_tab.prev()),
        KeyCode::Char('u') => {
            app.status_message = Some("Updating recipes...".to_string());
            match app.load_recipes().await {
                Ok(()) => {
                    app.status_message = Some("Recipes updated".to_string());
                }
                Err(e) => {
                    error!(error = %e, "Recipe refresh failed");
                    app.status_message = Some("Update failed - showing cached data".to_string());
                }
            }
        }
        _ => return handle_tab_input(app, key),
    }

    Ok(false)
}

fn handle_tab_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.current_tab {
        Tab::Search => handle_search_tab(app, key)?,
        Tab::MyBar => handle_my_bar_tab(app, key)?,
        Tab::Favorites => handle_favorites_tab(app, key),
    }
    Ok(false)
}

fn handle_search_tab(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('/') => app.state = AppState::EditingQuery,
        KeyCode::Char('s') => app.cycle_category(Category::Spirit),
        KeyCode::Char('f') => app.cycle_category(Category::Flavor),
        KeyCode::Char('d') => app.cycle_category(Category::Difficulty),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Char('x') => app.toggle_favorite()?,
        KeyCode::Enter => app.run_find(),
        KeyCode::Up => app.move_result_selection(-1),
        KeyCode::Down => app.move_result_selection(1),
        KeyCode::PageUp => app.move_result_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_result_selection(PAGE_SCROLL_SIZE as isize),
        _ => {}
    }
    Ok(())
}

fn handle_my_bar_tab(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Left => app.focus = Focus::List,
        KeyCode::Right => app.focus = Focus::Detail,
        KeyCode::Char(' ') => {
            if matches!(app.focus, Focus::List) {
                app.toggle_checklist_item()?;
            }
        }
        KeyCode::Char('c') => app.clear_my_bar()?,
        KeyCode::Char('x') => {
            if matches!(app.focus, Focus::Detail) {
                app.toggle_favorite()?;
            }
        }
        KeyCode::Enter => app.run_find(),
        KeyCode::Up => match app.focus {
            Focus::List => app.move_checklist_selection(-1),
            Focus::Detail => app.move_result_selection(-1),
        },
        KeyCode::Down => match app.focus {
            Focus::List => app.move_checklist_selection(1),
            Focus::Detail => app.move_result_selection(1),
        },
        KeyCode::PageUp => match app.focus {
            Focus::List => app.move_checklist_selection(-(PAGE_SCROLL_SIZE as isize)),
            Focus::Detail => app.move_result_selection(-(PAGE_SCROLL_SIZE as isize)),
        },
        KeyCode::PageDown => match app.focus {
            Focus::List => app.move_checklist_selection(PAGE_SCROLL_SIZE as isize),
            Focus::Detail => app.move_result_selection(PAGE_SCROLL_SIZE as isize),
        },
        _ => {}
    }
    Ok(())
}

fn handle_favorites_tab(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('x') | KeyCode::Char(' ') => {
            let _ = app.toggle_favorite();
        }
        KeyCode::Up => app.move_result_selection(-1),
        KeyCode::Down => app.move_result_selection(1),
        KeyCode::PageUp => app.move_result_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_result_selection(PAGE_SCROLL_SIZE as isize),
        _ => {}
    }
}

// ============================================================================
// Tests
// ============================================================================
