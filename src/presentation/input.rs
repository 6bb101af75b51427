use crate::application::{App, AppMode, FilterField};
use crate::domain::LifeStatus;
use crate::presentation::ui::get_help_text;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Browse => Self::handle_browse_mode(app, key),
            AppMode::Search => Self::handle_search_mode(app, key),
            AppMode::Filters => Self::handle_filters_mode(app, key, modifiers),
            AppMode::Details => Self::handle_details_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_browse_mode(app: &mut App, key: KeyCode) {
        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_cursor_down(),
            KeyCode::Left | KeyCode::Char('h') => app.previous_page(),
            KeyCode::Right | KeyCode::Char('l') => app.next_page(),
            KeyCode::Home | KeyCode::Char('g') => app.first_page(),
            KeyCode::End | KeyCode::Char('G') => app.last_page(),
            KeyCode::Enter => app.open_details(),
            KeyCode::Char('f') => app.toggle_highlighted_favorite(),
            KeyCode::Tab => app.switch_tab(),
            KeyCode::Char('r') => app.reload(),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('F') => app.open_filters(),
            KeyCode::Char('x') => app.reset_filters(),
            KeyCode::Char('a') => app.toggle_status_filter(LifeStatus::Alive),
            KeyCode::Char('d') => app.toggle_status_filter(LifeStatus::Dead),
            KeyCode::Char('u') => app.toggle_status_filter(LifeStatus::Unknown),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            _ => {}
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.apply_search(),
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Backspace => {
                app.search_input.pop();
            }
            KeyCode::Char(c) => app.search_input.push(c),
            _ => {}
        }
    }

    fn handle_filters_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('x') = key {
                app.reset_filters();
            }
            return;
        }

        match key {
            KeyCode::Enter => app.apply_filters(),
            KeyCode::Esc => app.cancel_filters(),
            KeyCode::Tab | KeyCode::Down => app.next_filter_field(),
            KeyCode::BackTab | KeyCode::Up => app.previous_filter_field(),
            KeyCode::Left if app.filter_field == FilterField::Gender => app.cycle_gender(false),
            KeyCode::Right | KeyCode::Char(' ') if app.filter_field == FilterField::Gender => {
                app.cycle_gender(true)
            }
            KeyCode::Backspace => app.pop_filter_char(),
            KeyCode::Char(c) => app.push_filter_char(c),
            _ => {}
        }
    }

    fn handle_details_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_details(),
            KeyCode::Char('f') => app.toggle_selected_favorite(),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_episodes_down(),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_episodes_up(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => app.close_help(),
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max_scroll = get_help_text().lines().count().saturating_sub(1);
                if app.help_scroll < max_scroll {
                    app.help_scroll += 1;
                }
            }
            KeyCode::Home => app.help_scroll = 0,
            _ => {}
        }
    }
}
