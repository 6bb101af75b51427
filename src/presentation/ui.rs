use crate::application::{App, AppMode, FilterField, Loadable, Tab};
use crate::domain::{Character, LifeStatus, PageSlot, page_window};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_chips(f, app, chunks[1]);
    render_characters(f, app, chunks[2]);
    render_pagination(f, app, chunks[3]);
    render_status_bar(f, app, chunks[4]);

    match app.mode {
        AppMode::Details => render_details_popup(f, app),
        AppMode::Filters => render_filters_popup(f, app),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Browse | AppMode::Search => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let coordinator = &app.coordinator;
    let tab = match app.tab {
        Tab::All => "All",
        Tab::Favorites => "Favorites",
    };
    let mut text = format!(
        "rmdex - Rick and Morty Catalog | Tab: {} | {} characters found | Favorites: {}",
        tab,
        coordinator.filtered_count(),
        coordinator.favorites().len()
    );
    if coordinator.is_loading() {
        text.push_str(" | Loading...");
    }
    let header = Paragraph::new(text).style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_chips(f: &mut Frame, app: &App, area: Rect) {
    let filters = app.coordinator.filters();
    let mut spans = Vec::new();
    for (key, status) in [('a', LifeStatus::Alive), ('d', LifeStatus::Dead), ('u', LifeStatus::Unknown)] {
        let style = if filters.status == Some(status) {
            Style::default().bg(Color::Green).fg(Color::Black)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" [{key}] {status} "), style));
        spans.push(Span::raw(" "));
    }

    let mut active = Vec::new();
    if let Some(name) = filters.name() {
        active.push(format!("name={name}"));
    }
    for (label, value) in [("species", &filters.species), ("type", &filters.subtype)] {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            active.push(format!("{label}={value}"));
        }
    }
    if let Some(gender) = filters.gender {
        active.push(format!("gender={}", gender.query_value()));
    }
    if !active.is_empty() {
        spans.push(Span::styled(format!("| {}", active.join(" ")), Style::default().fg(Color::Yellow)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_characters(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.tab {
        Tab::All => "Characters",
        Tab::Favorites => "Favorite characters",
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if let Some(message) = empty_list_message(app) {
        let paragraph = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let characters = app.displayed_characters();
    let visible_rows = (area.height as usize).saturating_sub(3).max(1);
    let offset = app.cursor.saturating_sub(visible_rows - 1);

    let header = Row::new(["", "ID", "Name", "Status", "Species", "Gender"].map(Cell::from))
        .style(Style::default().fg(Color::Yellow))
        .height(1);

    let rows = characters
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(index, character)| character_row(app, character, index == app.cursor));

    let widths = [
        Constraint::Length(2),
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(16),
        Constraint::Length(11),
    ];
    let table = Table::new(rows, widths).header(header).block(block).column_spacing(1);
    f.render_widget(table, area);
}

fn character_row<'a>(app: &App, character: &'a Character, highlighted: bool) -> Row<'a> {
    let marker = if app.coordinator.is_favorite(character.id) { "★" } else { " " };
    let status_style = match character.status {
        LifeStatus::Alive => Style::default().fg(Color::Green),
        LifeStatus::Dead => Style::default().fg(Color::Red),
        LifeStatus::Unknown => Style::default().fg(Color::Gray),
    };
    let row = Row::new(vec![
        Cell::from(marker).style(Style::default().fg(Color::Red)),
        Cell::from(character.id.to_string()),
        Cell::from(character.name.as_str()),
        Cell::from(character.status.to_string()).style(status_style),
        Cell::from(character.species.as_str()),
        Cell::from(character.gender.as_str()),
    ])
    .height(1);

    if highlighted {
        row.style(Style::default().bg(Color::Blue).fg(Color::White))
    } else {
        row
    }
}

fn empty_list_message(app: &App) -> Option<String> {
    match app.tab {
        Tab::All => {
            if !app.coordinator.characters().is_empty() {
                return None;
            }
            if app.coordinator.is_loading() {
                Some("Loading characters...".to_string())
            } else if let Some(error) = app.coordinator.last_error() {
                Some(format!("Oh no! {error}\nPress x to clear filters or r to retry."))
            } else {
                Some("Oh no! No characters found with those filters.\nPress x to clear filters.".to_string())
            }
        }
        Tab::Favorites => match &app.favorite_characters {
            Loadable::Idle | Loadable::Loading => Some("Loading favorites...".to_string()),
            Loadable::Failed(error) => Some(format!("Oh no! {error}")),
            Loadable::Loaded(characters) if characters.is_empty() => Some(
                "You have no favorites yet.\nPress f on a character to add it to your favorites.".to_string(),
            ),
            Loadable::Loaded(_) => None,
        },
    }
}

fn render_pagination(f: &mut Frame, app: &App, area: Rect) {
    if app.tab != Tab::All || app.coordinator.characters().is_empty() {
        return;
    }
    let current = app.coordinator.current_page();
    let total = app.coordinator.total_pages();
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled("« Prev ", if current > 1 { enabled } else { disabled })];
    for slot in page_window(current, total) {
        match slot {
            PageSlot::Page(page) if page == current => spans.push(Span::styled(
                format!("[{page}]"),
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            PageSlot::Page(page) => spans.push(Span::styled(format!(" {page} "), enabled)),
            PageSlot::Gap => spans.push(Span::styled(" … ", disabled)),
        }
    }
    spans.push(Span::styled(" Next »", if current < total { enabled } else { disabled }));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Browse => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else if let (Some(error), false) = (app.coordinator.last_error(), app.coordinator.characters().is_empty()) {
                error.to_string()
            } else {
                "Enter: details | f: favorite | /: search | F: filters | a/d/u: status | ←/→: page | Tab: favorites | ?: help | q: quit".to_string()
            }
        }
        AppMode::Search => format!("Search by name: {} (Enter to search, Esc to cancel)", app.search_input),
        AppMode::Filters => "Tab/↑↓: field | ←/→: gender | Enter: apply | Ctrl+X: clear filters | Esc: cancel".to_string(),
        AppMode::Details => "f: toggle favorite | ↑↓/jk: scroll episodes | Esc/Enter/q: close".to_string(),
        AppMode::Help => "↑↓/jk: scroll | Home: top | Esc/q: close help".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Browse => Style::default(),
            AppMode::Search => Style::default().fg(Color::Green),
            AppMode::Filters => Style::default().fg(Color::Yellow),
            AppMode::Details => Style::default().fg(Color::Magenta),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn popup_area(area: Rect) -> Rect {
    Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    }
}

fn render_details_popup(f: &mut Frame, app: &App) {
    let Some(character) = app.coordinator.selected_character() else {
        return;
    };
    let popup = popup_area(f.area());
    f.render_widget(Clear, popup);

    let favorite = if app.coordinator.is_favorite(character.id) { "★ " } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{}{} (#{})", favorite, character.name, character.id))
        .style(Style::default().fg(Color::White));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);

    let label = Style::default().fg(Color::Gray);
    let mut info = vec![
        Line::from(vec![Span::styled("Gender:   ", label), Span::raw(character.gender.as_str())]),
        Line::from(vec![Span::styled("Status:   ", label), Span::raw(character.status.to_string())]),
        Line::from(vec![Span::styled("Species:  ", label), Span::raw(character.species.as_str())]),
    ];
    if let Some(subtype) = character.subtype() {
        info.push(Line::from(vec![Span::styled("Type:     ", label), Span::raw(subtype)]));
    }
    info.push(Line::from(vec![Span::styled("Origin:   ", label), Span::raw(character.origin.name.as_str())]));
    info.push(Line::from(vec![Span::styled("Location: ", label), Span::raw(character.location.name.as_str())]));
    info.push(Line::from(vec![Span::styled("Image:    ", label), Span::raw(character.image.as_str())]));
    let info = Paragraph::new(info)
        .block(Block::default().borders(Borders::ALL).title("Information"))
        .wrap(Wrap { trim: true });
    f.render_widget(info, columns[0]);

    let episodes: Vec<Line> = match &app.episodes {
        Loadable::Idle | Loadable::Loading => vec![Line::from("Loading episodes...")],
        Loadable::Failed(error) => vec![Line::styled(error.as_str(), Style::default().fg(Color::Red))],
        Loadable::Loaded(episodes) if episodes.is_empty() => vec![Line::from("No episodes")],
        Loadable::Loaded(episodes) => episodes
            .iter()
            .skip(app.episode_scroll)
            .map(|episode| {
                Line::from(vec![
                    Span::styled(format!("{} ", episode.episode), Style::default().fg(Color::Green)),
                    Span::raw(episode.name.as_str()),
                    Span::styled(format!(" • {}", episode.air_date), label),
                ])
            })
            .collect(),
    };
    let count = match &app.episodes {
        Loadable::Loaded(episodes) => format!("Episodes ({})", episodes.len()),
        _ => "Episodes".to_string(),
    };
    let episodes = Paragraph::new(episodes).block(Block::default().borders(Borders::ALL).title(count));
    f.render_widget(episodes, columns[1]);
}

fn render_filters_popup(f: &mut Frame, app: &App) {
    let area = f.area();
    let width = area.width / 2;
    let height = 7.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    f.render_widget(Clear, popup);

    let draft = &app.filter_draft;
    let gender = draft.gender.map(|g| g.query_value()).unwrap_or("any");
    let fields = [
        (FilterField::Species, "Species", draft.species.as_deref().unwrap_or("").to_string()),
        (FilterField::Subtype, "Type   ", draft.subtype.as_deref().unwrap_or("").to_string()),
        (FilterField::Gender, "Gender ", format!("< {gender} >")),
    ];
    let lines: Vec<Line> = fields
        .into_iter()
        .map(|(field, label, value)| {
            let style = if field == app.filter_field {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            Line::styled(format!("{label}: {value}"), style)
        })
        .collect();

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Advanced filters")
            .style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(dialog, popup);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = popup_area(f.area());
    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("rmdex Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

pub fn get_help_text() -> &'static str {
    r#"RMDEX - RICK AND MORTY CATALOG

=== BROWSING ===
↑↓ or j/k       Move through the character list
Enter           Show character details and episodes
f               Add or remove the highlighted character from favorites
Tab             Switch between all characters and your favorites
r               Reload the current view

=== PAGINATION ===
← or h          Previous page
→ or l          Next page
Home / g        First page
End / G         Last page

=== FILTERS ===
/               Search characters by name (Enter applies)
a               Only alive characters (press again to clear)
d               Only dead characters (press again to clear)
u               Only characters with unknown status (press again to clear)
F               Advanced filters: species, type and gender
x               Clear every filter

Changing filters keeps the current page unless
RMDEX_RESET_PAGE_ON_FILTER=true is set.

=== ADVANCED FILTERS DIALOG ===
Tab / ↑↓        Move between fields
Type            Edit species or type
← / →           Choose a gender
Enter           Apply the filters
Ctrl+X          Clear every filter
Esc             Close without applying

=== DETAILS ===
f               Toggle favorite
↑↓ or j/k       Scroll episodes
Esc/Enter/q     Close

=== FAVORITES ===
Favorites are saved to rickAndMortyFavorites.json (or
RMDEX_FAVORITES_FILE) every time you change them and are
restored on the next start.

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text
Home            Jump to top of help text
Esc/?/q         Close this help window"#
}
