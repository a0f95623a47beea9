//! Rendering of the lookup screen.
//!
//! Layout, top to bottom: query field, status line, profile panel beside the
//! repository table, pagination footer.

mod footer;
mod profile_panel;
mod repository_table;

use compact_str::CompactString;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, TableState},
};
use tui_input::Input;

pub use footer::Footer;
pub use profile_panel::ProfilePanel;
pub use repository_table::RepositoryTable;

use crate::{
    event::LookupEvent,
    stores::{LookupStore, Status},
    theme::theme,
};

const PROFILE_PANEL_WIDTH: u16 = 38;

/// Widget state that outlives a single frame.
pub struct StatefulWidgets {
    pub query_input: Input,
    pub query_editing: bool,
    pub repository_table_state: TableState,
}

impl StatefulWidgets {
    pub fn new() -> Self {
        Self {
            query_input: Input::default(),
            query_editing: false,
            repository_table_state: TableState::default(),
        }
    }

    /// Runs after the store has applied `event`.
    pub fn apply(&mut self, event: &LookupEvent, store: &LookupStore) {
        match event {
            LookupEvent::QueryEditOpen => self.query_editing = true,
            LookupEvent::QueryEditClose => self.query_editing = false,
            LookupEvent::QueryChanged(query) if self.query_input.value() != query.as_str() => {
                self.query_input = Input::new(query.to_string());
            },
            LookupEvent::LookupSubmit
            | LookupEvent::ProfileFailed(_, _)
            | LookupEvent::RepositoriesFailed(_, _) => self.repository_table_state.select(None),
            LookupEvent::RepositoriesLoaded(_, request, _) => {
                let applied = store.repositories().filter(|page| &page.request == request);
                if let Some(page) = applied {
                    let selected = (!page.is_empty()).then_some(0);
                    self.repository_table_state.select(selected);
                    *self.repository_table_state.offset_mut() = 0;
                }
            },
            LookupEvent::RepositoryNext => self.move_selection(1, store),
            LookupEvent::RepositoryPrevious => self.move_selection(-1, store),
            _ => (),
        }
    }

    pub fn selected_repository(&self) -> Option<usize> {
        self.repository_table_state.selected()
    }

    fn move_selection(&mut self, delta: isize, store: &LookupStore) {
        let len = store.repositories().map_or(0, |page| page.len());
        if len == 0 {
            self.repository_table_state.select(None);
            return;
        }

        let current = self.selected_repository().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.repository_table_state.select(Some(next as usize));
    }
}

impl Default for StatefulWidgets {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame, store: &LookupStore, widgets: &mut StatefulWidgets) {
    let [query_area, status_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_query(frame, query_area, widgets);
    frame.render_widget(status_line(store), status_area);

    let [profile_area, table_area] =
        Layout::horizontal([Constraint::Length(PROFILE_PANEL_WIDTH), Constraint::Min(0)])
            .areas(body_area);

    frame.render_widget(ProfilePanel::new(store.profile(), store.repositories()), profile_area);
    frame.render_stateful_widget(
        RepositoryTable::new(store.repositories()),
        table_area,
        &mut widgets.repository_table_state,
    );
    frame.render_widget(Footer::new(store, widgets.query_editing), footer_area);
}

fn render_query(frame: &mut Frame, area: Rect, widgets: &StatefulWidgets) {
    let border = if widgets.query_editing { theme().border_focused } else { theme().border };
    let block = Block::bordered()
        .title(Span::styled(" GitHub username ", theme().title))
        .border_style(border);

    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;
    let scroll = widgets.query_input.visual_scroll(width);

    let value = widgets.query_input.value();
    let content = if value.is_empty() && !widgets.query_editing {
        Paragraph::new(Span::styled("press / to type a username", theme().query_placeholder))
    } else {
        Paragraph::new(Span::styled(value, theme().query)).scroll((0, scroll as u16))
    };
    frame.render_widget(content.block(block), area);

    if widgets.query_editing {
        let cursor = widgets.query_input.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position((inner.x + cursor, inner.y));
    }
}

fn status_line(store: &LookupStore) -> Line<'static> {
    if let Some(message) = store.error_message() {
        return Line::from(Span::styled(format!(" {message}"), theme().status_error));
    }

    let (text, style): (CompactString, _) = match store.status() {
        Status::Idle => ("Enter a username and press Enter".into(), theme().key_description),
        Status::Loading => ("Loading...".into(), theme().status_loading),
        Status::Ready => {
            let count = store.repositories().map_or(0, |page| page.len());
            let text = match (store.username(), count) {
                (Some(user), 0) => format!("{user} has no public repositories on this page"),
                (Some(user), n) => format!("{n} repositories for {user}"),
                (None, _) => String::new(),
            };
            (text.into(), theme().status_ready)
        },
        Status::Error(_) => return Line::default(),
    };

    Line::from(Span::styled(format!(" {text}"), style))
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::{
        domain::RepositoryDto,
        id::{Generation, RepositoryId},
        pagination::{FetchRequest, NextPageRule, PageSize},
        result::{LookupError, NOT_FOUND_MESSAGE},
    };

    fn dto(id: u64) -> RepositoryDto {
        RepositoryDto {
            id: RepositoryId::new(id),
            name: format!("repo-{id}").into(),
            html_url: "".into(),
            description: None,
            visibility: Default::default(),
            fork: false,
            language: None,
            stargazers_count: 0,
        }
    }

    /// Store with a profile and one loaded page of `count` repositories.
    fn loaded_store(count: u64) -> (LookupStore, StatefulWidgets) {
        let (sender, receiver) = mpsc::channel();
        let mut store = LookupStore::new(sender, PageSize::Ten, NextPageRule::PageLength);
        let mut ui = StatefulWidgets::new();

        store.apply(&LookupEvent::QueryChanged("octocat".into()));
        store.apply(&LookupEvent::LookupSubmit);
        let Ok(LookupEvent::ProfileFetch(generation, _)) = receiver.try_recv() else {
            panic!("expected profile fetch");
        };
        let profile = serde_json::from_value(serde_json::json!({"login": "octocat"})).unwrap();
        store.apply(&LookupEvent::ProfileLoaded(generation, Box::new(profile)));
        let Ok(LookupEvent::RepositoriesFetch(generation, request)) = receiver.try_recv() else {
            panic!("expected repositories fetch");
        };

        let event = LookupEvent::RepositoriesLoaded(generation, request, (0..count).map(dto).collect());
        store.apply(&event);
        ui.apply(&event, &store);
        (store, ui)
    }

    #[test]
    fn loaded_page_selects_first_row() {
        let (_store, ui) = loaded_store(3);
        assert_eq!(ui.selected_repository(), Some(0));
    }

    #[test]
    fn empty_page_has_no_selection() {
        let (_store, ui) = loaded_store(0);
        assert_eq!(ui.selected_repository(), None);
    }

    #[test]
    fn selection_stays_within_page() {
        let (store, mut ui) = loaded_store(3);

        ui.apply(&LookupEvent::RepositoryPrevious, &store);
        assert_eq!(ui.selected_repository(), Some(0));

        for _ in 0..5 {
            ui.apply(&LookupEvent::RepositoryNext, &store);
        }
        assert_eq!(ui.selected_repository(), Some(2));
    }

    #[test]
    fn stale_page_does_not_move_selection() {
        let (store, mut ui) = loaded_store(3);
        ui.apply(&LookupEvent::RepositoryNext, &store);

        let stale = FetchRequest {
            username: "someone-else".into(),
            page: 1,
            page_size: PageSize::Ten,
        };
        ui.apply(&LookupEvent::RepositoriesLoaded(Generation::new(0), stale, vec![]), &store);

        assert_eq!(ui.selected_repository(), Some(1));
    }

    #[test]
    fn status_line_shows_lookup_error() {
        let (sender, receiver) = mpsc::channel();
        let mut store = LookupStore::new(sender, PageSize::Ten, NextPageRule::PageLength);
        store.apply(&LookupEvent::QueryChanged("ghost".into()));
        store.apply(&LookupEvent::LookupSubmit);
        let Ok(LookupEvent::ProfileFetch(generation, _)) = receiver.try_recv() else {
            panic!("expected profile fetch");
        };
        store.apply(&LookupEvent::ProfileFailed(generation, LookupError::ProfileNotFound));

        let line = status_line(&store);

        assert_eq!(line.spans[0].content, format!(" {NOT_FOUND_MESSAGE}"));
    }

    #[test]
    fn query_changed_replaces_input_value() {
        let (sender, _receiver) = mpsc::channel();
        let store = LookupStore::new(sender, PageSize::Ten, NextPageRule::PageLength);
        let mut ui = StatefulWidgets::new();

        ui.apply(&LookupEvent::QueryChanged("torvalds".into()), &store);

        assert_eq!(ui.query_input.value(), "torvalds");
    }
}
