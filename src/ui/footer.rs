use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::{stores::LookupStore, theme::theme};

/// Pagination state on the left, key hints after it.
pub struct Footer {
    page: u32,
    page_size: u32,
    has_previous: bool,
    has_next: bool,
    query_editing: bool,
}

impl Footer {
    pub fn new(store: &LookupStore, query_editing: bool) -> Self {
        let pagination = store.pagination();
        Self {
            page: pagination.current_page(),
            page_size: pagination.page_size().get(),
            has_previous: store.can_previous_page() && !store.is_loading(),
            has_next: store.can_next_page() && !store.is_loading(),
            query_editing,
        }
    }

    fn toggle_style(enabled: bool) -> Style {
        if enabled { theme().page_enabled } else { theme().page_disabled }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        if self.query_editing {
            &[("↵", "search"), ("ESC", "done")]
        } else {
            &[
                ("/", "edit"),
                ("↵", "search"),
                ("← →", "page"),
                ("s", "size"),
                ("↑ ↓", "select"),
                ("o", "profile"),
                ("w", "repo"),
                ("q", "quit"),
            ]
        }
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" ◀ Prev ", Self::toggle_style(self.has_previous)),
            Span::styled(format!("page {} ", self.page), theme().page_enabled),
            Span::styled("Next ▶ ", Self::toggle_style(self.has_next)),
            Span::styled(format!(" {} per page  ", self.page_size), theme().key_description),
        ];

        for (key, description) in self.hints() {
            spans.push(Span::styled(*key, theme().key_hint));
            spans.push(Span::styled(format!(" {description}  "), theme().key_description));
        }

        Line::from(spans).render(area, buf);
    }
}
