use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Cell, Row, StatefulWidget, Table, TableState},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    domain::{Repository, RepositoryPage, Visibility},
    theme::theme,
};

const NAME_WIDTH: usize = 28;
const DESCRIPTION_WIDTH: usize = 60;

pub struct RepositoryTable<'a> {
    page: Option<&'a RepositoryPage>,
}

impl<'a> RepositoryTable<'a> {
    pub fn new(page: Option<&'a RepositoryPage>) -> Self {
        Self { page }
    }

    fn row(repository: &Repository) -> Row<'static> {
        let visibility_style = match repository.visibility {
            Visibility::Public => theme().visibility_public,
            _ => theme().visibility_private,
        };

        let mut badges = vec![Span::styled(repository.visibility.label(), visibility_style)];
        if repository.is_fork {
            badges.push(Span::raw(" "));
            badges.push(Span::styled("Fork", theme().badge_fork));
        }

        let language = repository
            .primary_language
            .as_deref()
            .unwrap_or_default()
            .to_string();
        let description = repository
            .description
            .as_deref()
            .map(|d| truncate(d, DESCRIPTION_WIDTH))
            .unwrap_or_default();

        Row::new(vec![
            Cell::from(truncate(&repository.name, NAME_WIDTH)).style(theme().repository_name),
            Cell::from(Line::from(badges)),
            Cell::from(language).style(theme().repository_language),
            Cell::from(format!("★ {}", repository.stars)).style(theme().repository_stars),
            Cell::from(description).style(theme().repository_description),
        ])
    }
}

impl StatefulWidget for RepositoryTable<'_> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let title = match self.page {
            Some(page) => format!(" Repositories · page {} ", page.request.page),
            None => " Repositories ".to_string(),
        };
        let block = Block::bordered()
            .title(Span::styled(title, theme().title))
            .border_style(theme().border);

        let rows: Vec<Row> = self
            .page
            .map(|page| page.repositories().iter().map(Self::row).collect())
            .unwrap_or_else(Vec::new);

        let header = Row::new(["Name", "Visibility", "Language", "Stars", "Description"])
            .style(theme().key_description);

        Table::new(rows, [
            Constraint::Length(NAME_WIDTH as u16),
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(9),
            Constraint::Min(10),
        ])
        .header(header)
        .block(block)
        .row_highlight_style(theme().repository_selected)
        .highlight_symbol("▶ ")
        .render(area, buf, state);
    }
}

/// Cuts `text` to at most `max_width` terminal columns, ending in an ellipsis when shortened.
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
