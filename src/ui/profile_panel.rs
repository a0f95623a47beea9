use compact_str::ToCompactString;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::{
    domain::{Profile, RepositoryPage},
    theme::theme,
};

const STATS_WIDTH: usize = 32;
const MAX_LANGUAGES: usize = 5;

/// Profile summary shown to the left of the repository table.
pub struct ProfilePanel<'a> {
    profile: Option<&'a Profile>,
    page: Option<&'a RepositoryPage>,
}

impl<'a> ProfilePanel<'a> {
    pub fn new(profile: Option<&'a Profile>, page: Option<&'a RepositoryPage>) -> Self {
        Self { profile, page }
    }

    fn identity(profile: &Profile) -> Text<'static> {
        let mut lines = vec![Line::from(profile.login.to_string()).style(theme().profile_login)];
        if let Some(name) = &profile.name {
            lines.push(Line::from(name.to_string()).style(theme().profile_name));
        }
        lines.push(Line::from(profile.profile_url.to_string()).style(theme().date));
        if !profile.avatar_url.is_empty() {
            lines.push(Line::from(format!("avatar {}", profile.avatar_url)).style(theme().date));
        }
        if let Some(created) = profile.created_at {
            lines.push(
                Line::from(format!("joined {}", created.format("%b %-d, %Y"))).style(theme().date),
            );
        }
        lines.push(Line::default());
        if let Some(bio) = &profile.bio {
            lines.push(Line::from(bio.to_string()).style(theme().profile_bio));
        }
        Text::from(lines)
    }

    fn stats(profile: &Profile) -> Text<'static> {
        let styles = theme().profile_stat;
        Text::from(vec![
            create_aligned_line("Followers:", &profile.followers.to_compact_string(), styles),
            create_aligned_line("Following:", &profile.following.to_compact_string(), styles),
            create_aligned_line(
                "Public repos:",
                &profile.public_repo_count.to_compact_string(),
                styles,
            ),
            create_aligned_line(
                "Public gists:",
                &profile.public_gist_count.to_compact_string(),
                styles,
            ),
        ])
    }

    fn languages(page: &RepositoryPage) -> Text<'static> {
        let summary = page.language_summary();
        if summary.is_empty() {
            return Text::default();
        }

        let mut lines = vec![Line::from("Languages on this page").style(theme().title)];
        lines.extend(
            summary
                .into_iter()
                .take(MAX_LANGUAGES)
                .map(|(language, count)| {
                    create_aligned_line(
                        &language,
                        &count.to_compact_string(),
                        [theme().repository_language, theme().repository_language],
                    )
                }),
        );
        Text::from(lines)
    }
}

impl Widget for ProfilePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Span::styled(" Profile ", theme().title))
            .border_style(theme().border);
        block.render(area, buf);

        let Some(profile) = self.profile else {
            return;
        };

        let identity = Self::identity(profile);
        let stats = Self::stats(profile);
        let languages = self.page.map(Self::languages).unwrap_or_default();

        let [identity_area, stats_area, languages_area] = Layout::vertical([
            Constraint::Min(identity.height() as u16),
            Constraint::Length(stats.height() as u16 + 1),
            Constraint::Length(languages.height() as u16),
        ])
        .areas(area.inner(Margin::new(2, 1)));

        Paragraph::new(identity)
            .wrap(Wrap { trim: true })
            .render(identity_area, buf);
        stats.render(stats_area, buf);
        languages.render(languages_area, buf);
    }
}

/// Label on the left, value right-aligned within [`STATS_WIDTH`].
fn create_aligned_line(label: &str, value: &str, styles: [Style; 2]) -> Line<'static> {
    let total_content = label.chars().count() + value.chars().count();
    let spacing = STATS_WIDTH.saturating_sub(total_content).max(1);

    Line::from(vec![
        Span::from(label.to_string()).style(styles[1]),
        Span::from(" ".repeat(spacing)).style(styles[1]),
        Span::from(value.to_string()).style(styles[0]),
    ])
}
