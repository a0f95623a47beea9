use once_cell::sync::Lazy;
use ratatui::style::{Color, Modifier, Style};

static THEME: Lazy<Theme> = Lazy::new(Theme::default);

pub fn theme() -> &'static Theme {
    &THEME
}

pub struct Theme {
    pub border: Style,
    pub border_focused: Style,
    pub title: Style,
    pub query: Style,
    pub query_placeholder: Style,
    pub status_loading: Style,
    pub status_error: Style,
    pub status_ready: Style,
    pub profile_login: Style,
    pub profile_name: Style,
    pub profile_bio: Style,
    /// value, label
    pub profile_stat: [Style; 2],
    pub date: Style,
    pub repository_name: Style,
    pub repository_description: Style,
    pub repository_language: Style,
    pub repository_stars: Style,
    pub repository_selected: Style,
    pub visibility_public: Style,
    pub visibility_private: Style,
    pub badge_fork: Style,
    pub page_enabled: Style,
    pub page_disabled: Style,
    pub key_hint: Style,
    pub key_description: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let dim = Style::new().fg(Color::DarkGray);

        Self {
            border: dim,
            border_focused: Style::new().fg(Color::Cyan),
            title: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            query: Style::new().fg(Color::White),
            query_placeholder: dim.add_modifier(Modifier::ITALIC),
            status_loading: Style::new().fg(Color::Yellow),
            status_error: Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            status_ready: Style::new().fg(Color::Green),
            profile_login: Style::new().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
            profile_name: Style::new().fg(Color::White),
            profile_bio: Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            profile_stat: [Style::new().fg(Color::LightYellow), dim],
            date: Style::new().fg(Color::Gray),
            repository_name: Style::new().fg(Color::LightBlue),
            repository_description: Style::new().fg(Color::Gray),
            repository_language: Style::new().fg(Color::Magenta),
            repository_stars: Style::new().fg(Color::Yellow),
            repository_selected: Style::new()
                .bg(Color::Rgb(40, 44, 52))
                .add_modifier(Modifier::BOLD),
            visibility_public: Style::new().fg(Color::Green),
            visibility_private: Style::new().fg(Color::LightRed),
            badge_fork: Style::new().fg(Color::Cyan),
            page_enabled: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            page_disabled: dim,
            key_hint: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            key_description: dim,
        }
    }
}
