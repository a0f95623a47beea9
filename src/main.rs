use std::path::PathBuf;

use clap::Parser;

mod app_init;
mod client;
mod config;
mod dispatcher;
mod domain;
mod event;
mod id;
mod input;
mod logging;
mod lookup_app;
mod pagination;
mod result;
mod stores;
mod theme;
mod tui;
mod ui;

use crate::{
    app_init::{AppComponents, initialize_app},
    config::{default_config_path, load_config, save_config},
    event::LookupEvent,
    lookup_app::{LookupApp, LookupConfig},
    pagination::PageSize,
    result::Result,
    tui::Tui,
    ui::StatefulWidgets,
};

/// Look up a GitHub user and browse their public repositories
#[derive(Parser)]
#[command(name = "ghlookup", version, about, long_about = None)]
struct Cli {
    /// Username to look up on startup
    username: Option<String>,

    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repositories per page (10, 50 or 100)
    #[arg(short, long)]
    page_size: Option<PageSize>,

    /// Skip the simulated latency before profile lookups
    #[arg(long)]
    no_delay: bool,

    /// Write raw API responses to the debug log directory
    #[arg(short, long)]
    debug: bool,

    /// Write the effective configuration back to the config file
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    fn apply_overrides(&self, mut config: LookupConfig) -> LookupConfig {
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if self.no_delay {
            config.lookup_delay_ms = 0;
        }
        config
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = cli.apply_overrides(load_config(&config_path)?);
    if cli.save_config {
        save_config(&config_path, &config)?;
    }

    let AppComponents {
        mut app,
        mut tui,
        mut widget_states,
        _log_guard,
    } = initialize_app(config, cli.username.map(Into::into), cli.debug)?;

    let result = run(&mut app, &mut tui, &mut widget_states);
    tracing::info!("ghlookup shutting down");
    tui.exit()?;
    Ok(result?)
}

/// Drains the event queue, redrawing once per tick, until the app exits.
fn run(app: &mut LookupApp, tui: &mut Tui, widget_states: &mut StatefulWidgets) -> Result<()> {
    while let Ok(event) = tui.events.next() {
        let mut exit = false;
        let mut redraw = false;
        let mut pending = Some(event);
        while let Some(event) = pending {
            match event {
                LookupEvent::AppExit => exit = true,
                LookupEvent::AppTick => redraw = true,
                _ => app.apply(&event, widget_states),
            }
            pending = tui.events.try_next();
        }

        if exit {
            break;
        }
        if redraw {
            tui.draw(app.store(), widget_states)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config_values() {
        let cli = Cli::parse_from(["ghlookup", "octocat", "--page-size", "50", "--no-delay"]);
        let config = cli.apply_overrides(LookupConfig::default());

        assert_eq!(cli.username.as_deref(), Some("octocat"));
        assert_eq!(config.page_size, PageSize::Fifty);
        assert_eq!(config.lookup_delay_ms, 0);
    }

    #[test]
    fn cli_rejects_unsupported_page_size() {
        assert!(Cli::try_parse_from(["ghlookup", "--page-size", "25"]).is_err());
    }
}
