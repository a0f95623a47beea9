use std::sync::Arc;

use compact_str::{CompactString, ToCompactString};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    client::{ClientConfig, GithubApi, GithubService},
    dispatcher::Dispatcher,
    event::{EventHandler, LookupEvent},
    logging::{LoggingConfig, init_logging},
    lookup_app::{LookupApp, LookupConfig},
    result::{LookupError, Result},
    tui::Tui,
    ui::StatefulWidgets,
};

pub struct AppComponents {
    pub app: LookupApp,
    pub tui: Tui,
    pub widget_states: StatefulWidgets,
    pub _log_guard: Option<WorkerGuard>,
}

pub fn initialize_app(
    config: LookupConfig,
    username: Option<CompactString>,
    debug: bool,
) -> Result<AppComponents> {
    color_eyre::install().map_err(|e| {
        LookupError::GeneralError(format!("Failed to install error reporting: {e}").into())
    })?;

    let event_handler = EventHandler::new(std::time::Duration::from_millis(33));
    let sender = event_handler.sender();

    let log_guard = initialize_logging(&config)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ghlookup starting up");

    let service = create_github_service(&config, event_handler.sender(), debug)?;
    let tui = initialize_terminal(event_handler)?;
    let widget_states = StatefulWidgets::new();

    let app = LookupApp::new(sender, service, &config);
    match username.or(config.default_username) {
        Some(username) => {
            app.dispatch(LookupEvent::QueryChanged(username));
            app.dispatch(LookupEvent::LookupSubmit);
        },
        None => app.dispatch(LookupEvent::QueryEditOpen),
    }

    Ok(AppComponents {
        app,
        tui,
        widget_states,
        _log_guard: log_guard,
    })
}

fn initialize_logging(config: &LookupConfig) -> Result<Option<WorkerGuard>> {
    let mut logging_config = LoggingConfig::from_env();
    if let Some(log_level) = &config.log_level {
        logging_config = logging_config.with_level(log_level);
    }

    init_logging(logging_config)
}

fn initialize_terminal(event_handler: EventHandler) -> Result<Tui> {
    let backend = CrosstermBackend::new(std::io::stdout());
    let terminal = Terminal::new(backend).map_err(|_| {
        LookupError::GeneralError("failed to initialize terminal".to_compact_string())
    })?;
    let mut tui = Tui::new(terminal, event_handler);
    tui.enter()?;
    Ok(tui)
}

fn create_github_service(
    config: &LookupConfig,
    sender: std::sync::mpsc::Sender<LookupEvent>,
    debug: bool,
) -> Result<GithubService> {
    let client_config = ClientConfig::from(config.clone()).with_debug_logging(debug);
    let api = Arc::new(GithubApi::new(client_config)?);

    Ok(GithubService::from_api(api, sender)?)
}
