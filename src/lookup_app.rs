use std::sync::mpsc::Sender;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    client::{GithubService, config::DEFAULT_BASE_URL},
    dispatcher::Dispatcher,
    event::LookupEvent,
    input::{InputMultiplexer, processor::BrowseProcessor},
    pagination::{NextPageRule, PageSize},
    stores::{LookupStore, log_event},
    ui::StatefulWidgets,
};

/// Persisted settings, stored as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub github_url: CompactString,
    /// Looked up on startup when no username is given on the command line
    pub default_username: Option<CompactString>,
    pub page_size: PageSize,
    pub next_page_rule: NextPageRule,
    /// Simulated latency before each profile lookup
    pub lookup_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub log_level: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            github_url: DEFAULT_BASE_URL.into(),
            default_username: None,
            page_size: PageSize::Ten,
            next_page_rule: NextPageRule::PageLength,
            lookup_delay_ms: 2000,
            request_timeout_secs: 30,
            log_level: None,
        }
    }
}

pub struct LookupApp {
    sender: Sender<LookupEvent>,
    store: LookupStore,
    service: GithubService,
    input: InputMultiplexer,
}

impl LookupApp {
    pub fn new(sender: Sender<LookupEvent>, service: GithubService, config: &LookupConfig) -> Self {
        let mut input = InputMultiplexer::new(sender.clone());
        input.push(Box::new(BrowseProcessor::new(sender.clone())));

        Self {
            store: LookupStore::new(sender.clone(), config.page_size, config.next_page_rule),
            sender,
            service,
            input,
        }
    }

    pub fn apply(&mut self, event: &LookupEvent, ui: &mut StatefulWidgets) {
        log_event(event);

        self.store.apply(event);
        self.input.apply(event, ui);
        ui.apply(event, &self.store);

        match event {
            LookupEvent::ProfileFetch(generation, username) => {
                self.service
                    .spawn_lookup_profile(*generation, username.clone())
            },
            LookupEvent::RepositoriesFetch(generation, request) => self
                .service
                .spawn_fetch_repositories(*generation, request.clone()),
            LookupEvent::ProfileOpenUrl => {
                if let Some(profile) = self.store.profile() {
                    open_url(&profile.profile_url);
                }
            },
            LookupEvent::RepositoryOpenUrl => {
                let selected = ui
                    .selected_repository()
                    .and_then(|i| self.store.repositories().and_then(|p| p.get(i)));
                if let Some(repository) = selected {
                    open_url(&repository.url);
                }
            },
            _ => {},
        }
    }

    pub fn store(&self) -> &LookupStore {
        &self.store
    }
}

fn open_url(url: &str) {
    if url.is_empty() {
        return;
    }
    match open::that(url) {
        Ok(()) => debug!(url = %url, "Opened in browser"),
        Err(e) => warn!(url = %url, error = %e, "Failed to open browser"),
    }
}

impl Dispatcher for LookupApp {
    fn dispatch(&self, event: LookupEvent) {
        self.sender.dispatch(event);
    }
}
