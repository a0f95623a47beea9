use std::sync::mpsc::Sender;

use compact_str::{CompactString, ToCompactString};
use tracing::{debug, info, instrument, warn};

use crate::{
    dispatcher::Dispatcher,
    domain::{Profile, RepositoryPage},
    event::LookupEvent,
    id::Generation,
    pagination::{FetchRequest, NextPageRule, PageSize, PaginationState, derive_fetch_request},
    result::LookupError,
};

/// Display state derived from the most recent fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Error(CompactString),
    Ready,
}

/// Single owner of the lookup state.
///
/// Every fetch is issued as an event tagged with a fresh [`Generation`];
/// completions are applied only when their generation is the one still
/// awaited, so a superseded request can never overwrite newer state.
pub struct LookupStore {
    sender: Sender<LookupEvent>,
    next_page_rule: NextPageRule,
    query: CompactString,
    username: Option<CompactString>,
    profile: Option<Profile>,
    repositories: Option<RepositoryPage>,
    pagination: PaginationState,
    status: Status,
    generation: Generation,
    awaiting: Option<Generation>,
    last_request: Option<FetchRequest>,
}

impl LookupStore {
    pub fn new(sender: Sender<LookupEvent>, page_size: PageSize, next_page_rule: NextPageRule) -> Self {
        Self {
            sender,
            next_page_rule,
            query: CompactString::default(),
            username: None,
            profile: None,
            repositories: None,
            pagination: PaginationState::new(page_size),
            status: Status::Idle,
            generation: Generation::new(0),
            awaiting: None,
            last_request: None,
        }
    }

    #[instrument(skip(self, event), fields(event_type = %event.variant_name()))]
    pub fn apply(&mut self, event: &LookupEvent) {
        match event {
            LookupEvent::QueryChanged(query) => self.query = query.clone(),

            // clears the previous result and starts a new lookup with the query as typed
            LookupEvent::LookupSubmit => {
                let username = self.query.clone();
                self.username = Some(username.clone());
                self.profile = None;
                self.repositories = None;
                self.last_request = None;
                self.pagination.reset_page();
                self.status = Status::Loading;

                let generation = self.begin_fetch();
                self.dispatch(LookupEvent::ProfileFetch(generation, username));
            },

            // a profile always continues into the first repository page
            LookupEvent::ProfileLoaded(generation, profile) => {
                if !self.is_awaited(*generation) {
                    return;
                }
                debug!(login = %profile.login, "Applying profile");
                self.profile = Some(Profile::from(profile.as_ref().clone()));
                self.last_request = None;
                self.sync_repositories();
            },

            LookupEvent::ProfileFailed(generation, error) => {
                if !self.is_awaited(*generation) {
                    return;
                }
                self.profile = None;
                self.repositories = None;
                self.fail(error);
            },

            LookupEvent::RepositoriesLoaded(generation, request, repositories) => {
                if !self.is_awaited(*generation) {
                    return;
                }
                self.repositories = Some(RepositoryPage::new(request.clone(), repositories.clone()));
                self.awaiting = None;
                self.status = Status::Ready;
            },

            // the profile survives a failed repository page
            LookupEvent::RepositoriesFailed(generation, error) => {
                if !self.is_awaited(*generation) {
                    return;
                }
                self.repositories = None;
                self.fail(error);
            },

            LookupEvent::PageNext => {
                let advanced = self.pagination.next_page(
                    self.next_page_rule,
                    self.repositories.as_ref(),
                    self.profile.as_ref(),
                );
                if advanced {
                    self.sync_repositories();
                }
            },
            LookupEvent::PagePrevious => {
                if self.pagination.previous_page() {
                    self.sync_repositories();
                }
            },
            LookupEvent::PageSizeSet(size) => {
                self.pagination.set_page_size(*size);
                self.sync_repositories();
            },
            LookupEvent::PageSizeCycle => {
                self.pagination.cycle_page_size();
                self.sync_repositories();
            },
            _ => {},
        }
    }

    /// Issues the repository request implied by the current username and
    /// pagination when a profile is shown and the request differs from the
    /// last one issued.
    fn sync_repositories(&mut self) {
        if self.profile.is_none() {
            return;
        }

        let Some(request) = derive_fetch_request(self.username.as_deref(), &self.pagination)
        else {
            return;
        };

        if self.last_request.as_ref() == Some(&request) {
            debug!(page = request.page, "Repository request unchanged, not re-fetching");
            return;
        }

        self.last_request = Some(request.clone());
        self.status = Status::Loading;
        let generation = self.begin_fetch();
        self.dispatch(LookupEvent::RepositoriesFetch(generation, request));
    }

    fn begin_fetch(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.awaiting = Some(self.generation);
        self.generation
    }

    fn is_awaited(&self, generation: Generation) -> bool {
        let awaited = self.awaiting == Some(generation);
        if !awaited {
            debug!(
                generation = %generation,
                awaiting = ?self.awaiting,
                "Discarding stale fetch result"
            );
        }
        awaited
    }

    fn fail(&mut self, error: &LookupError) {
        self.awaiting = None;
        self.status = Status::Error(error.to_compact_string());
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn repositories(&self) -> Option<&RepositoryPage> {
        self.repositories.as_ref()
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.has_next(
            self.next_page_rule,
            self.repositories.as_ref(),
            self.profile.as_ref(),
        )
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.has_previous()
    }
}

#[instrument(skip(event))]
pub fn log_event(event: &LookupEvent) {
    match event {
        LookupEvent::LookupSubmit => info!("Lookup submitted"),
        LookupEvent::ProfileFetch(generation, username) => {
            info!(generation = %generation, username = %username, "Requesting profile")
        },
        LookupEvent::ProfileLoaded(generation, profile) => {
            info!(generation = %generation, login = %profile.login, "Received profile")
        },
        LookupEvent::ProfileFailed(generation, err) => {
            warn!(generation = %generation, error = %err, "Profile lookup failed")
        },
        LookupEvent::RepositoriesFetch(generation, request) => debug!(
            generation = %generation,
            username = %request.username,
            page = request.page,
            page_size = %request.page_size,
            "Requesting repository page"
        ),
        LookupEvent::RepositoriesLoaded(generation, request, repositories) => info!(
            generation = %generation,
            page = request.page,
            count = repositories.len(),
            "Received repository page"
        ),
        LookupEvent::RepositoriesFailed(generation, err) => {
            warn!(generation = %generation, error = %err, "Repository page fetch failed")
        },
        LookupEvent::PageNext => debug!("Next page requested"),
        LookupEvent::PagePrevious => debug!("Previous page requested"),
        LookupEvent::PageSizeSet(size) => debug!(page_size = %size, "Page size selected"),
        LookupEvent::PageSizeCycle => debug!("Page size cycled"),
        LookupEvent::ProfileOpenUrl => info!("Opening profile in browser"),
        LookupEvent::RepositoryOpenUrl => info!("Opening repository in browser"),
        LookupEvent::AppExit => info!("Application shutting down"),
        _ => {}, // Don't log every event
    }
}

impl Dispatcher for LookupStore {
    fn dispatch(&self, event: LookupEvent) {
        self.sender.dispatch(event);
    }
}
