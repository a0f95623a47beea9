use std::{fmt::Debug, sync::mpsc, thread};

use compact_str::CompactString;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tracing::error;

use crate::{
    dispatcher::Dispatcher,
    domain::{ProfileDto, RepositoryDto},
    id::Generation,
    pagination::{FetchRequest, PageSize},
    result::LookupError,
};

#[derive(Debug, Clone)]
pub enum LookupEvent {
    AppExit,
    AppTick,
    InputKey(KeyEvent),
    LookupSubmit,
    PageNext,
    PagePrevious,
    PageSizeCycle,
    PageSizeSet(PageSize),
    ProfileFailed(Generation, LookupError),
    ProfileFetch(Generation, CompactString),
    ProfileLoaded(Generation, Box<ProfileDto>),
    ProfileOpenUrl,
    QueryChanged(CompactString),
    QueryEditClose,
    QueryEditOpen,
    RepositoriesFailed(Generation, LookupError),
    RepositoriesFetch(Generation, FetchRequest),
    RepositoriesLoaded(Generation, FetchRequest, Vec<RepositoryDto>),
    RepositoryNext,
    RepositoryOpenUrl,
    RepositoryPrevious,
}

impl LookupEvent {
    /// Get the variant name as a string slice (without "LookupEvent::" prefix)
    pub fn variant_name(&self) -> &'static str {
        match self {
            LookupEvent::AppExit => "AppExit",
            LookupEvent::AppTick => "AppTick",
            LookupEvent::InputKey(_) => "InputKey",
            LookupEvent::LookupSubmit => "LookupSubmit",
            LookupEvent::PageNext => "PageNext",
            LookupEvent::PagePrevious => "PagePrevious",
            LookupEvent::PageSizeCycle => "PageSizeCycle",
            LookupEvent::PageSizeSet(_) => "PageSizeSet",
            LookupEvent::ProfileFailed(_, _) => "ProfileFailed",
            LookupEvent::ProfileFetch(_, _) => "ProfileFetch",
            LookupEvent::ProfileLoaded(_, _) => "ProfileLoaded",
            LookupEvent::ProfileOpenUrl => "ProfileOpenUrl",
            LookupEvent::QueryChanged(_) => "QueryChanged",
            LookupEvent::QueryEditClose => "QueryEditClose",
            LookupEvent::QueryEditOpen => "QueryEditOpen",
            LookupEvent::RepositoriesFailed(_, _) => "RepositoriesFailed",
            LookupEvent::RepositoriesFetch(_, _) => "RepositoriesFetch",
            LookupEvent::RepositoriesLoaded(_, _, _) => "RepositoriesLoaded",
            LookupEvent::RepositoryNext => "RepositoryNext",
            LookupEvent::RepositoryOpenUrl => "RepositoryOpenUrl",
            LookupEvent::RepositoryPrevious => "RepositoryPrevious",
        }
    }
}

#[derive(Debug)]
pub struct EventHandler {
    sender: mpsc::Sender<LookupEvent>,
    receiver: mpsc::Receiver<LookupEvent>,
    _handler: thread::JoinHandle<()>,
}

pub trait IntoLookupEvent {
    fn into_lookup_event(self) -> LookupEvent;
}

impl EventHandler {
    pub fn new(tick_rate: std::time::Duration) -> Self {
        let (sender, receiver) = mpsc::channel();

        let handler = {
            let sender = sender.clone();
            thread::spawn(move || {
                let mut last_tick = std::time::Instant::now();
                loop {
                    let timeout = tick_rate
                        .checked_sub(last_tick.elapsed())
                        .unwrap_or(tick_rate);

                    match event::poll(timeout) {
                        Ok(true) => Self::apply_event(&sender),
                        Ok(false) => {},
                        Err(e) => {
                            error!(error = %e, "Unable to poll terminal events");
                            sender.dispatch(LookupEvent::AppExit);
                            break;
                        },
                    }

                    if last_tick.elapsed() >= tick_rate {
                        sender.dispatch(LookupEvent::AppTick);
                        last_tick = std::time::Instant::now();
                    }
                }
            })
        };

        Self { sender, receiver, _handler: handler }
    }

    pub fn sender(&self) -> mpsc::Sender<LookupEvent> {
        self.sender.clone()
    }

    pub fn next(&self) -> Result<LookupEvent, mpsc::RecvError> {
        self.receiver.recv()
    }

    pub fn try_next(&self) -> Option<LookupEvent> {
        self.receiver.try_recv().ok()
    }

    fn apply_event(sender: &mpsc::Sender<LookupEvent>) {
        match event::read() {
            Ok(CrosstermEvent::Key(e)) if e.kind == KeyEventKind::Press => {
                sender.dispatch(LookupEvent::InputKey(e))
            },
            Ok(_) => {},
            Err(e) => error!(error = %e, "Unable to read terminal event"),
        }
    }
}

impl IntoLookupEvent for (Generation, ProfileDto) {
    fn into_lookup_event(self) -> LookupEvent {
        let (generation, profile) = self;
        LookupEvent::ProfileLoaded(generation, Box::new(profile))
    }
}

impl IntoLookupEvent for (Generation, FetchRequest, Vec<RepositoryDto>) {
    fn into_lookup_event(self) -> LookupEvent {
        let (generation, request, repositories) = self;
        LookupEvent::RepositoriesLoaded(generation, request, repositories)
    }
}
